//! In-memory document for native tests.
//!
//! Provides the same page surfaces the browser binding does, over a
//! [`MockDom`] arena instead of `web_sys` elements, so every interaction can
//! be exercised without a browser.

mod element;
mod hero;
mod quiz_page;

pub use element::{DomElement, DomEvent, MockDom, NodeId};
pub use hero::{
    append_hero_section, install_hero, DomHeroView, HeroMarkup, MockHero, MockVideo, VideoState,
};
pub use quiz_page::{
    append_quiz_section, shared, DomQuizView, MarkupOptions, MockQuizPage, SharedDom,
};
