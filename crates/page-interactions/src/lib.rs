//! Page Interactions - quiz engine and hero cinema mode for documentation pages
//!
//! Two independent widgets driven by DOM events:
//!
//! - **Quiz engine**: one question at a time, immediate feedback, delayed
//!   explanation and next button, a score summary, collapse and reset.
//! - **Hero controller**: promotes the landing video to a "cinema" view with
//!   play/pause, a seekable progress bar and a time label.
//!
//! The logic is platform independent. A mock document ([`dom`]) drives it
//! natively in tests; the `wasm` feature adds the browser bindings.
//!
//! # Example
//!
//! ```rust
//! use page_interactions::prelude::*;
//!
//! let content = QuizContent::new(vec![
//!     Question::new("2 + 2?", &["3", "4"], 1).with_explanation("Arithmetic"),
//! ]);
//! let mut driver = MockQuizDriver::new("basics", content).unwrap();
//!
//! assert!(driver.click_option(0, 1));
//! driver.wait(600);
//! assert!(driver.click_next(0));
//! driver.wait(400);
//! assert_eq!(driver.score_text().as_deref(), Some("1"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod clock;
pub mod config;
pub mod content;
pub mod error;
pub mod hero;
pub mod quiz;
pub mod scheduler;

/// Mock document - always available for testing
/// (lets every interaction run without a browser)
pub mod dom;
pub mod driver;

#[cfg(not(target_arch = "wasm32"))]
pub mod logging;

#[cfg(feature = "wasm")]
pub mod browser;

pub use error::{InteractionError, InteractionResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock};
    pub use crate::config::{InteractionConfig, ParticleConfig, QuizTiming};
    pub use crate::content::{ContentSource, Material, Question, QuizContent};
    pub use crate::driver::{MockQuizDriver, QuizDriver};
    pub use crate::error::{InteractionError, InteractionResult};
    pub use crate::hero::{
        format_time, HeroController, HeroView, MediaElement, MediaEvent, PlaybackIcon,
        TrackBounds,
    };
    pub use crate::quiz::{PageMode, Phase, QuizEngine, QuizPage, QuizState, QuizView, Selection};

    pub use crate::dom::{
        append_hero_section, append_quiz_section, install_hero, shared, DomEvent, DomHeroView,
        DomQuizView, HeroMarkup, MarkupOptions, MockDom, MockHero, MockQuizPage, MockVideo,
        SharedDom,
    };

    #[cfg(feature = "wasm")]
    pub use crate::browser::{BrowserQuizEngine, PerformanceClock};
}
