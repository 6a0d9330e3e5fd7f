//! Single-question-at-a-time quiz engine.
//!
//! The engine owns every quiz instance on a page, evaluates answers, tallies
//! the score and schedules the deferred feedback effects. Presentation goes
//! through the [`QuizView`] seam so the same engine drives the mock DOM in
//! tests and the real document in the browser.

mod engine;
pub mod feedback;
pub mod markup;
pub mod state;
mod view;

pub use engine::QuizEngine;
pub use feedback::{Particle, ParticleEmitter};
pub use state::{Phase, QuizState, Selection, Step};
pub use view::{QuizPage, QuizView};

/// Whether the page is being used or edited
///
/// Answer selection and advancing are ignored while editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    /// Normal reading mode
    #[default]
    Live,
    /// Page editor mode; quiz input is inert
    Edit,
}

impl PageMode {
    /// Derive the mode from the document body's class list
    pub fn from_body_classes<'a>(mut classes: impl Iterator<Item = &'a str>) -> Self {
        if classes.any(|c| c == markup::EDIT_MODE) {
            Self::Edit
        } else {
            Self::Live
        }
    }

    /// Whether input is inert
    #[must_use]
    pub const fn is_edit(self) -> bool {
        matches!(self, Self::Edit)
    }
}
