//! Presentation seam between the quiz engine and a page.
//!
//! A [`QuizPage`] finds quiz containers and binds each one once into a
//! [`QuizView`] that holds typed handles to its cards, options and panels.
//! Views never decide anything; they only apply the effects the engine asks
//! for. Every method must tolerate being called on elements already in the
//! requested state, and must skip sub-elements the markup does not provide.

use crate::content::QuizContent;
use crate::quiz::feedback::Particle;

/// Presentation of one bound quiz container
pub trait QuizView {
    /// Apply the collapsed or expanded appearance
    fn set_collapsed(&mut self, collapsed: bool);

    /// Bring the quiz into the viewport
    fn scroll_into_view(&mut self);

    /// Make `question` the only active card and play its entry animation
    fn show_question(&mut self, question: usize);

    /// Deactivate the card of `question`
    fn hide_question(&mut self, question: usize);

    /// Start the exit animation of `question`
    fn begin_exit(&mut self, question: usize);

    /// Correct styling, checkmark and bounce on the chosen option
    fn mark_correct(&mut self, question: usize, option: usize);

    /// Wrong styling and shake on the chosen option
    fn mark_wrong(&mut self, question: usize, option: usize);

    /// Correct styling and checkmark on the correct option after a wrong answer
    fn reveal_correct(&mut self, question: usize, option: usize);

    /// Replace the option's particles with `particles`
    fn burst_particles(&mut self, question: usize, option: usize, particles: &[Particle]);

    /// Remove the option's particles
    fn clear_particles(&mut self, question: usize, option: usize);

    /// Make every option of `question` non-interactive
    fn disable_options(&mut self, question: usize);

    /// Reveal the explanation panel; `false` if the card has none
    fn show_explanation(&mut self, question: usize) -> bool;

    /// Reveal the next button; `false` if the card has none
    fn show_next(&mut self, question: usize) -> bool;

    /// Hide every card, collapse the questions container and show
    /// `correct` as the final score; `false` if the summary panel is missing
    fn show_summary(&mut self, correct: usize, total: usize) -> bool;

    /// Return every card, option and panel to its initial appearance
    fn restore(&mut self);

    /// Materialise icon glyphs introduced by the last change
    fn refresh_icons(&mut self);
}

/// A page that hosts quiz containers
pub trait QuizPage {
    /// View type produced for each bound container
    type View: QuizView;

    /// Identifiers of every quiz container on the page, in document order
    fn quiz_ids(&self) -> Vec<String>;

    /// Capture handles for the container of `quiz_id`
    ///
    /// Returns `None` when the page has no such container.
    fn bind(&mut self, quiz_id: &str, content: &QuizContent) -> Option<Self::View>;
}
