//! Unified quiz driver.
//!
//! Scenario logic is written once against [`QuizDriver`] and replayed on any
//! page implementation. [`MockQuizDriver`] clicks through the mock document
//! and advances a manual clock; a browser driver would click real elements
//! and await real timers.

use crate::clock::ManualClock;
use crate::config::InteractionConfig;
use crate::content::{Material, QuizContent};
use crate::dom::{
    append_quiz_section, shared, DomQuizView, MarkupOptions, MockDom, MockQuizPage, SharedDom,
};
use crate::error::InteractionResult;
use crate::quiz::{markup, PageMode, QuizEngine};

/// Abstract driver for one quiz on a page
///
/// # Example
///
/// ```rust,ignore
/// fn answer_all_correctly<D: QuizDriver>(driver: &mut D, answers: &[usize]) {
///     for (q, a) in answers.iter().enumerate() {
///         driver.click_option(q, *a);
///         driver.wait(600);
///         driver.click_next(q);
///         driver.wait(400);
///     }
///     assert_eq!(driver.score_text().as_deref(), Some("2"));
/// }
/// ```
pub trait QuizDriver {
    /// Click option `option` of question `question`; `false` if the click
    /// was swallowed or changed nothing
    fn click_option(&mut self, question: usize, option: usize) -> bool;

    /// Click the next button of `question`; `false` if it is not clickable
    fn click_next(&mut self, question: usize) -> bool;

    /// Let `ms` milliseconds pass
    fn wait(&mut self, ms: u64);

    /// Click the collapse toggle; returns the new collapsed state
    fn toggle_collapse(&mut self) -> Option<bool>;

    /// Restart the quiz
    fn reset(&mut self) -> bool;

    /// Text of the final score when the summary is visible
    fn score_text(&self) -> Option<String>;

    /// Indices of the visible question cards
    fn active_questions(&self) -> Vec<usize>;

    /// Whether the section shows as collapsed
    fn is_collapsed(&self) -> bool;

    /// Correct answers so far
    fn correct_count(&self) -> usize;
}

/// [`QuizDriver`] over a mock document and a manual clock
#[derive(Debug)]
pub struct MockQuizDriver {
    engine: QuizEngine<MockQuizPage>,
    dom: SharedDom,
    clock: ManualClock,
    quiz_id: String,
}

impl MockQuizDriver {
    /// Renders `content` as quiz `quiz_id` and initializes it
    ///
    /// # Errors
    ///
    /// Propagates the engine's initialization error.
    pub fn new(quiz_id: &str, content: QuizContent) -> InteractionResult<Self> {
        Self::with_options(
            quiz_id,
            content,
            MarkupOptions::default(),
            InteractionConfig::default(),
        )
    }

    /// Like [`MockQuizDriver::new`] with explicit markup and configuration
    ///
    /// # Errors
    ///
    /// Propagates the engine's initialization error.
    pub fn with_options(
        quiz_id: &str,
        content: QuizContent,
        markup: MarkupOptions,
        config: InteractionConfig,
    ) -> InteractionResult<Self> {
        let mut dom = MockDom::new();
        let body = dom.body();
        append_quiz_section(&mut dom, body, quiz_id, &content, markup);
        let dom = shared(dom);

        let clock = ManualClock::new();
        let mut engine = QuizEngine::new(MockQuizPage::new(dom.clone()), clock.clone())
            .with_config(config)
            .with_content(Material::new().with_quiz(quiz_id, content));
        engine.try_init(quiz_id)?;

        Ok(Self {
            engine,
            dom,
            clock,
            quiz_id: quiz_id.to_string(),
        })
    }

    /// Toggles the page editor flag on the body
    pub fn set_edit_mode(&mut self, editing: bool) {
        let mut dom = self.dom.borrow_mut();
        let body = dom.body();
        if editing {
            dom.add_class(body, markup::EDIT_MODE);
        } else {
            dom.remove_class(body, markup::EDIT_MODE);
        }
    }

    /// Runs every pending effect, advancing the clock as far as needed
    pub fn settle(&mut self) {
        while let Some(deadline) = self.engine.next_deadline() {
            self.clock.set(deadline);
            self.engine.run_due();
        }
    }

    /// The engine
    #[must_use]
    pub const fn engine(&self) -> &QuizEngine<MockQuizPage> {
        &self.engine
    }

    /// Mutable access to the engine
    pub fn engine_mut(&mut self) -> &mut QuizEngine<MockQuizPage> {
        &mut self.engine
    }

    /// The shared document
    #[must_use]
    pub const fn dom(&self) -> &SharedDom {
        &self.dom
    }

    /// The clock
    #[must_use]
    pub const fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// The bound view
    #[must_use]
    pub fn view(&self) -> Option<&DomQuizView> {
        self.engine.view(&self.quiz_id)
    }

    fn mode(&self) -> PageMode {
        PageMode::from_body_classes(self.dom.borrow().body_classes().into_iter())
    }
}

impl QuizDriver for MockQuizDriver {
    fn click_option(&mut self, question: usize, option: usize) -> bool {
        let Some(button) = self.view().and_then(|v| v.option_button(question, option)) else {
            return false;
        };
        if !self.dom.borrow_mut().click(button) {
            return false;
        }
        let mode = self.mode();
        self.engine
            .select(&self.quiz_id, question, option, mode)
            .is_some()
    }

    fn click_next(&mut self, question: usize) -> bool {
        let Some(view) = self.view() else {
            return false;
        };
        let (Some(container), Some(button)) =
            (view.next_container(question), view.next_button(question))
        else {
            return false;
        };
        {
            let mut dom = self.dom.borrow_mut();
            if dom.has_class(container, markup::HIDDEN) || !dom.click(button) {
                return false;
            }
        }
        let mode = self.mode();
        self.engine.advance(&self.quiz_id, mode)
    }

    fn wait(&mut self, ms: u64) {
        self.clock.advance(ms);
        self.engine.run_due();
    }

    fn toggle_collapse(&mut self) -> Option<bool> {
        let toggle = self.view()?.toggle_button()?;
        if !self.dom.borrow_mut().click(toggle) {
            return None;
        }
        self.engine.toggle_collapse(&self.quiz_id)
    }

    fn reset(&mut self) -> bool {
        self.engine.reset(&self.quiz_id)
    }

    fn score_text(&self) -> Option<String> {
        let view = self.view()?;
        let dom = self.dom.borrow();
        let summary = view.summary()?;
        if dom.has_class(summary, markup::HIDDEN) {
            return None;
        }
        dom.text(view.final_score()?).map(str::to_string)
    }

    fn active_questions(&self) -> Vec<usize> {
        self.view().map(DomQuizView::active_cards).unwrap_or_default()
    }

    fn is_collapsed(&self) -> bool {
        self.view()
            .is_some_and(|v| self.dom.borrow().has_class(v.section(), markup::COLLAPSED))
    }

    fn correct_count(&self) -> usize {
        self.engine
            .state(&self.quiz_id)
            .map_or(0, crate::quiz::QuizState::correct_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::content::Question;

    fn content() -> QuizContent {
        QuizContent::new(vec![
            Question::new("Q1", &["a", "b"], 1).with_explanation("b"),
            Question::new("Q2", &["c", "d"], 0),
        ])
    }

    #[test]
    fn test_driver_new() {
        let driver = MockQuizDriver::new("q", content()).unwrap();
        assert_eq!(driver.active_questions(), vec![0]);
        assert!(driver.is_collapsed());
        assert_eq!(driver.correct_count(), 0);
        assert_eq!(driver.score_text(), None);
    }

    #[test]
    fn test_driver_rejects_empty_quiz() {
        assert!(MockQuizDriver::new("q", QuizContent::new(Vec::new())).is_err());
    }

    #[test]
    fn test_click_disabled_option_is_swallowed() {
        let mut driver = MockQuizDriver::new("q", content()).unwrap();
        assert!(driver.click_option(0, 1));
        assert!(!driver.click_option(0, 0));
        assert_eq!(driver.correct_count(), 1);
    }

    #[test]
    fn test_next_hidden_until_delay() {
        let mut driver = MockQuizDriver::new("q", content()).unwrap();
        driver.click_option(0, 1);
        assert!(!driver.click_next(0));
        driver.wait(600);
        assert!(driver.click_next(0));
    }

    #[test]
    fn test_edit_mode_blocks_clicks() {
        let mut driver = MockQuizDriver::new("q", content()).unwrap();
        driver.set_edit_mode(true);
        assert!(!driver.click_option(0, 1));
        driver.set_edit_mode(false);
        assert!(driver.click_option(0, 1));
    }

    #[test]
    fn test_settle_drains_effects() {
        let mut driver = MockQuizDriver::new("q", content()).unwrap();
        driver.click_option(0, 1);
        driver.settle();
        assert_eq!(driver.engine().pending_effects(), 0);
        assert_eq!(driver.clock().now_ms(), 1000);
    }

    #[test]
    fn test_toggle_through_header() {
        let mut driver = MockQuizDriver::new("q", content()).unwrap();
        assert_eq!(driver.toggle_collapse(), Some(false));
        assert!(!driver.is_collapsed());
    }

    #[test]
    fn test_driver_debug() {
        let driver = MockQuizDriver::new("q", content()).unwrap();
        assert!(format!("{driver:?}").contains("MockQuizDriver"));
    }
}
