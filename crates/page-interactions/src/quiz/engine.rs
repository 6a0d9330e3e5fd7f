//! Quiz registry and interaction handling.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::config::InteractionConfig;
use crate::content::ContentSource;
use crate::error::{InteractionError, InteractionResult};
use crate::quiz::feedback::ParticleEmitter;
use crate::quiz::state::{QuizState, Selection, Step};
use crate::quiz::view::{QuizPage, QuizView};
use crate::quiz::PageMode;
use crate::scheduler::TaskQueue;

/// One initialized quiz: its state, its bound view and its collapse flag
struct QuizInstance<V> {
    state: QuizState,
    view: V,
    collapsed: bool,
}

/// A deferred visual effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Effect {
    RevealCorrect { question: usize, option: usize },
    ShowExplanation { question: usize },
    ShowNext { question: usize },
    ClearParticles { question: usize, option: usize },
    FinishTransition { from: usize },
}

impl Effect {
    /// Question whose visibility the effect depends on
    const fn requires_current(self) -> Option<usize> {
        match self {
            Self::RevealCorrect { question, .. }
            | Self::ShowExplanation { question }
            | Self::ShowNext { question } => Some(question),
            Self::ClearParticles { .. } | Self::FinishTransition { .. } => None,
        }
    }
}

/// A deferred effect with the state it was scheduled against
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuizTask {
    quiz_id: String,
    epoch: u64,
    effect: Effect,
}

/// Drives every quiz on a page
///
/// The engine is the registry of quiz instances (keyed by identifier), the
/// owner of the deferred-effect queue, and the only place answers are
/// evaluated. Hosts feed it input events and call [`run_due`](Self::run_due)
/// whenever a scheduled deadline passes.
pub struct QuizEngine<P: QuizPage> {
    page: P,
    content: Option<Box<dyn ContentSource>>,
    config: InteractionConfig,
    clock: Box<dyn Clock>,
    quizzes: HashMap<String, QuizInstance<P::View>>,
    timers: TaskQueue<QuizTask>,
    particles: ParticleEmitter,
}

impl<P: QuizPage> fmt::Debug for QuizEngine<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<_> = self.quizzes.keys().collect();
        ids.sort();
        f.debug_struct("QuizEngine")
            .field("quizzes", &ids)
            .field("has_content", &self.content.is_some())
            .field("pending_tasks", &self.timers.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<P: QuizPage> QuizEngine<P> {
    /// Create an engine for `page` with no content source yet
    pub fn new(page: P, clock: impl Clock + 'static) -> Self {
        let config = InteractionConfig::default();
        Self {
            page,
            content: None,
            particles: ParticleEmitter::new(config.particles),
            config,
            clock: Box::new(clock),
            quizzes: HashMap::new(),
            timers: TaskQueue::new(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: InteractionConfig) -> Self {
        self.particles = ParticleEmitter::new(config.particles);
        self.config = config;
        self
    }

    /// Attach a content source
    #[must_use]
    pub fn with_content(mut self, content: impl ContentSource + 'static) -> Self {
        self.set_content(content);
        self
    }

    /// Attach or replace the content source
    pub fn set_content(&mut self, content: impl ContentSource + 'static) {
        self.content = Some(Box::new(content));
    }

    /// Initialize the quiz `quiz_id`, reporting why it could not be
    ///
    /// Re-initializing an existing quiz rebinds its container and starts it
    /// over.
    pub fn try_init(&mut self, quiz_id: &str) -> InteractionResult<()> {
        let content = self
            .content
            .as_deref()
            .ok_or(InteractionError::ContentUnavailable)?
            .quiz(quiz_id)
            .ok_or_else(|| InteractionError::QuizNotFound {
                quiz_id: quiz_id.to_string(),
            })?;
        content.validate(quiz_id)?;

        let mut view = self
            .page
            .bind(quiz_id, content)
            .ok_or_else(|| InteractionError::ContainerNotFound {
                quiz_id: quiz_id.to_string(),
            })?;

        let collapsed = content.starts_collapsed();
        let mut state = QuizState::new(content);
        if let Some(previous) = self.quizzes.get(quiz_id) {
            state = state.succeeding(&previous.state);
            view.restore();
        }
        view.show_question(0);
        view.set_collapsed(collapsed);
        view.refresh_icons();

        debug!(quiz_id, questions = state.question_count(), collapsed, "quiz initialized");
        self.quizzes.insert(
            quiz_id.to_string(),
            QuizInstance {
                state,
                view,
                collapsed,
            },
        );
        Ok(())
    }

    /// Initialize `quiz_id`; failures are logged and otherwise ignored
    ///
    /// Returns whether the quiz is now live.
    pub fn init(&mut self, quiz_id: &str) -> bool {
        match self.try_init(quiz_id) {
            Ok(()) => true,
            Err(e) if e.is_init_precondition() => {
                warn!(quiz_id, "{e}");
                false
            }
            Err(e) => {
                warn!(quiz_id, error = %e, "quiz initialization failed");
                false
            }
        }
    }

    /// Initialize every quiz container on the page; returns how many went live
    pub fn init_all(&mut self) -> usize {
        let ids = self.page.quiz_ids();
        ids.iter().filter(|id| self.init(id)).count()
    }

    /// Answer `question` with `option`
    ///
    /// Ignored in edit mode, for unknown quizzes, for questions other than the
    /// active one, for already-answered questions and during transitions.
    pub fn select(
        &mut self,
        quiz_id: &str,
        question: usize,
        option: usize,
        mode: PageMode,
    ) -> Option<Selection> {
        if mode.is_edit() {
            return None;
        }
        let now = self.clock.now_ms();
        let timing = self.config.quiz;
        let quiz = self.quizzes.get_mut(quiz_id)?;
        let selection = quiz.state.select(question, option)?;
        let epoch = quiz.state.epoch();
        let mut schedule = |delay: u64, effect: Effect| {
            self.timers.schedule(
                now,
                delay,
                QuizTask {
                    quiz_id: quiz_id.to_string(),
                    epoch,
                    effect,
                },
            );
        };

        if selection.correct {
            quiz.view.mark_correct(question, option);
            let burst = self.particles.burst();
            quiz.view.burst_particles(question, option, &burst);
            schedule(
                timing.particle_lifetime_ms,
                Effect::ClearParticles { question, option },
            );
        } else {
            quiz.view.mark_wrong(question, option);
            schedule(
                timing.reveal_correct_ms,
                Effect::RevealCorrect {
                    question,
                    option: selection.answer,
                },
            );
        }
        schedule(timing.explanation_ms, Effect::ShowExplanation { question });
        quiz.view.disable_options(question);
        schedule(timing.next_button_ms, Effect::ShowNext { question });

        debug!(
            quiz_id,
            question,
            option,
            correct = selection.correct,
            score = quiz.state.correct_count(),
            "answer recorded"
        );
        Some(selection)
    }

    /// Leave the answered question
    ///
    /// The next question (or the summary) appears once the transition delay
    /// has passed and [`run_due`](Self::run_due) is called. Returns whether a
    /// transition started.
    pub fn advance(&mut self, quiz_id: &str, mode: PageMode) -> bool {
        if mode.is_edit() {
            return false;
        }
        let now = self.clock.now_ms();
        let Some(quiz) = self.quizzes.get_mut(quiz_id) else {
            return false;
        };
        let Some(from) = quiz.state.begin_advance() else {
            return false;
        };
        quiz.view.begin_exit(from);
        self.timers.schedule(
            now,
            self.config.quiz.transition_ms,
            QuizTask {
                quiz_id: quiz_id.to_string(),
                epoch: quiz.state.epoch(),
                effect: Effect::FinishTransition { from },
            },
        );
        debug!(quiz_id, from, "transition started");
        true
    }

    /// Flip the collapsed state; expanding scrolls the quiz into view
    ///
    /// Returns the new collapsed state, or `None` for an unknown quiz.
    pub fn toggle_collapse(&mut self, quiz_id: &str) -> Option<bool> {
        let quiz = self.quizzes.get_mut(quiz_id)?;
        quiz.collapsed = !quiz.collapsed;
        quiz.view.set_collapsed(quiz.collapsed);
        if !quiz.collapsed {
            quiz.view.scroll_into_view();
        }
        Some(quiz.collapsed)
    }

    /// Return the quiz to its first question with no answers
    ///
    /// Effects scheduled before the reset are discarded when they fire.
    pub fn reset(&mut self, quiz_id: &str) -> bool {
        let Some(quiz) = self.quizzes.get_mut(quiz_id) else {
            return false;
        };
        quiz.state.reset();
        quiz.view.restore();
        quiz.view.show_question(0);
        debug!(quiz_id, epoch = quiz.state.epoch(), "quiz reset");
        true
    }

    /// Run every deferred effect whose deadline has passed
    ///
    /// Returns how many effects were applied; stale ones are dropped.
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut applied = 0;
        while let Some(task) = self.timers.pop_due(now) {
            if self.apply(task) {
                applied += 1;
            }
        }
        applied
    }

    fn apply(&mut self, task: QuizTask) -> bool {
        let Some(quiz) = self.quizzes.get_mut(&task.quiz_id) else {
            return false;
        };
        if quiz.state.epoch() != task.epoch {
            debug!(
                quiz_id = %task.quiz_id,
                effect = ?task.effect,
                "dropping effect scheduled before reset"
            );
            return false;
        }
        if let Some(question) = task.effect.requires_current() {
            if quiz.state.active_question() != Some(question) {
                debug!(
                    quiz_id = %task.quiz_id,
                    effect = ?task.effect,
                    "dropping effect for a question no longer shown"
                );
                return false;
            }
        }

        match task.effect {
            Effect::RevealCorrect { question, option } => {
                quiz.view.reveal_correct(question, option);
            }
            Effect::ShowExplanation { question } => {
                if quiz.view.show_explanation(question) {
                    quiz.view.refresh_icons();
                }
            }
            Effect::ShowNext { question } => {
                if quiz.view.show_next(question) {
                    quiz.view.refresh_icons();
                }
            }
            Effect::ClearParticles { question, option } => {
                quiz.view.clear_particles(question, option);
            }
            Effect::FinishTransition { from } => match quiz.state.finish_advance(from) {
                Some(Step::Question(next)) => {
                    quiz.view.hide_question(from);
                    quiz.view.show_question(next);
                    debug!(quiz_id = %task.quiz_id, question = next, "question shown");
                }
                Some(Step::Summary { correct, total }) => {
                    quiz.view.hide_question(from);
                    if quiz.view.show_summary(correct, total) {
                        quiz.view.refresh_icons();
                    }
                    debug!(quiz_id = %task.quiz_id, correct, total, "summary shown");
                }
                None => return false,
            },
        }
        true
    }

    /// Earliest pending deadline in clock milliseconds
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Number of deferred effects not yet run
    #[must_use]
    pub fn pending_effects(&self) -> usize {
        self.timers.len()
    }

    /// Current clock reading
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    /// State of `quiz_id`
    #[must_use]
    pub fn state(&self, quiz_id: &str) -> Option<&QuizState> {
        self.quizzes.get(quiz_id).map(|q| &q.state)
    }

    /// Collapsed flag of `quiz_id`
    #[must_use]
    pub fn is_collapsed(&self, quiz_id: &str) -> Option<bool> {
        self.quizzes.get(quiz_id).map(|q| q.collapsed)
    }

    /// Bound view of `quiz_id`
    #[must_use]
    pub fn view(&self, quiz_id: &str) -> Option<&P::View> {
        self.quizzes.get(quiz_id).map(|q| &q.view)
    }

    /// Identifiers of initialized quizzes, sorted
    #[must_use]
    pub fn quiz_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self.quizzes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The page
    pub fn page(&self) -> &P {
        &self.page
    }

    /// The active configuration
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }
}
