//! Per-quiz state machine.
//!
//! ```text
//!   Unanswered(i) --select--> Answered(i) --advance--> Transitioning(i)
//!        ^                                                  |
//!        |                  transition complete, i+1 < len  |
//!        +--------------------------------------------------+
//!                           transition complete, i+1 == len --> Summary
//! ```
//!
//! `reset` returns any state to `Unanswered(0)` and bumps the epoch so
//! deferred effects scheduled before the reset can recognise themselves as
//! stale.

use std::collections::BTreeMap;

use crate::content::QuizContent;

/// Where a quiz is in its question sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Question `i` is visible and accepts an answer
    Unanswered(usize),
    /// Question `i` has been answered; waiting for the user to proceed
    Answered(usize),
    /// Question `i` is playing its exit animation
    Transitioning(usize),
    /// Every question is hidden and the score is shown
    Summary,
}

/// A recorded answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Question index
    pub question: usize,
    /// Chosen option
    pub option: usize,
    /// The question's correct option
    pub answer: usize,
    /// Whether the chosen option is correct
    pub correct: bool,
}

/// What a completed transition revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The next question is now active
    Question(usize),
    /// The quiz finished
    Summary {
        /// Correct answers
        correct: usize,
        /// Number of questions
        total: usize,
    },
}

/// Answer-tracking state of one quiz instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizState {
    answer_key: Vec<usize>,
    option_counts: Vec<usize>,
    current: usize,
    answers: BTreeMap<usize, usize>,
    correct_count: usize,
    phase: Phase,
    epoch: u64,
}

impl QuizState {
    /// Create the initial state for `content`
    #[must_use]
    pub fn new(content: &QuizContent) -> Self {
        Self {
            answer_key: content.questions.iter().map(|q| q.answer).collect(),
            option_counts: content.questions.iter().map(|q| q.options.len()).collect(),
            current: 0,
            answers: BTreeMap::new(),
            correct_count: 0,
            phase: Phase::Unanswered(0),
            epoch: 0,
        }
    }

    /// Continue the epoch sequence of a replaced instance
    #[must_use]
    pub(crate) fn succeeding(mut self, previous: &Self) -> Self {
        self.epoch = previous.epoch + 1;
        self
    }

    /// Record `option` for `question`
    ///
    /// Returns `None` (and changes nothing) unless `question` is the current
    /// question, it is still unanswered, and `option` exists.
    pub fn select(&mut self, question: usize, option: usize) -> Option<Selection> {
        if self.phase != Phase::Unanswered(question) || question != self.current {
            return None;
        }
        if self.answers.contains_key(&question) {
            return None;
        }
        if option >= *self.option_counts.get(question)? {
            return None;
        }

        let answer = self.answer_key[question];
        let correct = option == answer;
        self.answers.insert(question, option);
        if correct {
            self.correct_count += 1;
        }
        self.phase = Phase::Answered(question);

        Some(Selection {
            question,
            option,
            answer,
            correct,
        })
    }

    /// Start leaving the answered question; returns its index
    pub fn begin_advance(&mut self) -> Option<usize> {
        match self.phase {
            Phase::Answered(i) => {
                self.phase = Phase::Transitioning(i);
                Some(i)
            }
            _ => None,
        }
    }

    /// Finish the transition away from `from`
    pub fn finish_advance(&mut self, from: usize) -> Option<Step> {
        if self.phase != Phase::Transitioning(from) {
            return None;
        }
        let next = from + 1;
        if next < self.answer_key.len() {
            self.current = next;
            self.phase = Phase::Unanswered(next);
            Some(Step::Question(next))
        } else {
            self.current = self.answer_key.len();
            self.phase = Phase::Summary;
            Some(Step::Summary {
                correct: self.correct_count,
                total: self.answer_key.len(),
            })
        }
    }

    /// Forget all answers and return to the first question
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.correct_count = 0;
        self.phase = Phase::Unanswered(0);
        self.epoch += 1;
    }

    /// Current phase
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the visible question; equals `question_count()` in Summary
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// The question eligible for input or in view, `None` in Summary
    #[must_use]
    pub fn active_question(&self) -> Option<usize> {
        match self.phase {
            Phase::Summary => None,
            Phase::Unanswered(i) | Phase::Answered(i) | Phase::Transitioning(i) => Some(i),
        }
    }

    /// Recorded answers by question index
    #[must_use]
    pub const fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    /// Recorded answer for `question`
    #[must_use]
    pub fn answer_for(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    /// Number of correct answers so far
    #[must_use]
    pub const fn correct_count(&self) -> usize {
        self.correct_count
    }

    /// Number of questions
    #[must_use]
    pub fn question_count(&self) -> usize {
        self.answer_key.len()
    }

    /// Number of resets performed
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether the score summary is showing
    #[must_use]
    pub fn is_summary(&self) -> bool {
        self.phase == Phase::Summary
    }

    /// Whether a question transition is in flight
    #[must_use]
    pub const fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Question;

    fn two_questions() -> QuizState {
        QuizState::new(&QuizContent::new(vec![
            Question::new("first", &["a", "b", "c"], 1),
            Question::new("second", &["a", "b"], 0),
        ]))
    }

    #[test]
    fn test_initial_state() {
        let state = two_questions();
        assert_eq!(state.phase(), Phase::Unanswered(0));
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.correct_count(), 0);
        assert!(state.answers().is_empty());
        assert_eq!(state.active_question(), Some(0));
        assert_eq!(state.epoch(), 0);
    }

    #[test]
    fn test_select_correct() {
        let mut state = two_questions();
        let sel = state.select(0, 1).unwrap();
        assert!(sel.correct);
        assert_eq!(sel.answer, 1);
        assert_eq!(state.correct_count(), 1);
        assert_eq!(state.answer_for(0), Some(1));
        assert_eq!(state.phase(), Phase::Answered(0));
    }

    #[test]
    fn test_select_wrong_keeps_score() {
        let mut state = two_questions();
        let sel = state.select(0, 0).unwrap();
        assert!(!sel.correct);
        assert_eq!(sel.answer, 1);
        assert_eq!(state.correct_count(), 0);
        assert_eq!(state.answer_for(0), Some(0));
    }

    #[test]
    fn test_select_is_idempotent_once_answered() {
        let mut state = two_questions();
        state.select(0, 0).unwrap();
        let before = state.clone();
        assert_eq!(state.select(0, 1), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_select_other_question_is_ignored() {
        let mut state = two_questions();
        assert_eq!(state.select(1, 0), None);
        assert!(state.answers().is_empty());
    }

    #[test]
    fn test_select_out_of_range_option_is_ignored() {
        let mut state = two_questions();
        assert_eq!(state.select(0, 3), None);
        assert_eq!(state.phase(), Phase::Unanswered(0));
    }

    #[test]
    fn test_advance_requires_answer() {
        let mut state = two_questions();
        assert_eq!(state.begin_advance(), None);
        assert_eq!(state.finish_advance(0), None);
    }

    #[test]
    fn test_transition_blocks_input() {
        let mut state = two_questions();
        state.select(0, 1).unwrap();
        assert_eq!(state.begin_advance(), Some(0));
        assert!(state.is_transitioning());
        assert_eq!(state.begin_advance(), None);
        assert_eq!(state.select(0, 2), None);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_full_sequence_to_summary() {
        let mut state = two_questions();
        state.select(0, 1).unwrap();
        state.begin_advance().unwrap();
        assert_eq!(state.finish_advance(0), Some(Step::Question(1)));
        assert_eq!(state.current_index(), 1);

        state.select(1, 0).unwrap();
        state.begin_advance().unwrap();
        assert_eq!(
            state.finish_advance(1),
            Some(Step::Summary {
                correct: 2,
                total: 2
            })
        );
        assert!(state.is_summary());
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.active_question(), None);
    }

    #[test]
    fn test_finish_advance_from_wrong_question() {
        let mut state = two_questions();
        state.select(0, 1).unwrap();
        state.begin_advance().unwrap();
        assert_eq!(state.finish_advance(1), None);
        assert!(state.is_transitioning());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = two_questions();
        state.select(0, 1).unwrap();
        state.begin_advance().unwrap();
        state.finish_advance(0).unwrap();
        state.reset();

        assert_eq!(state.phase(), Phase::Unanswered(0));
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.correct_count(), 0);
        assert!(state.answers().is_empty());
        assert_eq!(state.epoch(), 1);
    }

    #[test]
    fn test_reset_twice_matches_once_except_epoch() {
        let mut once = two_questions();
        once.select(0, 1).unwrap();
        once.reset();
        let mut twice = once.clone();
        twice.reset();

        assert_eq!(once.phase(), twice.phase());
        assert_eq!(once.answers(), twice.answers());
        assert_eq!(once.correct_count(), twice.correct_count());
        assert_eq!(once.current_index(), twice.current_index());
    }
}
