//! Class names, data attributes and animations shared by every quiz view.
//!
//! These are the hooks the host page's markup and stylesheet provide.

use std::collections::BTreeMap;

/// Data attribute carrying the quiz identifier on the section
pub const ATTR_QUIZ_ID: &str = "data-quiz-id";
/// Data attribute carrying a zero-based question index
pub const ATTR_QUESTION_INDEX: &str = "data-question-index";
/// Data attribute carrying a zero-based option index
pub const ATTR_OPTION_INDEX: &str = "data-option-index";

/// Quiz section container
pub const SECTION: &str = "quiz-section";
/// Wrapper around all question cards
pub const QUESTIONS_CONTAINER: &str = "quiz-questions-container";
/// One question card
pub const QUESTION_CARD: &str = "quiz-question-card";
/// Selectable option button
pub const OPTION_BUTTON: &str = "quiz-option-btn";
/// Checkmark inside an option
pub const OPTION_CHECKMARK: &str = "quiz-option-checkmark";
/// Particle host inside an option
pub const OPTION_PARTICLES: &str = "quiz-option-particles";
/// A single particle element
pub const PARTICLE: &str = "quiz-particle";
/// Explanation panel of a card
pub const EXPLANATION_PANEL: &str = "quiz-explanation-panel";
/// Wrapper of the next button
pub const NEXT_CONTAINER: &str = "quiz-next-btn-container";
/// The next button
pub const NEXT_BUTTON: &str = "quiz-next-btn";
/// Score summary panel
pub const SCORE_SUMMARY: &str = "quiz-score-summary";
/// Score placeholder inside the summary
pub const FINAL_SCORE: &str = "quiz-final-score";
/// Question count placeholder inside the summary
pub const TOTAL_SCORE: &str = "quiz-total-score";
/// Collapse chevron
pub const CHEVRON: &str = "quiz-chevron";
/// Header button that collapses and expands the section
pub const TOGGLE_BUTTON: &str = "quiz-toggle-btn";
/// Retake button inside the summary
pub const RESET_BUTTON: &str = "quiz-reset-btn";

/// Visible question card
pub const ACTIVE: &str = "active";
/// Hidden element
pub const HIDDEN: &str = "hidden";
/// Collapsed section
pub const COLLAPSED: &str = "quiz-collapsed";
/// Expanded section
pub const EXPANDED: &str = "quiz-expanded";
/// Body class marking the page editor
pub const EDIT_MODE: &str = "edit-mode";

/// Neutral option border
pub const NEUTRAL_BORDER: &str = "border-white/10";
/// Correct-choice marker
pub const OPTION_CORRECT: &str = "quiz-option-correct";
/// Wrong-choice marker
pub const OPTION_WRONG: &str = "quiz-option-wrong";
/// Correct option revealed after a wrong answer
pub const OPTION_CORRECT_REVEAL: &str = "quiz-option-correct-reveal";
/// Disabled option cursor
pub const CURSOR_NOT_ALLOWED: &str = "cursor-not-allowed";
/// Styling shared by correct and revealed options
pub const CORRECT_STYLE: [&str; 2] = ["border-green-500", "bg-green-900/20"];
/// Styling of a wrong option
pub const WRONG_STYLE: [&str; 2] = ["border-red-500", "bg-red-900/20"];
/// Hidden checkmark
pub const CHECK_HIDDEN: &str = "opacity-0";
/// Visible checkmark
pub const CHECK_VISIBLE: [&str; 2] = ["opacity-100", "text-green-500"];

/// Every class that answer feedback may add to an option
pub const FEEDBACK_CLASSES: [&str; 8] = [
    CURSOR_NOT_ALLOWED,
    OPTION_CORRECT,
    OPTION_WRONG,
    OPTION_CORRECT_REVEAL,
    CORRECT_STYLE[0],
    CORRECT_STYLE[1],
    WRONG_STYLE[0],
    WRONG_STYLE[1],
];

/// CSS animations applied through the `animation` style property
pub mod animation {
    /// Incoming question card
    pub const CARD_IN: &str = "quiz-fade-slide-in 0.5s cubic-bezier(0.16, 1, 0.3, 1)";
    /// Outgoing question card
    pub const CARD_OUT: &str = "quiz-fade-slide-out 0.4s cubic-bezier(0.4, 0.0, 1, 1)";
    /// Correct option
    pub const BOUNCE: &str = "quiz-bounce 0.6s cubic-bezier(0.68, -0.55, 0.265, 1.55)";
    /// Wrong option
    pub const SHAKE: &str = "quiz-shake 0.5s cubic-bezier(0.36, 0.07, 0.19, 0.97)";
    /// Checkmark stroke
    pub const CHECK_DRAW: &str = "checkmark-draw 0.6s ease-out forwards";
    /// Explanation panel
    pub const EXPLANATION: &str = "quiz-slide-down 0.5s cubic-bezier(0.16, 1, 0.3, 1)";
    /// Next button
    pub const NEXT: &str = "quiz-fade-in 0.4s ease-out";
    /// Score summary
    pub const SUMMARY: &str = "quiz-slide-down 0.6s cubic-bezier(0.16, 1, 0.3, 1)";
}

/// Chevron rotation for an expanded or collapsed section
#[must_use]
pub const fn chevron_transform(collapsed: bool) -> &'static str {
    if collapsed {
        "rotate(0deg)"
    } else {
        "rotate(180deg)"
    }
}

/// Keys bound elements by their index attribute
///
/// Elements whose attribute is missing or unparsable fall back to their
/// position among `items`; the first element claiming an index wins.
pub fn key_by_index<T>(
    items: impl IntoIterator<Item = (Option<String>, T)>,
) -> BTreeMap<usize, T> {
    let mut keyed = BTreeMap::new();
    for (position, (attr, item)) in items.into_iter().enumerate() {
        let index = attr
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(position);
        keyed.entry(index).or_insert(item);
    }
    keyed
}
