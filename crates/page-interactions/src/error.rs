//! Result and error types for page interactions.
//!
//! Every failure in this crate is local and recoverable. Entry points that
//! must stay silent (quiz initialization, media playback) log these errors
//! through `tracing` instead of returning them.

use thiserror::Error;

/// Result type for page interaction operations
pub type InteractionResult<T> = Result<T, InteractionError>;

/// Errors that can occur while wiring or driving page interactions
#[derive(Debug, Error)]
pub enum InteractionError {
    /// No content source has been provided to the engine
    #[error("Material not available for quiz")]
    ContentUnavailable,

    /// The content source has no quiz with this identifier
    #[error("No quiz data found for {quiz_id}")]
    QuizNotFound {
        /// Requested quiz identifier
        quiz_id: String,
    },

    /// The quiz exists but has no questions
    #[error("Quiz {quiz_id} has no questions")]
    EmptyQuiz {
        /// Quiz identifier
        quiz_id: String,
    },

    /// A question's correct answer does not address one of its options
    #[error("Quiz {quiz_id} question {question}: answer {answer} is outside {options} options")]
    AnswerOutOfRange {
        /// Quiz identifier
        quiz_id: String,
        /// Zero-based question index
        question: usize,
        /// Declared answer index
        answer: usize,
        /// Number of options on the question
        options: usize,
    },

    /// The page has no container for this quiz
    #[error("No container found for quiz {quiz_id}")]
    ContainerNotFound {
        /// Quiz identifier
        quiz_id: String,
    },

    /// Material JSON could not be parsed
    #[error("Invalid material JSON: {0}")]
    MaterialJson(#[from] serde_json::Error),

    /// Configuration was rejected
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// The media element refused to start playback
    #[error("Playback failed: {message}")]
    Playback {
        /// Error message reported by the media element
        message: String,
    },
}

impl InteractionError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a playback error
    #[must_use]
    pub fn playback(message: impl Into<String>) -> Self {
        Self::Playback {
            message: message.into(),
        }
    }

    /// Whether this error means "precondition not met" during initialization
    #[must_use]
    pub const fn is_init_precondition(&self) -> bool {
        matches!(
            self,
            Self::ContentUnavailable
                | Self::QuizNotFound { .. }
                | Self::EmptyQuiz { .. }
                | Self::AnswerOutOfRange { .. }
                | Self::ContainerNotFound { .. }
        )
    }
}
