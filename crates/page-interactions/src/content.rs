//! Quiz content supplied by the section renderer.
//!
//! The renderer publishes one "material" document whose `index` maps section
//! identifiers to section data. Only entries carrying a `questions` list are
//! quizzes; everything else in the index belongs to other section kinds and
//! is skipped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{InteractionError, InteractionResult};

/// A single multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question text
    #[serde(default, alias = "question")]
    pub prompt: String,
    /// Selectable choices, addressed by zero-based index
    pub options: Vec<String>,
    /// Zero-based index of the correct option
    pub answer: usize,
    /// Optional explanation shown after answering
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Question {
    /// Creates a question
    #[must_use]
    pub fn new(prompt: &str, options: &[&str], answer: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| (*o).to_string()).collect(),
            answer,
            explanation: None,
        }
    }

    /// Attaches an explanation
    #[must_use]
    pub fn with_explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }

    /// Whether `option` is the correct choice
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.answer
    }
}

/// Content of one quiz section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizContent {
    /// Section heading
    #[serde(default)]
    pub title: Option<String>,
    /// Ordered questions
    pub questions: Vec<Question>,
    /// Initial collapsed state; absent means collapsed
    #[serde(default)]
    pub collapsed: Option<bool>,
}

impl QuizContent {
    /// Creates quiz content from questions
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            title: None,
            questions,
            collapsed: None,
        }
    }

    /// Sets the initial collapsed flag
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Sets the title
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Quizzes start collapsed unless the content explicitly opts out
    #[must_use]
    pub fn starts_collapsed(&self) -> bool {
        self.collapsed != Some(false)
    }

    /// Number of questions
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether there are no questions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Checks that the quiz can be played
    pub fn validate(&self, quiz_id: &str) -> InteractionResult<()> {
        if self.questions.is_empty() {
            return Err(InteractionError::EmptyQuiz {
                quiz_id: quiz_id.to_string(),
            });
        }
        for (index, question) in self.questions.iter().enumerate() {
            if question.answer >= question.options.len() {
                return Err(InteractionError::AnswerOutOfRange {
                    quiz_id: quiz_id.to_string(),
                    question: index,
                    answer: question.answer,
                    options: question.options.len(),
                });
            }
        }
        Ok(())
    }
}

/// Lookup of quiz content by identifier
pub trait ContentSource {
    /// Returns the content for `quiz_id`, or `None` if there is none
    fn quiz(&self, quiz_id: &str) -> Option<&QuizContent>;
}

/// Raw material document as published by the section renderer
#[derive(Debug, Deserialize)]
struct RawMaterial {
    #[serde(default)]
    index: HashMap<String, serde_json::Value>,
}

/// Quiz content extracted from a material document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Material {
    quizzes: HashMap<String, QuizContent>,
}

impl Material {
    /// Creates empty material
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quiz
    #[must_use]
    pub fn with_quiz(mut self, quiz_id: &str, content: QuizContent) -> Self {
        self.insert(quiz_id, content);
        self
    }

    /// Inserts or replaces a quiz
    pub fn insert(&mut self, quiz_id: &str, content: QuizContent) {
        self.quizzes.insert(quiz_id.to_string(), content);
    }

    /// Parses the renderer's material JSON
    ///
    /// Index entries that are not quizzes are ignored.
    pub fn from_json(json: &str) -> InteractionResult<Self> {
        let raw: RawMaterial = serde_json::from_str(json)?;
        let mut quizzes = HashMap::new();
        for (id, value) in raw.index {
            if value.get("questions").is_none() {
                continue;
            }
            match serde_json::from_value::<QuizContent>(value) {
                Ok(content) => {
                    quizzes.insert(id, content);
                }
                Err(e) => {
                    tracing::warn!(quiz_id = %id, error = %e, "skipping malformed quiz entry");
                }
            }
        }
        Ok(Self { quizzes })
    }

    /// Quiz identifiers present in the material
    pub fn quiz_ids(&self) -> impl Iterator<Item = &str> {
        self.quizzes.keys().map(String::as_str)
    }

    /// Number of quizzes
    #[must_use]
    pub fn len(&self) -> usize {
        self.quizzes.len()
    }

    /// Whether the material has no quizzes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quizzes.is_empty()
    }
}

impl ContentSource for Material {
    fn quiz(&self, quiz_id: &str) -> Option<&QuizContent> {
        self.quizzes.get(quiz_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATERIAL: &str = r#"{
        "hero": {"title": "Welcome"},
        "index": {
            "overview": {"kind": "text", "body": "..."},
            "quiz-basics": {
                "title": "Basics",
                "collapsed": false,
                "questions": [
                    {"question": "Pick one", "options": ["a", "b"], "answer": 1,
                     "explanation": "b is right"},
                    {"prompt": "Pick again", "options": ["x", "y", "z"], "answer": 0}
                ]
            },
            "quiz-broken": {"questions": "nope"}
        }
    }"#;

    #[test]
    fn test_question_is_correct() {
        let q = Question::new("?", &["a", "b"], 1);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_material_from_json_keeps_only_quizzes() {
        let material = Material::from_json(MATERIAL).unwrap();
        assert_eq!(material.len(), 1);
        let quiz = material.quiz("quiz-basics").unwrap();
        assert_eq!(quiz.len(), 2);
        assert_eq!(quiz.questions[0].prompt, "Pick one");
        assert_eq!(quiz.questions[0].explanation.as_deref(), Some("b is right"));
        assert_eq!(quiz.questions[1].explanation, None);
        assert!(!quiz.starts_collapsed());
        assert!(material.quiz("overview").is_none());
        assert!(material.quiz("quiz-broken").is_none());
    }

    #[test]
    fn test_material_without_index() {
        let material = Material::from_json("{}").unwrap();
        assert!(material.is_empty());
    }

    #[test]
    fn test_material_invalid_json() {
        assert!(matches!(
            Material::from_json("[1,"),
            Err(InteractionError::MaterialJson(_))
        ));
    }

    #[test]
    fn test_starts_collapsed_defaults() {
        let content = QuizContent::new(vec![Question::new("?", &["a"], 0)]);
        assert!(content.starts_collapsed());
        assert!(content.clone().with_collapsed(true).starts_collapsed());
        assert!(!content.with_collapsed(false).starts_collapsed());
    }

    #[test]
    fn test_validate_empty() {
        let content = QuizContent::new(Vec::new());
        assert!(matches!(
            content.validate("q"),
            Err(InteractionError::EmptyQuiz { .. })
        ));
    }

    #[test]
    fn test_validate_answer_out_of_range() {
        let content = QuizContent::new(vec![
            Question::new("ok", &["a", "b"], 1),
            Question::new("bad", &["a", "b"], 2),
        ]);
        assert!(matches!(
            content.validate("q"),
            Err(InteractionError::AnswerOutOfRange {
                question: 1,
                answer: 2,
                options: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_material_builder() {
        let material = Material::new().with_quiz(
            "q1",
            QuizContent::new(vec![Question::new("?", &["a"], 0)]).with_title("One"),
        );
        assert_eq!(material.quiz_ids().collect::<Vec<_>>(), vec!["q1"]);
        assert_eq!(material.quiz("q1").unwrap().title.as_deref(), Some("One"));
    }
}
