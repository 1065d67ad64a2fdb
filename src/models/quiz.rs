// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A quiz as stored in `quizzes.json` and served to the quiz page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Quiz {
    /// Subject title; the quiz page groups quizzes by it.
    #[validate(length(min = 1, max = 200, message = "Quiz title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "A quiz needs at least one question"), nested)]
    pub questions: Vec<QuizQuestion>,

    /// Fields the quiz editor sends beyond title and questions, stored as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct QuizQuestion {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,

    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,

    /// The correct option text.
    #[validate(length(min = 1, max = 500))]
    pub answer: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.is_empty() {
        return Err(validator::ValidationError::new("options_cannot_be_empty"));
    }
    for opt in options {
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}
