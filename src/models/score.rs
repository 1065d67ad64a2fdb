// src/models/score.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A quiz attempt result stored in `scores.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    /// Unix-millis id assigned on save.
    #[serde(default)]
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_title: Option<String>,

    #[serde(default)]
    pub score: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    #[serde(default)]
    pub submitted_at: String,

    /// Any extra fields the client sent are kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/scores`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    #[validate(length(min = 1, max = 50))]
    pub student_username: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub quiz_title: Option<String>,

    #[validate(required(message = "Score is required"), range(min = 0))]
    pub score: Option<i64>,

    #[validate(range(min = 0))]
    pub total: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query string of `GET /api/scores`.
#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    /// Only return scores of this student.
    pub student: Option<String>,
}
