// src/handlers/score.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::score::{CreateScoreRequest, Score, ScoreQuery},
    store::Stores,
    utils::{clock, extract::AppJson},
};

/// Lists scores, optionally only those of one student.
pub async fn list_scores(
    State(stores): State<Arc<Stores>>,
    Query(params): Query<ScoreQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut scores = stores.scores.load().await?;

    if let Some(student) = params.student {
        scores.retain(|s| s.student_username.as_deref() == Some(student.as_str()));
    }

    Ok(Json(scores))
}

/// Records a finished quiz attempt.
pub async fn create_score(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<CreateScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut extra = payload.extra;
    // Server-owned fields.
    extra.remove("id");
    extra.remove("submittedAt");

    let score = Score {
        id: clock::unique_millis(),
        student_username: payload.student_username,
        quiz_title: payload.quiz_title,
        score: payload.score.unwrap_or_default(),
        total: payload.total,
        submitted_at: clock::local_timestamp(),
        extra,
    };

    stores.scores.append(score.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Score saved!", "data": score })),
    ))
}
