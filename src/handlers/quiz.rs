// src/handlers/quiz.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use validator::Validate;

use crate::{error::AppError, models::quiz::Quiz, store::Stores, utils::extract::AppJson};

/// Lists every quiz.
pub async fn list_quizzes(State(stores): State<Arc<Stores>>) -> Result<impl IntoResponse, AppError> {
    let quizzes = stores.quizzes.load().await?;
    Ok(Json(quizzes))
}

/// Adds one quiz to the list.
pub async fn create_quiz(
    State(stores): State<Arc<Stores>>,
    AppJson(quiz): AppJson<Quiz>,
) -> Result<impl IntoResponse, AppError> {
    quiz.validate()?;

    tracing::info!("Saving quiz '{}' ({} questions)", quiz.title, quiz.questions.len());
    stores.quizzes.append(quiz).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": "Quiz saved!" })),
    ))
}

/// Replaces the whole quiz list (teacher editor bulk save).
///
/// The body must be a JSON array; anything else is rejected before the file
/// is touched.
pub async fn replace_quizzes(
    State(stores): State<Arc<Stores>>,
    AppJson(body): AppJson<Value>,
) -> Result<impl IntoResponse, AppError> {
    if !body.is_array() {
        return Err(AppError::BadRequest(
            "Invalid data format: expected an array of quizzes".to_string(),
        ));
    }

    let quizzes: Vec<Quiz> = serde_json::from_value(body)?;
    for quiz in &quizzes {
        quiz.validate()?;
    }

    let count = quizzes.len();
    stores.quizzes.replace(quizzes).await?;
    tracing::info!("Quiz list replaced ({} quizzes)", count);

    Ok(Json(json!({ "success": true, "message": "Quiz list updated." })))
}
