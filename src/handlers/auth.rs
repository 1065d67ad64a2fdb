// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::{Value, json};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{CredentialsRequest, Role},
    store::Stores,
    utils::extract::AppJson,
};

/// Checks a username/password pair against the role's credential file.
///
/// Success only; no session or token is issued. Clients re-send
/// credentials or gate their own pages.
async fn login(
    stores: &Stores,
    role: Role,
    payload: CredentialsRequest,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let users = stores.users(role).load().await?;
    let found = users
        .iter()
        .any(|u| u.matches(&payload.username, &payload.password));

    if !found {
        tracing::warn!("Failed {} login for '{}'", role.as_str(), payload.username);
        return Err(AppError::AuthError("Invalid credentials".to_string()));
    }

    tracing::info!("{} '{}' logged in", role.label(), payload.username);
    Ok(Json(json!({ "success": true, "role": role.as_str() })))
}

pub async fn login_teacher(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    login(&stores, Role::Teacher, payload).await
}

pub async fn login_student(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    login(&stores, Role::Student, payload).await
}
