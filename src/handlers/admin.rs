// src/handlers/admin.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{CredentialsRequest, PublicUser, Role, UserCredential},
    store::Stores,
    utils::extract::{AppJson, AppPath},
};

/// Resolves the `{collection}` path segment (`students` or `teachers`).
fn role_for(collection: &str) -> Result<Role, AppError> {
    Role::from_collection(collection)
        .ok_or_else(|| AppError::NotFound(format!("Unknown user collection '{collection}'")))
}

/// Lists the usernames of a collection. Passwords are not returned.
pub async fn list_users(
    State(stores): State<Arc<Stores>>,
    AppPath(collection): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let role = role_for(&collection)?;

    let users: Vec<PublicUser> = stores
        .users(role)
        .load()
        .await?
        .into_iter()
        .map(PublicUser::from)
        .collect();

    Ok(Json(users))
}

/// Adds a student or teacher login.
pub async fn create_user(
    State(stores): State<Arc<Stores>>,
    AppPath(collection): AppPath<String>,
    AppJson(payload): AppJson<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = role_for(&collection)?;
    payload.validate()?;

    stores
        .users(role)
        .update(|users| {
            if users.iter().any(|u| u.username == payload.username) {
                return Err(AppError::Conflict(format!(
                    "Username '{}' already exists",
                    payload.username
                )));
            }
            users.push(UserCredential {
                username: payload.username.clone(),
                password: payload.password.clone(),
            });
            Ok(())
        })
        .await?;

    tracing::info!("{} '{}' added", role.label(), payload.username);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": format!("{} added.", role.label()) })),
    ))
}

/// Changes the password of an existing login.
pub async fn update_user(
    State(stores): State<Arc<Stores>>,
    AppPath(collection): AppPath<String>,
    AppJson(payload): AppJson<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let role = role_for(&collection)?;
    payload.validate()?;

    stores
        .users(role)
        .update(|users| {
            let user = users
                .iter_mut()
                .find(|u| u.username == payload.username)
                .ok_or_else(|| AppError::NotFound(format!("{} not found.", role.label())))?;
            user.password = payload.password.clone();
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("{} password updated.", role.label())
    })))
}

async fn remove_user(stores: &Stores, role: Role, username: &str) -> Result<(), AppError> {
    stores
        .users(role)
        .update(|users| {
            let before = users.len();
            users.retain(|u| u.username != username);
            if users.len() == before {
                return Err(AppError::NotFound(format!("{} not found.", role.label())));
            }
            Ok(())
        })
        .await?;

    tracing::info!("{} '{}' deleted", role.label(), username);
    Ok(())
}

fn deleted(role: Role) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "message": format!("{} deleted.", role.label()) }))
}

/// `DELETE /api/admin/{collection}/{username}`
pub async fn delete_user(
    State(stores): State<Arc<Stores>>,
    AppPath((collection, username)): AppPath<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let role = role_for(&collection)?;
    remove_user(&stores, role, &username).await?;
    Ok(deleted(role))
}

/// `DELETE /api/students/{username}`, kept for the existing admin page.
pub async fn delete_student(
    State(stores): State<Arc<Stores>>,
    AppPath(username): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    remove_user(&stores, Role::Student, &username).await?;
    Ok(deleted(Role::Student))
}

/// `DELETE /api/teachers/{username}`, kept for the existing admin page.
pub async fn delete_teacher(
    State(stores): State<Arc<Stores>>,
    AppPath(username): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    remove_user(&stores, Role::Teacher, &username).await?;
    Ok(deleted(Role::Teacher))
}
