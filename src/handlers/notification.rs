// src/handlers/notification.rs

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::notification::{CreateNotificationRequest, Notification, UpdateNotificationRequest},
    store::Stores,
    utils::{
        clock,
        extract::{AppJson, AppPath},
        html::required_text,
    },
};

pub async fn list_notifications(
    State(stores): State<Arc<Stores>>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = stores.notifications.load().await?;
    Ok(Json(notifications))
}

/// Posts a new notification. Title and message are sanitized.
pub async fn create_notification(
    State(stores): State<Arc<Stores>>,
    AppJson(payload): AppJson<CreateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let title = required_text(&payload.title, "Title and message required.")?;
    let message = required_text(&payload.message, "Title and message required.")?;

    let notification = Notification {
        id: clock::unique_millis(),
        title,
        message,
    };

    stores.notifications.append(notification.clone()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Notification added.",
            "data": notification
        })),
    ))
}

/// Edits title and/or message of an existing notification.
pub async fn update_notification(
    State(stores): State<Arc<Stores>>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateNotificationRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let title = payload
        .title
        .as_deref()
        .map(|t| required_text(t, "Title cannot be empty."))
        .transpose()?;
    let message = payload
        .message
        .as_deref()
        .map(|m| required_text(m, "Message cannot be empty."))
        .transpose()?;

    let updated = stores
        .notifications
        .update(|items| {
            let notification = items
                .iter_mut()
                .find(|n| n.id == id)
                .ok_or(AppError::NotFound("Notification not found".to_string()))?;

            if let Some(title) = title {
                notification.title = title;
            }
            if let Some(message) = message {
                notification.message = message;
            }
            Ok::<_, AppError>(notification.clone())
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Notification updated.",
        "data": updated
    })))
}

/// Deletes a notification. An unknown id is a 404 and leaves the file as is.
pub async fn delete_notification(
    State(stores): State<Arc<Stores>>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    stores
        .notifications
        .update(|items| {
            let before = items.len();
            items.retain(|n| n.id != id);
            if items.len() == before {
                return Err(AppError::NotFound("Notification not found".to_string()));
            }
            Ok(())
        })
        .await?;

    Ok(Json(json!({ "success": true, "message": "Notification deleted." })))
}
