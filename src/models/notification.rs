// src/models/notification.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A notice posted by a teacher, stored in `notifications.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unix-millis id assigned on creation.
    pub id: i64,
    pub title: String,
    pub message: String,
}

/// DTO for posting a notification.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateNotificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Title and message required."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000, message = "Title and message required."))]
    pub message: String,
}

/// DTO for editing a notification. Absent fields keep their value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateNotificationRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub message: Option<String>,
}
