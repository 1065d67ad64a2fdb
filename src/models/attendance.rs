// src/models/attendance.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One accepted attendance submission, as stored in `attendance.json`.
/// Records are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Public URL of the stored face capture, e.g. `/uploads/face_1700000000000.jpg`.
    pub image_path: String,
    pub qr_token: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable local time of the submission.
    pub timestamp: String,
}

/// Raw body of `POST /submit-attendance`.
///
/// Every field is optional at the serde level so that a missing field is
/// reported as a validation failure instead of a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttendanceRequest {
    pub qr_token: Option<String>,
    /// Face capture as a data URI (`data:image/jpeg;base64,...`).
    pub face_data: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Body of `POST /update-qr`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQrRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "Token is required"))]
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct QrTokenResponse {
    pub token: String,
}
