// src/handlers/attendance.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;
use tokio::fs;
use validator::Validate;

use crate::{
    error::AppError,
    models::attendance::{
        AttendanceRecord, QrTokenResponse, SubmitAttendanceRequest, UpdateQrRequest,
    },
    state::AppState,
    store::Stores,
    utils::{
        clock,
        data_uri::decode_data_uri,
        extract::AppJson,
        geo::Coordinate,
        qr_token::QrTokenRotator,
    },
};

/// A submission that passed the presence and coordinate checks.
#[derive(Debug)]
struct Submission {
    qr_token: String,
    face_data: String,
    position: Coordinate,
}

/// Presence and range checks. Runs before any file I/O.
fn validate_submission(req: SubmitAttendanceRequest) -> Result<Submission, AppError> {
    let qr_token = req.qr_token.filter(|t| !t.is_empty());
    let face_data = req.face_data.filter(|f| !f.is_empty());

    let (Some(qr_token), Some(face_data)) = (qr_token, face_data) else {
        return Err(AppError::BadRequest("Missing QR or face data.".to_string()));
    };

    let position = match (req.latitude, req.longitude) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid coordinates [{lat}, {lon}]."))
        })?,
        _ => return Err(AppError::BadRequest("Missing location data.".to_string())),
    };

    Ok(Submission {
        qr_token,
        face_data,
        position,
    })
}

/// Returns the QR token currently shown on the teacher screen.
pub async fn get_latest_qr(State(qr): State<Arc<QrTokenRotator>>) -> impl IntoResponse {
    Json(QrTokenResponse {
        token: qr.current_token(),
    })
}

/// Overrides the current QR token (teacher screen).
pub async fn update_qr(
    State(qr): State<Arc<QrTokenRotator>>,
    AppJson(payload): AppJson<UpdateQrRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    qr.set_token(payload.token);
    tracing::info!("QR token overridden manually");

    Ok(Json(json!({ "success": true })))
}

/// Marks attendance for one student.
///
/// * Checks required fields and coordinates.
/// * Compares the scanned token with the current one.
/// * Checks the position against the campus geofence.
/// * Stores the face capture under the uploads directory and appends a record.
///
/// The image write and the record append are not atomic: a crash in between
/// leaves an orphan image.
pub async fn submit_attendance(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SubmitAttendanceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let submission = validate_submission(payload)?;

    if submission.qr_token != state.qr.current_token() {
        tracing::warn!("Attendance rejected: stale or unknown QR token");
        return Err(AppError::TokenMismatch);
    }

    let geofence = &state.config.geofence;
    if !geofence.contains(submission.position) {
        let distance_m = geofence.distance_to(submission.position);
        tracing::warn!(
            distance_m,
            radius_m = geofence.radius_m,
            "Attendance rejected: outside geofence"
        );
        return Err(AppError::OutsideGeofence { distance_m });
    }

    let image = decode_data_uri(&submission.face_data)?;

    let file_name = format!("face_{}.jpg", clock::unique_millis());
    let save_path = state.config.uploads_dir.join(&file_name);
    fs::write(&save_path, &image).await.map_err(|e| {
        tracing::error!("Failed to write {}: {:?}", save_path.display(), e);
        AppError::from(e)
    })?;

    let record = AttendanceRecord {
        image_path: format!("/uploads/{file_name}"),
        qr_token: submission.qr_token,
        latitude: submission.position.latitude,
        longitude: submission.position.longitude,
        timestamp: clock::local_timestamp(),
    };

    state.stores.attendance.append(record).await?;

    tracing::info!(
        "Attendance marked: {} from [{}, {}]",
        file_name,
        submission.position.latitude,
        submission.position.longitude
    );

    Ok(Json(json!({
        "success": true,
        "message": "Attendance marked successfully!"
    })))
}

/// Lists every attendance record (teacher view).
pub async fn list_records(State(stores): State<Arc<Stores>>) -> Result<impl IntoResponse, AppError> {
    let records = stores.attendance.load().await?;
    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SubmitAttendanceRequest {
        SubmitAttendanceRequest {
            qr_token: Some("abcd1234".to_string()),
            face_data: Some("data:image/jpeg;base64,aGVsbG8=".to_string()),
            latitude: Some(17.2986622),
            longitude: Some(78.5173568),
        }
    }

    #[test]
    fn complete_submission_passes() {
        let submission = validate_submission(request()).unwrap();
        assert_eq!(submission.qr_token, "abcd1234");
        assert_eq!(submission.position, Coordinate::campus());
    }

    #[test]
    fn missing_face_data_is_rejected() {
        let req = SubmitAttendanceRequest {
            face_data: None,
            ..request()
        };
        assert!(matches!(validate_submission(req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn empty_token_is_rejected() {
        let req = SubmitAttendanceRequest {
            qr_token: Some(String::new()),
            ..request()
        };
        assert!(matches!(validate_submission(req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn missing_coordinates_are_not_treated_as_zero() {
        let req = SubmitAttendanceRequest {
            longitude: None,
            ..request()
        };
        assert!(matches!(validate_submission(req), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let req = SubmitAttendanceRequest {
            latitude: Some(123.0),
            ..request()
        };
        assert!(matches!(validate_submission(req), Err(AppError::BadRequest(_))));
    }
}
