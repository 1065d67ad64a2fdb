use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::AppError;

/// Decodes the base64 payload of a data URI such as
/// `data:image/jpeg;base64,/9j/4AAQ...`.
///
/// Everything after the first comma is treated as the payload.
pub fn decode_data_uri(data_uri: &str) -> Result<Vec<u8>, AppError> {
    let (_, payload) = data_uri
        .split_once(',')
        .ok_or_else(|| AppError::BadRequest("Face data must be a data URI".to_string()))?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| AppError::BadRequest(format!("Face data is not valid base64: {e}")))?;

    if bytes.is_empty() {
        return Err(AppError::BadRequest("Face data is empty".to_string()));
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_payload_after_first_comma() {
        let bytes = decode_data_uri("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn rejects_missing_comma() {
        assert!(matches!(
            decode_data_uri("aGVsbG8="),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert!(matches!(
            decode_data_uri("data:image/jpeg;base64,@@@"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(
            decode_data_uri("data:image/jpeg;base64,"),
            Err(AppError::BadRequest(_))
        ));
    }
}
