use ammonia;

use crate::error::AppError;

/// Cleans user-supplied text before it is persisted and shown on the
/// teacher and student dashboards.
///
/// Whitelist-based: harmless inline markup (<b>, <i>) survives while
/// <script>, <iframe> and event-handler attributes are stripped. Surrounding
/// whitespace is trimmed first.
pub fn clean_text(input: &str) -> String {
    ammonia::clean(input.trim())
}

/// [`clean_text`] for a required field: input that sanitizes to nothing
/// (only markup or whitespace) is rejected with `message`.
pub fn required_text(input: &str, message: &str) -> Result<String, AppError> {
    let cleaned = clean_text(input);
    if cleaned.is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts() {
        assert_eq!(
            clean_text("Exam moved <script>alert(1)</script>to Friday"),
            "Exam moved to Friday"
        );
    }

    #[test]
    fn keeps_plain_text() {
        assert_eq!(clean_text("  Holiday on Monday "), "Holiday on Monday");
    }

    #[test]
    fn markup_only_required_text_is_rejected() {
        assert!(matches!(
            required_text("<script>x</script>", "Title required"),
            Err(AppError::BadRequest(msg)) if msg == "Title required"
        ));
        assert!(required_text("   ", "Title required").is_err());
        assert_eq!(required_text(" <b>Quiz</b> ", "Title required").unwrap(), "<b>Quiz</b>");
    }
}
