use crate::error::AppError;

/// Reject a required string field that is empty or whitespace only.
pub fn require_non_blank(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(message));
    }
    Ok(())
}
