pub mod error;

use crate::utils::error::AppError;

/// Presence check matching the mobile client's contract: absent and
/// empty-string values are both rejected.
pub fn required<'a>(value: &'a Option<String>, message: &str) -> Result<&'a str, AppError> {
    match value.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(message.to_string())),
    }
}
