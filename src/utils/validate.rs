use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ApiError;

/// Shape check only: something before the `@`, a dotted domain after it,
/// no whitespace anywhere.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

/// Trims `value` and rejects blank input with a field-named message.
pub fn required_field(name: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{name} is required")));
    }
    Ok(trimmed.to_string())
}

pub fn validate_email(value: &str) -> Result<String, ApiError> {
    let email = required_field("email", value)?;
    if !EMAIL_RE.is_match(&email) {
        return Err(ApiError::Validation(format!(
            "{email} is not a valid email address"
        )));
    }
    Ok(email)
}
