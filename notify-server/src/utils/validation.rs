//! Input validation helpers
//!
//! Text length limits and required-field checks for staff commands. All
//! checks run before any collaborator is called.

use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Display names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum password length accepted by the identity store
pub const MIN_PASSWORD_LEN: usize = 6;

/// Opaque ids and role names
pub const MAX_ID_LEN: usize = 128;

/// Device push tokens
pub const MAX_TOKEN_LEN: usize = 4096;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is present, non-empty and within the length limit.
pub fn require_text<'a>(
    value: Option<&'a str>,
    field: &str,
    max_len: usize,
) -> Result<&'a str, AppError> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(AppError::required_field(field)),
    };
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(value)
}

/// Validate a password: required and within the accepted length range.
pub fn require_password<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    let value = require_text(value, field, MAX_PASSWORD_LEN)?;
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "{field} must be at least {MIN_PASSWORD_LEN} characters"
        ))
        .with_detail("field", field));
    }
    Ok(value)
}

/// Validate an email address shape (one `@` with non-empty sides).
pub fn require_email<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    let value = require_text(value, field, MAX_EMAIL_LEN)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(value)
        }
        _ => Err(AppError::validation(format!("{field} is not a valid email address"))
            .with_detail("field", field)),
    }
}
