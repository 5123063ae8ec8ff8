//! Input validation helpers shared by signup and admin account creation.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Minimum password length accepted anywhere in the system.
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

/// Validate email shape (`local@domain.tld`, no whitespace).
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Please enter a valid email address".into(),
        ))
    }
}

/// Validate that a password meets the minimum length requirement.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

/// Validate that a required text field is non-empty after trimming.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}
