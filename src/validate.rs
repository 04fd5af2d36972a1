use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub fn username(value: &str) -> Result<(), AppError> {
    if value.is_empty() || value.len() > 50 {
        return Err(AppError::BadRequest(
            "Username must be between 1 and 50 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), AppError> {
    if value.is_empty() || value.len() > 100 || !EMAIL_RE.is_match(value) {
        return Err(AppError::BadRequest(
            "A valid email address is required".to_string(),
        ));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), AppError> {
    if value.len() < 8 {
        return Err(AppError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    if value.len() > 100 {
        return Err(AppError::BadRequest(
            "Password must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn display_name(field: &str, value: &str) -> Result<(), AppError> {
    if value.is_empty() || value.len() > 50 {
        return Err(AppError::BadRequest(format!(
            "{field} must be between 1 and 50 characters"
        )));
    }
    Ok(())
}
