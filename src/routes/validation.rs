//! Hand-rolled request validation. Rules mirror what the admin panel
//! enforces client-side; the server remains the authority.

use crate::error::{AppError, FieldError};

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;

pub fn validate_login(username: &str, password: &str) -> Result<(), AppError> {
    let mut errors = Vec::new();

    let len = username.chars().count();
    if len < USERNAME_MIN || len > USERNAME_MAX {
        errors.push(FieldError::new(
            "username",
            "must be between 3 and 50 characters",
        ));
    }
    if password.chars().count() < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            "must be at least 6 characters",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(errors))
    }
}

pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::new(field, "must not be empty"))
    } else {
        Ok(())
    }
}

pub fn validate_slug(slug: &str) -> Result<(), FieldError> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(FieldError::new(
            "slug",
            "must contain only lowercase letters, digits and dashes",
        ))
    }
}

pub fn validate_email(field: &'static str, value: &str) -> Result<(), FieldError> {
    let ok = value.contains('@') && !value.starts_with('@') && !value.ends_with('@');
    if ok {
        Ok(())
    } else {
        Err(FieldError::new(field, "must be a valid email address"))
    }
}

/// Collects field checks into a single validation error.
pub fn collect(checks: Vec<Result<(), FieldError>>) -> Result<(), AppError> {
    let errors: Vec<FieldError> = checks.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(errors))
    }
}
