use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};
use validator::ValidationError;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::Internal(format!("failed to verify password: {}", e)))
}

/// Password policy for registration: at least 8 characters mixing an upper
/// case letter, a lower case letter, a digit and a symbol.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let mut has_upper = false;
    let mut has_lower = false;
    let mut has_digit = false;
    let mut has_special = false;

    for c in password.chars() {
        if c.is_uppercase() {
            has_upper = true;
        } else if c.is_lowercase() {
            has_lower = true;
        } else if c.is_numeric() {
            has_digit = true;
        } else if !c.is_whitespace() {
            has_special = true;
        }
    }

    if password.len() < 8 || !has_upper || !has_lower || !has_digit || !has_special {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(
            "password must be at least 8 characters and contain upper case, \
             lower case, digit and special characters"
                .into(),
        );
        return Err(error);
    }
    Ok(())
}
