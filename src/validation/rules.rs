//! Custom validation rules shared across request payloads.

use validator::ValidationError;

/// Validates username format: alphanumeric plus underscores, 1-50 chars.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.len() > 50 {
        return Err(ValidationError::new("username_invalid_length"));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(ValidationError::new("username_invalid_characters"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rejects_empty() {
        assert!(validate_username("").is_err());
    }

    #[test]
    fn username_rejects_special_chars() {
        assert!(validate_username("user@name").is_err());
    }

    #[test]
    fn username_rejects_overlong() {
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn username_accepts_valid() {
        assert!(validate_username("valid_user123").is_ok());
    }
}
