//! User Data Transfer Objects

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use super::error::UserError;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

/// User registration request
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
}

impl RegisterUserRequest {
    /// Trimmed email, rejected when it doesn't look like an address
    pub fn validated_email(&self) -> Result<&str, UserError> {
        let email = self.email.trim();
        if EMAIL_REGEX.is_match(email) {
            Ok(email)
        } else {
            Err(UserError::ValidationError(format!("email: invalid address '{email}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            email: email.to_string(),
        }
    }

    #[test]
    fn test_email_validation() {
        assert_eq!(request(" jane.doe@example.com ").validated_email().unwrap(), "jane.doe@example.com");
        assert!(request("jane").validated_email().is_err());
        assert!(request("jane@localhost").validated_email().is_err());
        assert!(request("").validated_email().is_err());
    }
}
