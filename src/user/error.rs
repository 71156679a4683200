//! User-related error types
//!
//! HTTP status mapping lives in `From<UserError> for ApiError`.

use thiserror::Error;

/// User-specific errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email already in use")]
    EmailTaken,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
