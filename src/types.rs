//! Type definitions for hudur_auth
//!
//! Contains shared error types and configuration models used throughout the app.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::time::Duration;
use thiserror::Error;

use crate::auth::mfa::{MfaError, DEFAULT_ISSUER};
use crate::user::error::UserError;

/// Application startup errors
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Server binding error: {0}")]
    ServerBind(String),
}

/// Runtime API errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
    #[error("Configuration error: {message}")]
    Config {
        message: String,
    },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("User not found")]
    UserNotFound,
    #[error("Email already exists")]
    EmailAlreadyExists,
    #[error("MFA error: {0}")]
    Mfa(String),
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Internal {
                ..
            } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config {
                ..
            } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::EmailAlreadyExists => StatusCode::CONFLICT,
            ApiError::Mfa(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": self.status_code().as_u16(),
            "message": self.to_string(),
        }))
    }
}

impl From<MfaError> for ApiError {
    fn from(error: MfaError) -> Self {
        match error {
            MfaError::UserNotFound => ApiError::UserNotFound,
            MfaError::AlreadyEnabled => ApiError::Conflict(error.to_string()),
            MfaError::NotEnabled | MfaError::NotSetUp => ApiError::Mfa(error.to_string()),
            MfaError::TotpError(_) | MfaError::Storage(_) => {
                log::error!("2FA request failed: {error}");
                ApiError::Internal {
                    message: "two-factor operation failed".to_string(),
                }
            },
        }
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => ApiError::UserNotFound,
            UserError::EmailTaken => ApiError::EmailAlreadyExists,
            UserError::ValidationError(msg) => ApiError::Validation(msg),
            UserError::StorageError(msg) => ApiError::Internal {
                message: msg,
            },
        }
    }
}

/// Complete app configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub mfa: MfaConfig,
    pub cors_origins: Vec<String>,
    pub log_level: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub keep_alive: Duration,
}

/// Two-factor configuration
#[derive(Debug, Clone)]
pub struct MfaConfig {
    /// Issuer shown by authenticator apps
    pub issuer: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mfa: MfaConfig::default(),
            cors_origins: vec!["*".to_string()],
            log_level: "info".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: num_cpus::get(),
            keep_alive: Duration::from_secs(30),
        }
    }
}

impl Default for MfaConfig {
    fn default() -> Self {
        Self {
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mfa_error_mapping() {
        assert_eq!(ApiError::from(MfaError::UserNotFound), ApiError::UserNotFound);
        assert_eq!(ApiError::from(MfaError::AlreadyEnabled).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::from(MfaError::NotEnabled).status_code(), StatusCode::BAD_REQUEST);

        // storage details stay out of the response
        let error = ApiError::from(MfaError::Storage("connection reset".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.to_string().contains("connection reset"));
    }

    #[test]
    fn test_user_error_mapping() {
        assert_eq!(ApiError::from(UserError::EmailTaken), ApiError::EmailAlreadyExists);
        assert_eq!(
            ApiError::from(UserError::ValidationError("bad".to_string())),
            ApiError::Validation("bad".to_string())
        );

        // one mapping for user errors, and validation is a plain 400
        let cases = [
            (UserError::UserNotFound, StatusCode::NOT_FOUND),
            (UserError::EmailTaken, StatusCode::CONFLICT),
            (UserError::ValidationError("bad".to_string()), StatusCode::BAD_REQUEST),
            (UserError::StorageError("gone".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
    }
}
