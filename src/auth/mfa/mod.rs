//! Multi-Factor Authentication module.
//!
//! Provides TOTP two-factor authentication for user accounts:
//! - Base32 codec for shared secrets
//! - RFC 6238 code generation and validation
//! - Backup codes for account recovery
//! - Enable/disable lifecycle against the user repository

pub mod backup_codes;
pub mod base32;
pub mod clock;
pub mod dto;
pub mod random;
pub mod service;
pub mod totp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use random::{OsSecureRandom, SecureRandom};
pub use service::{TwoFactorService, TwoFactorSetup, TwoFactorStatus};
pub use totp::{TotpEngine, TotpError, DEFAULT_ISSUER};

use crate::user::error::UserError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MfaError {
    #[error("TOTP error: {0}")]
    TotpError(#[from] TotpError),

    #[error("User not found")]
    UserNotFound,

    #[error("2FA not enabled for user")]
    NotEnabled,

    #[error("2FA already enabled for user")]
    AlreadyEnabled,

    #[error("2FA setup has not been started for user")]
    NotSetUp,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<UserError> for MfaError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::UserNotFound => MfaError::UserNotFound,
            other => MfaError::Storage(other.to_string()),
        }
    }
}
