//! Data Transfer Objects for two-factor authentication
//!
//! Contains request and response structures for the 2FA endpoints

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::backup_codes::split_backup_codes;
use super::service::TwoFactorSetup;

/// Request naming only the user
#[derive(Debug, Deserialize)]
pub struct TwoFactorUserRequest {
    pub user_id: Uuid,
}

/// Request carrying a code typed by the user
#[derive(Debug, Deserialize)]
pub struct TwoFactorCodeRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub code: Option<String>,
}

impl TwoFactorCodeRequest {
    /// The submitted code, empty when missing
    pub fn code(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }
}

/// TOTP setup response
#[derive(Debug, Serialize)]
pub struct TotpSetupResponse {
    pub secret: String,
    pub qr_code_url: String,
    pub qr_code: String,
}

impl From<TwoFactorSetup> for TotpSetupResponse {
    fn from(setup: TwoFactorSetup) -> Self {
        Self {
            secret: setup.secret,
            qr_code_url: setup.provisioning_uri,
            qr_code: setup.qr_code,
        }
    }
}

/// Result of a code check
#[derive(Debug, Serialize)]
pub struct CodeValidationResponse {
    pub valid: bool,
}

/// State change response for enable/disable
#[derive(Debug, Serialize)]
pub struct TwoFactorStateResponse {
    pub two_factor_enabled: bool,
}

/// Backup codes response
#[derive(Debug, Serialize)]
pub struct BackupCodesResponse {
    /// Comma-joined form for storage
    pub backup_codes: String,
    pub codes: Vec<String>,
}

impl BackupCodesResponse {
    pub fn from_stored(stored: String) -> Self {
        Self {
            codes: split_backup_codes(&stored),
            backup_codes: stored,
        }
    }
}
