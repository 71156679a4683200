//! Two-factor lifecycle for user accounts.
//!
//! Wraps [`TotpEngine`] with the user repository: pending setup, confirmation,
//! login-time verification, and the enable/disable writes. Enable and disable
//! report plain booleans; store failures are logged here and never reach the
//! caller.
//!
//! Every read-modify-write of a user record runs under that user's lock, so a
//! setup can never overwrite a confirmation that landed between its read and
//! its write.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use super::totp::TotpEngine;
use super::MfaError;
use crate::user::models::User;
use crate::user::repository::UserRepository;

type UserLocks = Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>;

/// Material returned to the client when two-factor setup starts
#[derive(Debug, Clone, Serialize)]
pub struct TwoFactorSetup {
    pub secret: String,
    pub provisioning_uri: String,
    pub qr_code: String,
}

/// Two-factor state of a user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TwoFactorStatus {
    pub two_factor_enabled: bool,
    pub has_pending_secret: bool,
}

/// Service for handling TOTP-based two-factor operations
#[derive(Clone)]
pub struct TwoFactorService {
    repository: Arc<dyn UserRepository>,
    engine: TotpEngine,
    user_locks: UserLocks,
}

impl TwoFactorService {
    pub fn new(repository: Arc<dyn UserRepository>, engine: TotpEngine) -> Self {
        Self {
            repository,
            engine,
            user_locks: UserLocks::default(),
        }
    }

    pub fn engine(&self) -> &TotpEngine {
        &self.engine
    }

    pub fn generate_secret(&self) -> String {
        self.engine.generate_secret()
    }

    pub fn validate_code(&self, secret: &str, code: &str) -> bool {
        self.engine.validate_code(secret, code)
    }

    pub fn provisioning_uri(&self, email: &str, secret: &str) -> String {
        self.engine.provisioning_uri(email, secret)
    }

    /// Marks two-factor enabled with the given secret.
    ///
    /// Returns `false` without writing anything when the user doesn't exist or
    /// the secret is empty, and `false` when the store rejects the write.
    pub async fn enable_two_factor(&self, user_id: Uuid, secret: &str) -> bool {
        if secret.is_empty() {
            log::warn!("Refusing to enable 2FA for user {user_id} without a secret");
            return false;
        }

        let enabled = self.write_user(user_id, "enabling", |user| user.enable_two_factor(secret)).await;
        if enabled {
            log::info!("2FA enabled for user {user_id}");
        }
        enabled
    }

    /// Clears the secret and the enabled flag
    pub async fn disable_two_factor(&self, user_id: Uuid) -> bool {
        let disabled = self.write_user(user_id, "disabling", User::disable_two_factor).await;
        if disabled {
            log::info!("2FA disabled for user {user_id}");
        }
        disabled
    }

    async fn write_user<F>(&self, user_id: Uuid, action: &str, apply: F) -> bool
    where
        F: FnOnce(&mut User),
    {
        let _guard = self.lock_user(user_id).await;

        let mut user = match self.repository.find_by_id(&user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                log::debug!("User {user_id} not found while {action} 2FA");
                return false;
            },
            Err(e) => {
                log::error!("Error {action} 2FA for user {user_id}: {e}");
                return false;
            },
        };

        apply(&mut user);

        match self.repository.update(&user).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Error {action} 2FA for user {user_id}: {e}");
                false
            },
        }
    }

    /// Starts setup: stores a fresh, unconfirmed secret on the user record
    pub async fn setup(&self, user_id: Uuid) -> Result<TwoFactorSetup, MfaError> {
        let _guard = self.lock_user(user_id).await;

        let mut user = self.load_user(user_id).await?;
        if user.two_factor_enabled {
            return Err(MfaError::AlreadyEnabled);
        }

        let secret = self.engine.generate_secret();
        let provisioning_uri = self.engine.provisioning_uri(&user.email, &secret);
        let qr_code = TotpEngine::qr_code_data_uri(&provisioning_uri)?;

        user.set_pending_secret(secret.clone());
        self.repository.update(&user).await?;
        log::debug!("Pending 2FA secret stored for user {user_id}");

        Ok(TwoFactorSetup {
            secret,
            provisioning_uri,
            qr_code,
        })
    }

    /// Confirms a pending secret with a code from the authenticator app.
    ///
    /// `Ok(false)` means the code was rejected and nothing changed.
    pub async fn confirm(&self, user_id: Uuid, code: &str) -> Result<bool, MfaError> {
        let _guard = self.lock_user(user_id).await;

        let mut user = self.load_user(user_id).await?;
        if user.two_factor_enabled {
            return Err(MfaError::AlreadyEnabled);
        }
        let secret = user.two_factor_secret.clone().ok_or(MfaError::NotSetUp)?;

        if !self.engine.validate_code(&secret, code) {
            return Ok(false);
        }

        user.enable_two_factor(secret);
        self.repository.update(&user).await?;
        log::info!("2FA enabled for user {user_id}");
        Ok(true)
    }

    /// Checks a login-time code for a user with two-factor enabled
    pub async fn verify(&self, user_id: Uuid, code: &str) -> Result<bool, MfaError> {
        let user = self.load_user(user_id).await?;
        self.verify_user(&user, code)
    }

    /// Turns two-factor off after the user proves possession with a current code
    pub async fn disable_with_code(&self, user_id: Uuid, code: &str) -> Result<bool, MfaError> {
        let _guard = self.lock_user(user_id).await;

        let mut user = self.load_user(user_id).await?;
        if !self.verify_user(&user, code)? {
            return Ok(false);
        }

        user.disable_two_factor();
        self.repository.update(&user).await?;
        log::info!("2FA disabled for user {user_id}");
        Ok(true)
    }

    /// Fresh backup codes for an existing user, in stored form
    pub async fn generate_backup_codes(&self, user_id: Uuid) -> Result<String, MfaError> {
        self.load_user(user_id).await?;
        Ok(self.engine.generate_backup_codes())
    }

    pub async fn status(&self, user_id: Uuid) -> Result<TwoFactorStatus, MfaError> {
        let user = self.load_user(user_id).await?;
        Ok(TwoFactorStatus {
            two_factor_enabled: user.two_factor_enabled,
            has_pending_secret: user.has_pending_secret(),
        })
    }

    fn verify_user(&self, user: &User, code: &str) -> Result<bool, MfaError> {
        match (user.two_factor_enabled, user.two_factor_secret.as_deref()) {
            (true, Some(secret)) => Ok(self.engine.validate_code(secret, code)),
            _ => Err(MfaError::NotEnabled),
        }
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User, MfaError> {
        self.repository.find_by_id(&user_id).await?.ok_or(MfaError::UserNotFound)
    }

    /// Holds off every other write to `user_id` until the guard is dropped
    async fn lock_user(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self.user_locks.lock().await.entry(user_id).or_default().clone();
        lock.lock_owned().await
    }
}
