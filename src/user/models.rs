//! User domain models
//!
//! The user record carries the two-factor fields the MFA service reads and writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,

    /// Base32 TOTP secret; present but unconfirmed while setup is pending
    #[serde(skip_serializing)]
    pub two_factor_secret: Option<String>,

    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user without two-factor authentication
    pub fn new(email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            two_factor_secret: None,
            two_factor_enabled: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// A secret was stored by setup but never confirmed with a code
    pub fn has_pending_secret(&self) -> bool {
        !self.two_factor_enabled && self.two_factor_secret.is_some()
    }

    /// Record the confirmed secret and turn two-factor on
    pub fn enable_two_factor(&mut self, secret: impl Into<String>) {
        self.two_factor_secret = Some(secret.into());
        self.two_factor_enabled = true;
        self.touch();
    }

    /// Store a secret awaiting confirmation
    pub fn set_pending_secret(&mut self, secret: impl Into<String>) {
        self.two_factor_secret = Some(secret.into());
        self.two_factor_enabled = false;
        self.touch();
    }

    pub fn disable_two_factor(&mut self) {
        self.two_factor_secret = None;
        self.two_factor_enabled = false;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// User summary returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            two_factor_enabled: user.two_factor_enabled,
            created_at: user.created_at,
        }
    }
}
