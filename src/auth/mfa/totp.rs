//! TOTP (Time-based One-Time Password) engine for two-factor authentication.
//!
//! Implements RFC 6238 with HMAC-SHA1, 6 digits and a 30 second step, which is
//! the profile every mainstream authenticator app understands. The engine holds
//! no mutable state: time and randomness come from injected capabilities, so a
//! single instance can be shared freely across request handlers.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use qrcode::{render::svg, QrCode};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::backup_codes;
use super::base32;
use super::clock::{Clock, SystemClock};
use super::random::{OsSecureRandom, SecureRandom};

type HmacSha1 = Hmac<Sha1>;

// Constants for TOTP configuration
pub const SECRET_LENGTH: usize = 20;
pub const CODE_DIGITS: u32 = 6;
pub const TIME_STEP: i64 = 30;
pub const VALIDATION_WINDOW: i64 = 1;
pub const DEFAULT_ISSUER: &str = "AttendancePro";

#[derive(Debug, Error)]
pub enum TotpError {
    #[error("Invalid HMAC key")]
    InvalidKey,

    #[error("QR code generation error: {0}")]
    QrCodeGenerationError(String),
}

/// Generates and validates TOTP codes for one issuer
#[derive(Clone)]
pub struct TotpEngine {
    issuer: String,
    clock: Arc<dyn Clock>,
    random: Arc<dyn SecureRandom>,
}

impl fmt::Debug for TotpEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpEngine").field("issuer", &self.issuer).finish_non_exhaustive()
    }
}

impl Default for TotpEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUER)
    }
}

impl TotpEngine {
    /// Create an engine using the system clock and the OS random source
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            clock: Arc::new(SystemClock),
            random: Arc::new(OsSecureRandom),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_random(mut self, random: Arc<dyn SecureRandom>) -> Self {
        self.random = random;
        self
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Generates a new random secret, Base32 encoded
    pub fn generate_secret(&self) -> String {
        let mut bytes = [0u8; SECRET_LENGTH];
        self.random.fill(&mut bytes);
        base32::encode(&bytes)
    }

    /// Checks a submitted code against the secret at the current time.
    ///
    /// Accepts the previous, current and next time step. Every failure,
    /// including a malformed secret or empty input, is reported as `false`.
    pub fn validate_code(&self, secret: &str, code: &str) -> bool {
        self.validate_code_at(secret, code, self.clock.unix_time())
    }

    /// Same as [`validate_code`](Self::validate_code) at an explicit Unix time
    pub fn validate_code_at(&self, secret: &str, code: &str, unix_time: i64) -> bool {
        if secret.is_empty() || code.is_empty() {
            return false;
        }

        match Self::matches_window(secret, code, unix_time) {
            Ok(valid) => valid,
            Err(e) => {
                log::error!("Error validating 2FA code: {e}");
                false
            },
        }
    }

    fn matches_window(secret: &str, code: &str, unix_time: i64) -> Result<bool, TotpError> {
        let key = base32::decode(secret);
        let timestep = unix_time.div_euclid(TIME_STEP);

        for offset in -VALIDATION_WINDOW..=VALIDATION_WINDOW {
            let candidate = Self::generate_totp_code(&key, timestep + offset)?;
            if bool::from(candidate.as_bytes().ct_eq(code.as_bytes())) {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Code for the clock's current time step
    pub fn current_code(&self, secret: &str) -> Result<String, TotpError> {
        let timestep = self.clock.unix_time().div_euclid(TIME_STEP);
        Self::generate_totp_code(&base32::decode(secret), timestep)
    }

    /// RFC 4226 HOTP over the time step counter.
    ///
    /// The counter is the big-endian two's complement form of `timestep`.
    pub fn generate_totp_code(secret: &[u8], timestep: i64) -> Result<String, TotpError> {
        let mut mac = HmacSha1::new_from_slice(secret).map_err(|_| TotpError::InvalidKey)?;
        mac.update(&timestep.to_be_bytes());
        let hash = mac.finalize().into_bytes();

        // dynamic truncation
        let offset = (hash[19] & 0x0F) as usize;
        let binary = (u32::from(hash[offset] & 0x7F) << 24)
            | (u32::from(hash[offset + 1]) << 16)
            | (u32::from(hash[offset + 2]) << 8)
            | u32::from(hash[offset + 3]);

        Ok(format!(
            "{:0>width$}",
            binary % 10u32.pow(CODE_DIGITS),
            width = CODE_DIGITS as usize
        ))
    }

    /// Generates a TOTP provisioning URI for use with authenticator apps
    pub fn provisioning_uri(&self, account_email: &str, secret: &str) -> String {
        let issuer = urlencoding::encode(&self.issuer);
        format!(
            "otpauth://totp/{issuer}:{}?secret={}&issuer={issuer}",
            urlencoding::encode(account_email),
            urlencoding::encode(secret),
        )
    }

    /// Renders a URI as an SVG QR code wrapped in a data URI
    pub fn qr_code_data_uri(uri: &str) -> Result<String, TotpError> {
        let code = QrCode::new(uri).map_err(|e| TotpError::QrCodeGenerationError(e.to_string()))?;
        let svg = code
            .render::<svg::Color>()
            .min_dimensions(200, 200)
            .max_dimensions(300, 300)
            .dark_color(svg::Color("#000000"))
            .light_color(svg::Color("#ffffff"))
            .build();

        Ok(format!(
            "data:image/svg+xml;base64,{}",
            general_purpose::STANDARD.encode(svg.as_bytes())
        ))
    }

    /// Fresh set of backup codes in their stored, comma-joined form
    pub fn generate_backup_codes(&self) -> String {
        backup_codes::generate_backup_codes(self.random.as_ref())
    }
}
