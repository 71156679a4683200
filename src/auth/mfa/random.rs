//! Cryptographically secure randomness for secrets and backup codes.

use rand::rngs::OsRng;
use rand::RngCore;

/// Source of secure random bytes
pub trait SecureRandom: Send + Sync {
    /// Fill `dest` entirely with random bytes
    fn fill(&self, dest: &mut [u8]);
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSecureRandom;

impl SecureRandom for OsSecureRandom {
    fn fill(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}

/// Deterministic source that cycles through a fixed byte pattern.
///
/// Only meant for tests that need reproducible secrets.
#[derive(Debug, Clone)]
pub struct RepeatingRandom {
    pattern: Vec<u8>,
}

impl RepeatingRandom {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        let mut pattern = pattern.into();
        if pattern.is_empty() {
            pattern.push(0);
        }
        Self {
            pattern,
        }
    }
}

impl SecureRandom for RepeatingRandom {
    fn fill(&self, dest: &mut [u8]) {
        for (byte, value) in dest.iter_mut().zip(self.pattern.iter().cycle()) {
            *byte = *value;
        }
    }
}
