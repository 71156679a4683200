//! Time source used for TOTP time steps

use chrono::Utc;

/// Supplies the current Unix time in seconds
pub trait Clock: Send + Sync {
    fn unix_time(&self) -> i64;
}

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_time(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_time(&self) -> i64 {
        self.0
    }
}
