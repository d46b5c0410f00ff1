//! Injectable wall-clock source.
//!
//! Every "now" the engines read comes through [`Clock`], so day-boundary and
//! streak-gap arithmetic stays deterministic under test. Production callers
//! use [`SystemClock`]; tests pin time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Host system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Create a fixed clock at the given instant.
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Move the pinned instant forward.
    pub fn advance(&mut self, duration: chrono::Duration) {
        self.0 += duration;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
