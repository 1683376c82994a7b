//! Time source for stamping broadcast edges.
//!
//! The scene never calls `Utc::now()` directly; it asks an injected
//! [`Clock`], so tests can pin stamps and cadence assertions stay
//! deterministic.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Provides the timestamp applied to every edge of one scene snapshot.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.  The production clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that steps forward a fixed amount on every `now()` call.
///
/// Used by tests and simulations where stamps must be reproducible.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    /// Start at `start`, advancing by `step` after each `now()` call.
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            current: Mutex::new(start),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let stamp = *current;
        *current += self.step;
        stamp
    }
}
