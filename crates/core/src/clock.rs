//! # Clock Module
//!
//! Time source capability injected into the identifier generator.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, OnceLock};

static SHARED_SYSTEM_CLOCK: OnceLock<Arc<SystemClock>> = OnceLock::new();

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock clamped to be non-decreasing for the lifetime of the value.
/// [`SystemClock::shared`] is the one instance for the whole process.
///
/// Timestamps are kept at second granularity, which is all the account
/// number prefix uses. If the system clock steps backwards the last
/// observed second is returned until real time catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_second: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide clock, so the clamp holds across every generator that
    /// uses it
    pub fn shared() -> Arc<SystemClock> {
        SHARED_SYSTEM_CLOCK
            .get_or_init(|| Arc::new(SystemClock::new()))
            .clone()
    }

    fn clamp(&self, observed: i64) -> i64 {
        let previous = self.last_second.fetch_max(observed, Ordering::AcqRel);
        previous.max(observed)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        let second = self.clamp(Utc::now().timestamp());
        Utc.timestamp_opt(second, 0).single().unwrap_or_else(Utc::now)
    }
}

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
