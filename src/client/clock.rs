//! Time source for cache and block expiry checks
//!
//! Expiry is always a lazy comparison against `now_millis()`; nothing is
//! scheduled. Tests inject a [`ManualClock`] to step time deterministically.

use chrono::{DateTime, Utc};

/// Source of wall-clock time in Unix epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Convert epoch millis into a `DateTime<Utc>` for display.
pub fn to_datetime(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Manually advanced clock for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: std::sync::atomic::AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now
            .fetch_add(millis, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(std::sync::atomic::Ordering::SeqCst)
    }
}
