// src/utils/time.rs
//! Time provider abstraction.
//!
//! Readings carry epoch-millisecond timestamps; everything that needs "now"
//! goes through [`TimeProvider`] so tests can pin the clock.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const MILLIS_PER_HOUR: u64 = 3_600_000;

/// Time provider trait for dependency injection and testing.
pub trait TimeProvider: Send + Sync {
    /// Current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}

/// System time provider using the actual wall clock.
#[derive(Debug, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> u64 {
        current_timestamp_millis()
    }
}

/// Mock time provider for deterministic testing.
#[derive(Debug)]
pub struct MockTimeProvider {
    current: AtomicU64,
}

impl MockTimeProvider {
    /// Create a provider frozen at the given epoch-millisecond instant.
    pub fn new(initial_millis: u64) -> Self {
        Self {
            current: AtomicU64::new(initial_millis),
        }
    }

    /// Advance the mock clock.
    pub fn advance_by(&self, millis: u64) {
        self.current.fetch_add(millis, Ordering::Relaxed);
    }

    /// Jump the mock clock to an absolute instant.
    pub fn set_time(&self, millis: u64) {
        self.current.store(millis, Ordering::Relaxed);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_millis(&self) -> u64 {
        self.current.load(Ordering::Relaxed)
    }
}

/// Milliseconds since the Unix epoch from the system clock.
pub fn current_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// UTC hour of day (0..=23) for an epoch-millisecond timestamp.
pub fn hour_of_day(timestamp_millis: u64) -> u32 {
    ((timestamp_millis / MILLIS_PER_HOUR) % 24) as u32
}
