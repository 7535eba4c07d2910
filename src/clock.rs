//! Wall-clock abstraction so timing can be driven deterministically in tests

use chrono::{DateTime, Utc};

/// Source of wall-clock timestamps for sample capture
pub trait Clock: Send + Sync {
    /// Current wall-clock time
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Deterministic clock that advances a fixed step per call.
///
/// Safe for concurrent use; each call claims the next tick, so timestamps
/// are unique and reproducible across worker threads. A negative step makes
/// the clock run backwards, which tests use to exercise the rejected
/// end-before-start case.
#[cfg(test)]
pub struct ManualClock {
    base: DateTime<Utc>,
    step: chrono::Duration,
    ticks: std::sync::atomic::AtomicI64,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(base: DateTime<Utc>, step: chrono::Duration) -> Self {
        Self {
            base,
            step,
            ticks: std::sync::atomic::AtomicI64::new(0),
        }
    }

    /// Clock frozen at a single instant
    pub fn fixed(base: DateTime<Utc>) -> Self {
        Self::new(base, chrono::Duration::zero())
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.base + self.step * (tick as i32)
    }
}
