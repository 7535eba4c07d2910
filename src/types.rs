//! Type definitions and aliases

use std::time::Duration;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Performance classification based on observed latency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceLevel {
    /// Good latency (< 100 milliseconds)
    Good,
    /// Moderate latency (100 milliseconds to 1 second)
    Moderate,
    /// Poor latency (> 1 second)
    Poor,
}

impl PerformanceLevel {
    /// Classify performance based on a single latency value
    pub fn from_duration(duration: Duration) -> Self {
        let millis = duration.as_secs_f64() * 1000.0;
        if millis < 100.0 {
            Self::Good
        } else if millis < 1000.0 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }
}

/// Outcome classification for an issued invocation.
///
/// Attempts where the request never went out produce no outcome to
/// classify; they are counted separately by the run summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvocationStatus {
    /// Invocation returned a success status code
    Success,
    /// Invocation was issued but failed (error status or transport failure)
    Failed,
}
