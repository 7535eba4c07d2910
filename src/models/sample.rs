//! Timing sample data model
//!
//! A sample is the immutable (start, end) wall-clock bracket around one
//! invocation attempt. Samples are produced by workers during the run and
//! become a fixed [`SampleSet`] once the pool has joined; the statistics
//! engine only ever sees the completed set.

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wall-clock bracket around a single invocation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Timestamp captured immediately before the call was issued
    pub start: DateTime<Utc>,
    /// Timestamp captured immediately after the call returned
    pub end: DateTime<Utc>,
}

impl Sample {
    /// Create a sample from its wall-clock bounds.
    ///
    /// Fails if `end` precedes `start` (the wall clock stepped backwards
    /// mid-call); such attempts count as invocation failures and never
    /// enter the sample set.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(AppError::invocation(format!(
                "sample ends before it starts ({} < {})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Elapsed wall time of the attempt
    pub fn duration(&self) -> Duration {
        // Construction guarantees end >= start.
        (self.end - self.start).to_std().unwrap_or(Duration::ZERO)
    }

    /// Duration in fractional milliseconds for display
    pub fn duration_ms(&self) -> f64 {
        self.duration().as_secs_f64() * 1000.0
    }

    /// Duration in nanoseconds as a float, the domain the statistics
    /// engine computes in
    pub fn duration_ns(&self) -> f64 {
        self.duration().as_nanos() as f64
    }
}

/// The completed collection of samples from one run.
///
/// Arrival order is preserved but carries no meaning; consumers re-sort by
/// duration. The set is immutable once constructed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Wrap a merged sample sequence
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Samples sorted ascending by duration (the view both the per-sample
    /// listing and the statistics engine start from)
    pub fn sorted_by_duration(&self) -> Vec<Sample> {
        let mut sorted = self.samples.clone();
        sorted.sort_by_key(|s| s.duration());
        sorted
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
