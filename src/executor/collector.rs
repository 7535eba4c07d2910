//! Concurrent sample collection with per-worker buffers
//!
//! Each worker owns a dedicated slot, so recording during the run never
//! contends across threads. The slots are merged into a single sequence
//! only after the pool has joined, which is what makes the drained view
//! safe to hand to the statistics engine.

use crate::models::Sample;
use std::sync::Mutex;

/// Collector shared by all workers for the duration of one run.
///
/// Slot `i` belongs to worker `i`. Recording into distinct slots is
/// lock-free with respect to other workers; draining locks each slot once
/// and moves the samples out in worker order.
pub struct SampleCollector {
    slots: Vec<Mutex<Vec<Sample>>>,
}

impl SampleCollector {
    /// Create a collector with one slot per worker, each pre-sized for the
    /// worker's share of the run
    pub fn new(worker_count: usize, per_worker_capacity: usize) -> Self {
        let slots = (0..worker_count)
            .map(|_| Mutex::new(Vec::with_capacity(per_worker_capacity)))
            .collect();
        Self { slots }
    }

    /// Number of worker slots
    pub fn worker_count(&self) -> usize {
        self.slots.len()
    }

    /// Record a sample into the given worker's slot.
    ///
    /// An index outside the slot range is ignored; workers only ever hold
    /// indices the pool assigned at spawn time.
    pub fn record(&self, worker_index: usize, sample: Sample) {
        if let Some(slot) = self.slots.get(worker_index) {
            let mut samples = match slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            samples.push(sample);
        }
    }

    /// Total samples recorded so far across all slots
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .map(|slot| match slot.lock() {
                Ok(guard) => guard.len(),
                Err(poisoned) => poisoned.into_inner().len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move every recorded sample out, worker 0 first.
    ///
    /// Intended to be called once after the pool has joined; slots are left
    /// empty, so a second drain returns nothing.
    pub fn drain(&self) -> Vec<Sample> {
        let mut merged = Vec::with_capacity(self.len());
        for slot in &self.slots {
            let mut samples = match slot.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            merged.append(&mut samples);
        }
        merged
    }
}
