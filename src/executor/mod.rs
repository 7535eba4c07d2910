//! Load execution engine
//!
//! This module contains the components that actually drive a run:
//! - Work distribution across the worker pool
//! - Blocking worker threads issuing sequential invocations
//! - Per-worker sample collection merged after the join barrier

pub mod collector;

pub use collector::SampleCollector;

use crate::{
    client::Invoker,
    clock::Clock,
    error::{AppError, Result},
    logging::{LoggerFactory, WorkerLogger},
    models::{RunConfig, Sample, SampleSet},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, thread, time::Duration};

/// Even share of the total invocation count each worker performs.
///
/// Integer division; a remainder that does not divide evenly across the
/// pool is dropped from the run rather than assigned to any worker.
pub fn per_worker_share(run_config: &RunConfig) -> u32 {
    run_config.total_invocations / run_config.worker_count
}

/// Counters and wall-clock bounds describing one completed run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Invocations the workers actually attempted
    pub attempted: u32,
    /// Samples recorded into the collector
    pub recorded: u32,
    /// Attempts that completed with a failure outcome (error status or
    /// transport failure after the request was issued)
    pub failed: u32,
    /// Attempts where the request could not be issued at all
    pub not_issued: u32,
    /// Worker threads that panicked before finishing their share
    pub panicked_workers: u32,
    /// Size of the worker pool
    pub worker_count: u32,
    /// Invocations assigned to each worker
    pub per_worker: u32,
    /// Requested invocations dropped by the even split
    pub discarded: u32,
    /// When the pool started issuing work
    pub started_at: DateTime<Utc>,
    /// When the last worker joined
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    fn empty(run_config: &RunConfig, at: DateTime<Utc>) -> Self {
        Self {
            attempted: 0,
            recorded: 0,
            failed: 0,
            not_issued: 0,
            panicked_workers: 0,
            worker_count: run_config.worker_count,
            per_worker: 0,
            discarded: run_config.total_invocations,
            started_at: at,
            completed_at: at,
        }
    }

    /// Attempts that completed with a success status
    pub fn succeeded(&self) -> u32 {
        self.attempted
            .saturating_sub(self.failed)
            .saturating_sub(self.not_issued)
    }

    /// Wall-clock span of the whole run
    pub fn wall_time(&self) -> Duration {
        (self.completed_at - self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Everything a completed run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Merged samples from every worker
    pub samples: SampleSet,
    /// Run counters and timing bounds
    pub summary: RunSummary,
}

/// Per-worker counters returned through the join handle
#[derive(Debug, Default, Clone, Copy)]
struct WorkerReport {
    attempted: u32,
    recorded: u32,
    failed: u32,
    not_issued: u32,
}

/// Pool of blocking worker threads that issue the run's invocations.
///
/// Each worker performs its share sequentially; the pool does not return
/// until every spawned worker has joined, so the drained sample set is
/// complete and stable by the time the caller sees it.
pub struct WorkerPool {
    run_config: RunConfig,
    invoker: Arc<dyn Invoker>,
    clock: Arc<dyn Clock>,
}

impl WorkerPool {
    /// Create a pool for one run
    pub fn new(run_config: RunConfig, invoker: Arc<dyn Invoker>, clock: Arc<dyn Clock>) -> Self {
        Self {
            run_config,
            invoker,
            clock,
        }
    }

    /// Execute the run to completion and return the merged samples.
    ///
    /// Individual invocation failures are logged and counted, never fatal;
    /// only a failure to spawn the pool itself surfaces as an error.
    pub fn execute(&self, logger_factory: &LoggerFactory) -> Result<RunOutcome> {
        let share = per_worker_share(&self.run_config);
        let worker_count = self.run_config.worker_count;
        let logger = logger_factory.create_logger("EXECUTOR");

        if share == 0 {
            logger
                .warn(&format!(
                    "{} invocations split across {} workers leaves no whole share per worker; nothing to run",
                    self.run_config.total_invocations, worker_count
                ))
                .field("total", self.run_config.total_invocations)
                .field("workers", worker_count)
                .log();
            return Ok(RunOutcome {
                samples: SampleSet::default(),
                summary: RunSummary::empty(&self.run_config, self.clock.now()),
            });
        }

        let discarded = self.run_config.total_invocations - share * worker_count;
        if discarded > 0 {
            logger
                .debug(&format!(
                    "dropping {} invocations that do not divide evenly across the pool",
                    discarded
                ))
                .field("per_worker", share)
                .field("discarded", discarded)
                .log();
        }

        let collector = Arc::new(SampleCollector::new(worker_count as usize, share as usize));
        let started_at = self.clock.now();

        let mut handles = Vec::with_capacity(worker_count as usize);
        let mut spawn_error = None;
        for index in 0..worker_count {
            let invoker = Arc::clone(&self.invoker);
            let clock = Arc::clone(&self.clock);
            let collector = Arc::clone(&collector);
            let worker_logger = logger_factory.create_worker_logger(index);
            let target_id = self.run_config.target_id.clone();

            let spawned = thread::Builder::new()
                .name(format!("worker-{}", index))
                .spawn(move || {
                    Self::run_worker(
                        index,
                        share,
                        &target_id,
                        invoker,
                        clock,
                        collector,
                        worker_logger,
                    )
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some(AppError::internal(format!(
                        "Failed to spawn worker {}: {}",
                        index, e
                    )));
                    break;
                }
            }
        }

        // Join barrier: every spawned worker finishes before results are read.
        let mut summary = RunSummary {
            per_worker: share,
            discarded,
            started_at,
            ..RunSummary::empty(&self.run_config, started_at)
        };
        for handle in handles {
            match handle.join() {
                Ok(report) => {
                    summary.attempted += report.attempted;
                    summary.recorded += report.recorded;
                    summary.failed += report.failed;
                    summary.not_issued += report.not_issued;
                }
                Err(_) => {
                    summary.panicked_workers += 1;
                    logger
                        .error("worker thread panicked; the rest of its share is lost")
                        .log();
                }
            }
        }
        summary.completed_at = self.clock.now();

        if let Some(e) = spawn_error {
            return Err(e);
        }

        Ok(RunOutcome {
            samples: SampleSet::new(collector.drain()),
            summary,
        })
    }

    /// Body of one worker thread: issue the share sequentially, bracketing
    /// every attempt with clock reads
    fn run_worker(
        index: u32,
        share: u32,
        target_id: &str,
        invoker: Arc<dyn Invoker>,
        clock: Arc<dyn Clock>,
        collector: Arc<SampleCollector>,
        logger: WorkerLogger,
    ) -> WorkerReport {
        logger.log_lifecycle("starting", share);
        let mut report = WorkerReport::default();

        for _ in 0..share {
            report.attempted += 1;
            let start = clock.now();
            match invoker.invoke(target_id) {
                Ok(outcome) => {
                    let end = clock.now();
                    match Sample::new(start, end) {
                        Ok(sample) => {
                            collector.record(index as usize, sample);
                            report.recorded += 1;
                            match outcome.status_code {
                                Some(code) if outcome.is_success() => {
                                    logger.log_invocation(code, sample.duration_ms());
                                }
                                Some(code) => {
                                    report.failed += 1;
                                    logger.log_bad_status(
                                        code,
                                        outcome.body_excerpt.as_deref().unwrap_or(""),
                                    );
                                }
                                None => {
                                    report.failed += 1;
                                    let reason = outcome
                                        .error
                                        .as_deref()
                                        .unwrap_or("request failed in transit");
                                    logger.log_transport_failure(&AppError::invocation(reason));
                                }
                            }
                        }
                        Err(e) => {
                            // Clock stepped backwards mid-call; no usable sample.
                            report.failed += 1;
                            logger.log_transport_failure(&e);
                        }
                    }
                }
                Err(e) => {
                    report.not_issued += 1;
                    logger.log_not_issued(&e);
                }
            }
        }

        logger.log_lifecycle("finished", share);
        report
    }
}
