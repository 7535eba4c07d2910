//! Function Latency Tester
//!
//! A latency benchmarking harness for deployed functions. The tester
//! resolves an app/function pair against the platform's control plane,
//! drives a fixed number of invocations through a pool of concurrent
//! workers and reports latency statistics over the recorded samples.

pub mod app;
pub mod cli;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod resolver;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use client::{InvocationOutcome, InvokeClient, Invoker};
pub use clock::{Clock, SystemClock};
pub use error::{AppError, Result};
pub use executor::{RunOutcome, RunSummary, WorkerPool};
pub use models::{Config, RunConfig, Sample, SampleSet};
pub use output::{
    ColoredFormatter, OutputCoordinator, OutputFormatter, OutputFormatterFactory, PlainFormatter,
    SampleListingFormatter,
};
pub use resolver::{ControlPlaneResolver, Resolver};
pub use stats::{LatencyStatistics, StatisticsEngine};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_INVOCATION_COUNT: u32 = 1;
    pub const DEFAULT_WORKER_COUNT: u32 = 1;
    pub const DEFAULT_HOST: &str = "http://localhost:8080";
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_INVOCATION_COUNT: u32 = 1_000_000;
    pub const MAX_WORKER_COUNT: u32 = 1024;

    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const TCP_KEEPALIVE: Duration = Duration::from_secs(60);
    pub const POOL_MAX_IDLE_PER_HOST: usize = 512;
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    pub const INVOKE_CONTENT_TYPE: &str = "text/plain";
    pub const BODY_EXCERPT_LIMIT: usize = 512;

    /// Wall-clock timestamp format used in sample listings and run summaries
    pub const STAMP_MILLI_FORMAT: &str = "%b %e %H:%M:%S%.3f";
}
