//! Data models and structures for the function latency tester

pub mod config;
pub mod sample;

// Re-export main model types
pub use config::{Config, RunConfig};
pub use sample::{Sample, SampleSet};
