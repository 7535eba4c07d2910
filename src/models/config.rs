//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Total number of invocations to issue across all workers
    #[serde(default = "default_invocation_count")]
    pub count: u32,

    /// Number of concurrent workers
    #[serde(default = "default_worker_count")]
    pub workers: u32,

    /// Application name owning the target function
    #[serde(default)]
    pub app_name: String,

    /// Name of the function to invoke
    #[serde(default)]
    pub function_name: String,

    /// Base URL of the service hosting the control plane and invoke endpoint
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: default_invocation_count(),
            workers: default_worker_count(),
            app_name: String::new(),
            function_name: String::new(),
            host: default_host(),
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(AppError::config("Invocation count must be at least 1"));
        }

        if self.count > crate::defaults::MAX_INVOCATION_COUNT {
            return Err(AppError::config(format!(
                "Invocation count cannot exceed {}",
                crate::defaults::MAX_INVOCATION_COUNT
            )));
        }

        if self.workers == 0 {
            return Err(AppError::config("Worker count must be at least 1"));
        }

        if self.workers > crate::defaults::MAX_WORKER_COUNT {
            return Err(AppError::config(format!(
                "Worker count cannot exceed {}",
                crate::defaults::MAX_WORKER_COUNT
            )));
        }

        if self.app_name.is_empty() {
            return Err(AppError::config("App name must be a non-empty string"));
        }

        if self.function_name.is_empty() {
            return Err(AppError::config("Function name must be a non-empty string"));
        }

        match url::Url::parse(&self.host) {
            Ok(parsed) => {
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!(
                        "Host must be an http or https URL: {}",
                        self.host
                    )));
                }
            }
            Err(e) => {
                return Err(AppError::config(format!(
                    "Invalid host URL '{}': {}",
                    self.host, e
                )));
            }
        }

        Ok(())
    }

    /// Parsed base URL of the service
    pub fn host_url(&self) -> Result<url::Url> {
        Ok(url::Url::parse(&self.host)?)
    }

    /// Upper bound on workers that still makes sense on this machine.
    ///
    /// Workers spend their time blocked on the network, so the cap is well
    /// above the core count but bounded to keep thread churn sane.
    pub fn recommended_max_workers() -> u32 {
        ((num_cpus::get() as u32) * 16).clamp(32, crate::defaults::MAX_WORKER_COUNT)
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(count) = std::env::var("FLT_COUNT") {
            self.count = count
                .parse()
                .map_err(|e| AppError::config(format!("Invalid FLT_COUNT value '{}': {}", count, e)))?;
        }

        if let Ok(workers) = std::env::var("FLT_WORKERS") {
            self.workers = workers
                .parse()
                .map_err(|e| AppError::config(format!("Invalid FLT_WORKERS value '{}': {}", workers, e)))?;
        }

        if let Ok(app_name) = std::env::var("FLT_APP") {
            if !app_name.trim().is_empty() {
                self.app_name = app_name.trim().to_string();
            }
        }

        if let Ok(function_name) = std::env::var("FLT_FUNCTION") {
            if !function_name.trim().is_empty() {
                self.function_name = function_name.trim().to_string();
            }
        }

        if let Ok(host) = std::env::var("FLT_HOST") {
            if !host.trim().is_empty() {
                self.host = host.trim().to_string();
            }
        }

        if let Ok(enable_color) = std::env::var("FLT_ENABLE_COLOR") {
            self.enable_color = enable_color.parse().map_err(|e| {
                AppError::config(format!("Invalid FLT_ENABLE_COLOR value '{}': {}", enable_color, e))
            })?;
        }

        Ok(())
    }
}

/// Validated, immutable parameters for one benchmarking run.
///
/// Built after configuration validation and target resolution; nothing in it
/// changes for the lifetime of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Total invocations requested across all workers
    pub total_invocations: u32,
    /// Number of concurrent workers
    pub worker_count: u32,
    /// Resolved identifier of the invocation target (function id)
    pub target_id: String,
}

impl RunConfig {
    /// Create a run configuration, enforcing the minimum bounds once more
    /// at the boundary the executor trusts.
    pub fn new(total_invocations: u32, worker_count: u32, target_id: String) -> Result<Self> {
        if total_invocations == 0 {
            return Err(AppError::config("Invocation count must be at least 1"));
        }
        if worker_count == 0 {
            return Err(AppError::config("Worker count must be at least 1"));
        }
        if target_id.is_empty() {
            return Err(AppError::config("Target id must be a non-empty string"));
        }
        Ok(Self {
            total_invocations,
            worker_count,
            target_id,
        })
    }
}

// Default value functions for serde
fn default_invocation_count() -> u32 {
    crate::defaults::DEFAULT_INVOCATION_COUNT
}

fn default_worker_count() -> u32 {
    crate::defaults::DEFAULT_WORKER_COUNT
}

fn default_host() -> String {
    crate::defaults::DEFAULT_HOST.to_string()
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
