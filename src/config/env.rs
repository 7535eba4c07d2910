//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env file if it exists
    pub fn load_env_file(debug: bool) -> Result<()> {
        // Try to load .env from current directory
        if Path::new(".env").exists() {
            dotenv::from_filename(".env")
                .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;

            if debug {
                println!("Loaded configuration from .env file");
            }
        } else if debug {
            println!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        r#"# Function Latency Tester Configuration
#
# This file contains environment variables that can be used to configure
# the function latency tester. Values specified here will be used as defaults,
# but can be overridden by command-line arguments.

# Name of the app that owns the target function
# FLT_APP=myapp

# Name of the function to invoke
# FLT_FUNCTION=myfn

# Base URL of the service hosting the function
# FLT_HOST=http://localhost:8080

# Total number of invocations across all workers
# FLT_COUNT=1000

# Number of concurrent workers
# FLT_WORKERS=10

# Enable colored output (true/false)
# FLT_ENABLE_COLOR=true

# Example configurations for different scenarios:
#
# Benchmarking a remote deployment:
# FLT_HOST=https://functions.example.com
#
# Heavy parallel load:
# FLT_COUNT=100000
# FLT_WORKERS=100
"#.to_string()
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        use std::fs;

        let content = Self::create_example_env_content();
        fs::write(path, content)
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))?;

        Ok(())
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            "FLT_APP" | "FLT_FUNCTION" => {
                if value.trim().is_empty() {
                    return Err(AppError::config(format!("{} must be a non-empty string", key)));
                }
            }
            "FLT_HOST" => {
                let parsed = url::Url::parse(value)
                    .map_err(|e| AppError::config(format!("Invalid FLT_HOST value '{}': {}", value, e)))?;
                if parsed.scheme() != "http" && parsed.scheme() != "https" {
                    return Err(AppError::config(format!("FLT_HOST must use http or https: {}", value)));
                }
            }
            "FLT_COUNT" => {
                let count: u32 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid FLT_COUNT value '{}': {}", value, e)))?;
                if count == 0 || count > crate::defaults::MAX_INVOCATION_COUNT {
                    return Err(AppError::config(format!(
                        "FLT_COUNT must be between 1 and {}, got: {}",
                        crate::defaults::MAX_INVOCATION_COUNT, count
                    )));
                }
            }
            "FLT_WORKERS" => {
                let workers: u32 = value.parse()
                    .map_err(|e| AppError::config(format!("Invalid FLT_WORKERS value '{}': {}", value, e)))?;
                if workers == 0 || workers > crate::defaults::MAX_WORKER_COUNT {
                    return Err(AppError::config(format!(
                        "FLT_WORKERS must be between 1 and {}, got: {}",
                        crate::defaults::MAX_WORKER_COUNT, workers
                    )));
                }
            }
            "FLT_ENABLE_COLOR" => {
                value.parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid FLT_ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("FLT_APP", "Name of the app that owns the target function", "myapp"),
            ("FLT_FUNCTION", "Name of the function to invoke", "myfn"),
            ("FLT_HOST", "Base URL of the service hosting the function", "http://localhost:8080"),
            ("FLT_COUNT", "Total invocations across all workers (1-1000000)", "1000"),
            ("FLT_WORKERS", "Number of concurrent workers (1-1024)", "10"),
            ("FLT_ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<18} {}\n", var, description));
            help.push_str(&format!("  {:<18} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate all currently set environment variables
    pub fn validate_current_env() -> Result<Vec<String>> {
        let mut warnings = Vec::new();

        for (var_name, _, _) in Self::get_supported_env_vars() {
            if let Ok(value) = std::env::var(var_name) {
                if let Err(e) = Self::validate_env_var(var_name, &value) {
                    warnings.push(format!("Warning: {}", e));
                }
            }
        }

        Ok(warnings)
    }
}
