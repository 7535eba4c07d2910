//! Command-line interface module with comprehensive help system

pub mod help;

pub use help::HelpSystem;

use clap::Parser;

/// Function Latency Tester - Latency benchmarking for deployed functions
#[derive(Parser, Debug, Clone)]
#[command(name = "flt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Total number of invocations across all workers
    #[arg(short = 'n', long, default_value_t = crate::defaults::DEFAULT_INVOCATION_COUNT)]
    pub count: u32,

    /// Number of concurrent workers
    #[arg(short = 'p', long, default_value_t = crate::defaults::DEFAULT_WORKER_COUNT)]
    pub workers: u32,

    /// Name of the app that owns the target function
    #[arg(short = 'a', long)]
    pub app: Option<String>,

    /// Name of the function to invoke
    #[arg(short = 'f', long)]
    pub function: Option<String>,

    /// Base URL of the service hosting the function
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Print every recorded sample before the summary
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Show help for specific topic (config, environment, statistics, output, examples)
    #[arg(long, value_name = "TOPIC")]
    pub help_topic: Option<String>,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        // Check for conflicting color flags
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        // App/function/host completeness is checked after the environment is
        // merged in, since any of them may come from FLT_* variables.
        Ok(())
    }

    /// Check if help should be displayed for a specific topic
    pub fn should_show_topic_help(&self) -> bool {
        self.help_topic.is_some()
    }

    /// Get the help topic if specified
    pub fn get_help_topic(&self) -> Option<&str> {
        self.help_topic.as_deref()
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true  // Force color output when --color is specified
        } else if self.no_color {
            false // Disable color output when --no-color is specified
        } else {
            supports_color() // Use automatic detection
        }
    }

    /// Display help for the specified topic or main help
    pub fn display_help(&self) -> String {
        let help_system = HelpSystem::new();
        let use_colors = self.use_colors();

        if let Some(topic) = &self.help_topic {
            help_system.display_topic_help(topic, use_colors)
                .unwrap_or_else(|| {
                    format!("Unknown help topic: '{}'\n\nAvailable topics: config, environment, statistics, output, examples\n\n{}",
                        topic, help_system.display_main_help(use_colors))
                })
        } else {
            help_system.display_main_help(use_colors)
        }
    }

    /// Get configuration summary for display
    pub fn get_config_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("Configuration Summary:\n");
        summary.push_str(&format!("  Invocations: {}\n", self.count));
        summary.push_str(&format!("  Workers: {}\n", self.workers));
        summary.push_str(&format!("  Colored output: {}\n", self.use_colors()));
        summary.push_str(&format!("  Verbose mode: {}\n", self.verbose));
        summary.push_str(&format!("  Debug mode: {}\n", self.debug));

        if let Some(ref app) = self.app {
            summary.push_str(&format!("  App: {}\n", app));
        }

        if let Some(ref function) = self.function {
            summary.push_str(&format!("  Function: {}\n", function));
        }

        if let Some(ref host) = self.host {
            summary.push_str(&format!("  Host: {}\n", host));
        }

        summary
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    // Check for common environment variables that indicate color support
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check for NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Check for FORCE_COLOR environment variable
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    // On Windows, check for ANSICON or ConEmu
    #[cfg(target_os = "windows")]
    {
        if std::env::var("ANSICON").is_ok() || std::env::var("ConEmuANSI").is_ok() {
            return true;
        }
    }

    // Default to true on Unix-like systems, false on Windows
    #[cfg(unix)]
    {
        true
    }
    #[cfg(not(unix))]
    {
        false
    }
}
