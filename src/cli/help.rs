//! Command-line help system with examples and detailed guidance
//!
//! This module provides detailed help text, usage examples, and contextual guidance
//! to help users effectively use the function latency tester.

use crate::config::env::EnvManager;
use colored::*;

/// Help system for the CLI application
pub struct HelpSystem;

impl HelpSystem {
    /// Create a new help system
    pub fn new() -> Self {
        Self
    }

    /// Display the main help message with all available options
    pub fn display_main_help(&self, use_colors: bool) -> String {
        let mut help = String::new();

        // Header
        help.push_str(&self.format_header(use_colors));
        help.push_str("\n");

        // Usage section
        help.push_str(&self.format_usage_section(use_colors));
        help.push_str("\n");

        // Options section
        help.push_str(&self.format_options_section(use_colors));
        help.push_str("\n");

        // Examples section
        help.push_str(&self.format_examples_section(use_colors));
        help.push_str("\n");

        // Environment variables section
        help.push_str(&self.format_environment_section(use_colors));
        help.push_str("\n");

        // Footer with additional resources
        help.push_str(&self.format_footer(use_colors));

        help
    }

    /// Display quick help for specific topics
    pub fn display_topic_help(&self, topic: &str, use_colors: bool) -> Option<String> {
        match topic.to_lowercase().as_str() {
            "config" | "configuration" => Some(self.format_configuration_help(use_colors)),
            "env" | "environment" => Some(self.format_environment_help(use_colors)),
            "stats" | "statistics" => Some(self.format_statistics_help(use_colors)),
            "examples" => Some(self.format_examples_section(use_colors)),
            "output" | "formatting" => Some(self.format_output_help(use_colors)),
            _ => None,
        }
    }

    /// Format the main header
    fn format_header(&self, use_colors: bool) -> String {
        let title = "Function Latency Tester";
        let subtitle = "Latency benchmarking tool for functions deployed behind an invoke endpoint";
        let version = env!("CARGO_PKG_VERSION");

        if use_colors {
            format!(
                "{}\n{}\nVersion: {}\n",
                title.bright_cyan().bold(),
                subtitle.bright_blue(),
                version.green()
            )
        } else {
            format!("{}\n{}\nVersion: {}\n", title, subtitle, version)
        }
    }

    /// Format the usage section
    fn format_usage_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "USAGE:".bright_green().bold().to_string()
        } else {
            "USAGE:".to_string()
        };

        let usage_patterns = vec![
            "flt --app <NAME> --function <NAME> [OPTIONS]",
            "flt -a <NAME> -f <NAME> -n <COUNT> -p <WORKERS> [OPTIONS]",
            "flt --help-topic <TOPIC>",
        ];

        let mut usage = format!("{}\n", header);
        for pattern in usage_patterns {
            if use_colors {
                usage.push_str(&format!("  {}\n", pattern.bright_white()));
            } else {
                usage.push_str(&format!("  {}\n", pattern));
            }
        }

        usage
    }

    /// Format the options section
    fn format_options_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "OPTIONS:".bright_green().bold().to_string()
        } else {
            "OPTIONS:".to_string()
        };

        let options = vec![
            OptionHelp {
                short: Some("a"),
                long: "app",
                value: "<NAME>",
                description: "Name of the app that owns the target function",
                example: Some("--app myapp"),
            },
            OptionHelp {
                short: Some("f"),
                long: "function",
                value: "<NAME>",
                description: "Name of the function to invoke",
                example: Some("--function myfn"),
            },
            OptionHelp {
                short: Some("n"),
                long: "count",
                value: "<NUMBER>",
                description: "Total number of invocations across all workers (1-1000000)",
                example: Some("--count 1000"),
            },
            OptionHelp {
                short: Some("p"),
                long: "workers",
                value: "<NUMBER>",
                description: "Number of concurrent workers (1-1024)",
                example: Some("--workers 10"),
            },
            OptionHelp {
                short: Some("H"),
                long: "host",
                value: "<URL>",
                description: "Base URL of the service hosting the function",
                example: Some("--host http://localhost:8080"),
            },
            OptionHelp {
                short: None,
                long: "verbose",
                value: "",
                description: "Print every recorded sample before the summary",
                example: Some("--verbose"),
            },
            OptionHelp {
                short: None,
                long: "debug",
                value: "",
                description: "Enable debug output with diagnostic information",
                example: Some("--debug"),
            },
            OptionHelp {
                short: None,
                long: "no-color",
                value: "",
                description: "Disable colored output",
                example: Some("--no-color"),
            },
            OptionHelp {
                short: None,
                long: "help-topic",
                value: "<TOPIC>",
                description: "Show help for a specific topic",
                example: Some("--help-topic statistics"),
            },
        ];

        let mut output = format!("{}\n", header);
        for option in options {
            output.push_str(&option.format(use_colors));
            output.push_str("\n");
        }

        output
    }

    /// Format the examples section
    fn format_examples_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "EXAMPLES:".bright_green().bold().to_string()
        } else {
            "EXAMPLES:".to_string()
        };

        let examples = vec![
            ExampleHelp {
                title: "Single invocation",
                command: "flt --app myapp --function myfn",
                description: "Invoke the function once against the local service",
            },
            ExampleHelp {
                title: "Parallel load",
                command: "flt -a myapp -f myfn -n 1000 -p 10",
                description: "Issue 1000 invocations split across 10 concurrent workers",
            },
            ExampleHelp {
                title: "Remote service",
                command: "flt -a myapp -f myfn -H https://functions.example.com",
                description: "Benchmark a function hosted on a remote service",
            },
            ExampleHelp {
                title: "Per-sample listing",
                command: "flt -a myapp -f myfn -n 100 -p 4 --verbose",
                description: "Print every recorded sample before the statistics summary",
            },
            ExampleHelp {
                title: "Debug mode with no colors",
                command: "flt -a myapp -f myfn --debug --no-color",
                description: "Run with debug output and no color formatting",
            },
        ];

        let mut output = format!("{}\n", header);
        for example in examples {
            output.push_str(&example.format(use_colors));
            output.push_str("\n");
        }

        output
    }

    /// Format the environment variables section
    fn format_environment_section(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "ENVIRONMENT VARIABLES:".bright_green().bold().to_string()
        } else {
            "ENVIRONMENT VARIABLES:".to_string()
        };

        let env_vars = EnvManager::get_supported_env_vars();

        let mut output = format!("{}\n", header);
        output.push_str("Configuration priority: CLI arguments > Environment variables > Defaults\n\n");

        for (var_name, description, _example) in env_vars {
            if use_colors {
                output.push_str(&format!("  {}: {}\n",
                    var_name.bright_yellow().bold(),
                    description.white()
                ));
            } else {
                output.push_str(&format!("  {}: {}\n", var_name, description));
            }
        }

        output.push_str("\nExample .env file:\n");
        if use_colors {
            output.push_str(&format!("  {}\n", "FLT_APP=myapp".bright_blue()));
            output.push_str(&format!("  {}\n", "FLT_FUNCTION=myfn".bright_blue()));
            output.push_str(&format!("  {}\n", "FLT_COUNT=1000".bright_blue()));
            output.push_str(&format!("  {}\n", "FLT_WORKERS=10".bright_blue()));
        } else {
            output.push_str("  FLT_APP=myapp\n");
            output.push_str("  FLT_FUNCTION=myfn\n");
            output.push_str("  FLT_COUNT=1000\n");
            output.push_str("  FLT_WORKERS=10\n");
        }

        output
    }

    /// Format the footer with additional resources
    fn format_footer(&self, use_colors: bool) -> String {
        let mut footer = String::new();

        if use_colors {
            footer.push_str(&format!("{}\n", "ADDITIONAL HELP:".bright_green().bold()));
        } else {
            footer.push_str("ADDITIONAL HELP:\n");
        }

        let help_topics = vec![
            ("--help-topic config", "Configuration options and parameter limits"),
            ("--help-topic environment", "Environment variable and .env file details"),
            ("--help-topic statistics", "How the reported statistics are computed"),
            ("--help-topic examples", "More detailed usage examples"),
            ("--help-topic output", "Output formatting and interpretation"),
        ];

        for (command, description) in help_topics {
            if use_colors {
                footer.push_str(&format!("  {}: {}\n",
                    command.bright_yellow(),
                    description.white()
                ));
            } else {
                footer.push_str(&format!("  {}: {}\n", command, description));
            }
        }

        footer.push_str("\nFor more information, visit the project documentation or GitHub repository.\n");

        footer
    }

    /// Format detailed configuration help
    fn format_configuration_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "CONFIGURATION REFERENCE:".bright_green().bold().to_string()
        } else {
            "CONFIGURATION REFERENCE:".to_string()
        };

        let mut help = format!("{}\n\n", header);

        help.push_str("CONFIGURATION PRIORITY (highest to lowest):\n");
        help.push_str("1. Command-line arguments\n");
        help.push_str("2. Environment variables (including .env file)\n");
        help.push_str("3. Default values\n\n");

        help.push_str("PARAMETER LIMITS:\n");
        help.push_str("- Invocation count: 1-1000000 total invocations\n");
        help.push_str("- Workers: 1-1024 concurrent workers\n");
        help.push_str("- Host: Must be an absolute http or https URL\n");
        help.push_str("- App and function names: Non-empty strings\n\n");

        help.push_str("WORK DISTRIBUTION:\n");
        help.push_str("Each worker issues count / workers invocations (integer division).\n");
        help.push_str("A remainder that does not divide evenly is not issued, so the\n");
        help.push_str("effective total is workers * (count / workers).\n\n");

        help.push_str("DEFAULTS:\n");
        help.push_str(&format!("- Count: {}\n", crate::defaults::DEFAULT_INVOCATION_COUNT));
        help.push_str(&format!("- Workers: {}\n", crate::defaults::DEFAULT_WORKER_COUNT));
        help.push_str(&format!("- Host: {}\n", crate::defaults::DEFAULT_HOST));

        help
    }

    /// Format detailed environment help
    fn format_environment_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "ENVIRONMENT VARIABLES REFERENCE:".bright_green().bold().to_string()
        } else {
            "ENVIRONMENT VARIABLES REFERENCE:".to_string()
        };

        let mut help = format!("{}\n\n", header);

        help.push_str("LOADING ORDER:\n");
        help.push_str("1. System environment variables\n");
        help.push_str("2. .env file in current directory (if present)\n");
        help.push_str("3. Command-line arguments (override both)\n\n");

        help.push_str("SUPPORTED VARIABLES:\n");
        let env_vars = EnvManager::get_supported_env_vars();
        for (var_name, description, example) in env_vars {
            if use_colors {
                help.push_str(&format!("{}:\n  {}\n  Example: {}\n\n",
                    var_name.bright_yellow().bold(),
                    description.white(),
                    example.bright_blue().italic()
                ));
            } else {
                help.push_str(&format!("{}:\n  {}\n  Example: {}\n\n", var_name, description, example));
            }
        }

        help.push_str("EXAMPLE .env FILE:\n");
        help.push_str(&EnvManager::create_example_env_content());

        help
    }

    /// Format statistics help
    fn format_statistics_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "STATISTICS REFERENCE:".bright_green().bold().to_string()
        } else {
            "STATISTICS REFERENCE:".to_string()
        };

        let mut help = format!("{}\n\n", header);

        help.push_str("SAMPLE COLLECTION:\n");
        help.push_str("Every issued invocation yields one timing sample, including\n");
        help.push_str("invocations that returned an error status. Only requests that\n");
        help.push_str("could not be issued at all produce no sample.\n\n");

        help.push_str("OUTLIER TRIMMING:\n");
        help.push_str("Samples are sorted by duration and, when more samples than\n");
        help.push_str("workers were recorded, the slowest one-per-worker are dropped.\n");
        help.push_str("This removes the warm-up and connection-setup tail that every\n");
        help.push_str("worker contributes. With too few samples, trimming is skipped.\n\n");

        help.push_str("REPORTED STATISTICS:\n");
        help.push_str("- max / min: Slowest and fastest remaining sample\n");
        help.push_str("- mean: Arithmetic average of the remaining samples\n");
        help.push_str("- median: Middle sample of the sorted remainder\n");
        help.push_str("- std: Population standard deviation\n");
        help.push_str("- variance: Population variance\n\n");

        help.push_str("Percentile breakdowns beyond the median are not computed.\n");

        help
    }

    /// Format output formatting help
    fn format_output_help(&self, use_colors: bool) -> String {
        let header = if use_colors {
            "OUTPUT FORMATTING REFERENCE:".bright_green().bold().to_string()
        } else {
            "OUTPUT FORMATTING REFERENCE:".to_string()
        };

        let mut help = format!("{}\n\n", header);

        help.push_str("OUTPUT MODES:\n");
        help.push_str("- Default: Colored summary with performance indicators\n");
        help.push_str("- --no-color: Plain text output for scripts/logs\n");
        help.push_str("- --verbose: Per-sample listing before the summary\n");
        help.push_str("- --debug: Diagnostic information and errors\n\n");

        help.push_str("PERFORMANCE INDICATORS:\n");
        if use_colors {
            help.push_str(&format!("- {}: < 100ms\n", "Green".green()));
            help.push_str(&format!("- {}: 100-1000ms\n", "Yellow".yellow()));
            help.push_str(&format!("- {}: > 1000ms\n", "Red".red()));
        } else {
            help.push_str("- Green: < 100ms\n");
            help.push_str("- Yellow: 100-1000ms\n");
            help.push_str("- Red: > 1000ms\n");
        }

        help.push_str("\nVERBOSE LISTING:\n");
        help.push_str("Each line shows the sample index, duration, start timestamp\n");
        help.push_str("and end timestamp, before any outlier trimming.\n\n");

        help.push_str("TROUBLESHOOTING OUTPUT:\n");
        help.push_str("- Use --debug to see detailed error messages\n");
        help.push_str("- Use --verbose to see individual invocation timings\n");
        help.push_str("- Failed invocations are logged to stderr as they happen\n");

        help
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper struct for formatting individual options
struct OptionHelp {
    short: Option<&'static str>,
    long: &'static str,
    value: &'static str,
    description: &'static str,
    example: Option<&'static str>,
}

impl OptionHelp {
    fn format(&self, use_colors: bool) -> String {
        let mut option_str = String::new();

        // Format the option flags
        if let Some(short) = self.short {
            if use_colors {
                option_str.push_str(&format!("  {}, ", format!("-{}", short).bright_cyan()));
            } else {
                option_str.push_str(&format!("  -{}, ", short));
            }
        } else {
            option_str.push_str("      ");
        }

        let long_with_value = if self.value.is_empty() {
            format!("--{}", self.long)
        } else {
            format!("--{} {}", self.long, self.value)
        };

        if use_colors {
            option_str.push_str(&format!("{:<30} {}",
                long_with_value.bright_cyan(),
                self.description.white()
            ));
        } else {
            option_str.push_str(&format!("{:<30} {}", long_with_value, self.description));
        }

        // Add example if provided
        if let Some(example) = self.example {
            if use_colors {
                option_str.push_str(&format!("\n{}{}", " ".repeat(36),
                    format!("Example: {}", example).bright_blue().italic()
                ));
            } else {
                option_str.push_str(&format!("\n{}Example: {}", " ".repeat(36), example));
            }
        }

        option_str
    }
}

/// Helper struct for formatting examples
struct ExampleHelp {
    title: &'static str,
    command: &'static str,
    description: &'static str,
}

impl ExampleHelp {
    fn format(&self, use_colors: bool) -> String {
        if use_colors {
            format!("  {}:\n    {}\n    {}\n",
                self.title.bright_yellow().bold(),
                self.command.bright_white(),
                self.description.bright_blue().italic()
            )
        } else {
            format!("  {}:\n    {}\n    {}\n",
                self.title, self.command, self.description
            )
        }
    }
}
