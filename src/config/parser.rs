//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        self.load_env_file()?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config)?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Load .env file if it exists
    fn load_env_file(&self) -> Result<()> {
        EnvManager::load_env_file(self.cli.debug)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        // Override invocation count if specified
        if self.cli.count != crate::defaults::DEFAULT_INVOCATION_COUNT {
            config.count = self.cli.count;
        }

        // Override worker count if specified
        if self.cli.workers != crate::defaults::DEFAULT_WORKER_COUNT {
            config.workers = self.cli.workers;
        }

        // Override target names if specified
        if let Some(ref app) = self.cli.app {
            config.app_name = app.clone();
        }

        if let Some(ref function) = self.cli.function {
            config.function_name = function.clone();
        }

        // Override host if specified
        if let Some(ref host) = self.cli.host {
            config.host = host.clone();
        }

        // Override color setting if a color flag is specified
        if self.cli.no_color {
            config.enable_color = false;
        } else if self.cli.color {
            config.enable_color = true;
        }

        // Set verbose and debug flags (these are CLI-only)
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;

        if config.debug {
            println!("Applied CLI overrides to configuration");
            println!("Final config: count={}, workers={}, app={}, function={}, host={}",
                    config.count, config.workers, config.app_name, config.function_name, config.host);
        }

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("App: {}", config.app_name));
    summary.push(format!("Function: {}", config.function_name));
    summary.push(format!("Host: {}", config.host));
    summary.push(format!("Invocations: {}", config.count));
    summary.push(format!("Workers: {}", config.workers));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
