//! Output formatting and display
//!
//! This module handles all user-facing output of a finished run: the
//! header, the resolved target, run counters, the optional per-sample
//! listing and the latency statistics block. Formatters implement the
//! [`OutputFormatter`] trait; the coordinator assembles the pieces into
//! one report string.

pub mod colored;
pub mod formatter;
pub mod verbose;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{FormattingOptions, OutputFormatter, PlainFormatter};
pub use verbose::SampleListingFormatter;

use crate::{
    error::Result,
    executor::RunSummary,
    models::{Config, SampleSet},
    stats::LatencyStatistics,
};

/// Factory for creating the right formatter for the current settings
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color and verbosity settings
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            show_individual_samples: verbose,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Everything the coordinator needs to render one finished run
pub struct RunReport<'a> {
    pub app_name: &'a str,
    pub function_name: &'a str,
    pub target_id: &'a str,
    pub summary: &'a RunSummary,
    pub samples: &'a SampleSet,
    /// None when the run produced no samples
    pub statistics: Option<&'a LatencyStatistics>,
}

/// Assembles the final report from its formatted sections
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
    listing_formatter: Option<SampleListingFormatter>,
}

impl OutputCoordinator {
    /// Coordinator without the per-sample listing
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self {
            formatter,
            listing_formatter: None,
        }
    }

    /// Coordinator that lists individual samples when verbose mode is on
    pub fn with_verbose_listing(formatter: Box<dyn OutputFormatter>, config: &Config) -> Self {
        let listing_formatter = if config.verbose {
            Some(SampleListingFormatter::new(config))
        } else {
            None
        };
        Self {
            formatter,
            listing_formatter,
        }
    }

    /// Render the complete report for a finished run
    pub fn display_report(&self, report: &RunReport<'_>) -> Result<String> {
        let mut sections = Vec::new();

        sections.push(self.formatter.format_header("Function Latency Results")?);
        sections.push(self.formatter.format_target(
            report.app_name,
            report.function_name,
            report.target_id,
        )?);
        sections.push(self.formatter.format_run_summary(report.summary)?);

        if let Some(listing) = &self.listing_formatter {
            sections.push(listing.format_listing(report.samples)?);
        }

        match report.statistics {
            Some(stats) => sections.push(self.formatter.format_statistics(stats)?),
            None => sections.push(self.formatter.format_warning(
                "no samples were recorded; statistics cannot be computed",
            )?),
        }

        Ok(sections.join("\n\n"))
    }
}
