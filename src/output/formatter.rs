//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides the
//! plain text implementation used when colors are disabled.

use crate::{
    error::{AppError, Result},
    executor::RunSummary,
    stats::LatencyStatistics,
};
use std::fmt::Write as _;
use std::time::Duration;

/// Main trait for rendering run results
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format the resolved target line
    fn format_target(&self, app_name: &str, function_name: &str, target_id: &str)
        -> Result<String>;

    /// Format the run counters and wall-clock window
    fn format_run_summary(&self, summary: &RunSummary) -> Result<String>;

    /// Format the latency statistics block
    fn format_statistics(&self, stats: &LatencyStatistics) -> Result<String>;

    /// Format error messages
    fn format_error(&self, error: &str) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with detailed information
    pub verbose_mode: bool,
    /// Show the per-sample listing
    pub show_individual_samples: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            show_individual_samples: false,
        }
    }
}

/// Render a duration in a human-readable unit
pub(super) fn format_duration(duration: Duration) -> String {
    let duration_ms = duration.as_secs_f64() * 1000.0;
    if duration_ms < 1.0 {
        format!("{:.2}μs", duration_ms * 1000.0)
    } else if duration_ms < 1000.0 {
        format!("{:.1}ms", duration_ms)
    } else if duration_ms < 60000.0 {
        format!("{:.2}s", duration_ms / 1000.0)
    } else {
        let minutes = (duration_ms / 60000.0) as u32;
        let seconds = (duration_ms % 60000.0) / 1000.0;
        format!("{}m{:.1}s", minutes, seconds)
    }
}

/// Render the variance in squared milliseconds.
///
/// The statistics carry variance in a duration whose nanosecond count is a
/// squared-nanosecond magnitude; showing it as ms^2 keeps the number on a
/// scale a reader can relate to the other figures.
pub(super) fn format_variance(variance: Duration) -> String {
    let variance_ms2 = variance.as_nanos() as f64 / 1e12;
    format!("{:.1}ms\u{00b2}", variance_ms2)
}

/// One line describing what trimming did to the sample set
pub(super) fn trim_note(stats: &LatencyStatistics) -> String {
    if stats.trimmed_count > 0 {
        format!(
            "Trimmed the {} slowest samples as cold-start outliers; {} samples used.",
            stats.trimmed_count, stats.sample_count
        )
    } else {
        format!(
            "Trim skipped: sample set no larger than the worker pool; all {} samples used.",
            stats.sample_count
        )
    }
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        writeln!(output, "  {}  ", title)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        write!(output, "{}", border)
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;

        Ok(output)
    }

    fn format_target(
        &self,
        app_name: &str,
        function_name: &str,
        target_id: &str,
    ) -> Result<String> {
        Ok(format!(
            "Target: {}/{} (id {})",
            app_name, function_name, target_id
        ))
    }

    fn format_run_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut output = String::new();

        output.push_str("Run Summary:\n");
        output.push_str("------------\n");
        output.push_str(&format!(
            "Invocations:  {} attempted, {} recorded, {} failed, {} not issued\n",
            summary.attempted, summary.recorded, summary.failed, summary.not_issued
        ));
        output.push_str(&format!(
            "Workers:      {} x {} invocations each\n",
            summary.worker_count, summary.per_worker
        ));
        if summary.discarded > 0 {
            output.push_str(&format!(
                "Dropped:      {} requested invocations (uneven split)\n",
                summary.discarded
            ));
        }
        if summary.panicked_workers > 0 {
            output.push_str(&format!(
                "Panicked:     {} workers did not finish their share\n",
                summary.panicked_workers
            ));
        }
        output.push_str(&format!(
            "Started:      {}\n",
            summary
                .started_at
                .format(crate::defaults::STAMP_MILLI_FORMAT)
        ));
        output.push_str(&format!(
            "Completed:    {}\n",
            summary
                .completed_at
                .format(crate::defaults::STAMP_MILLI_FORMAT)
        ));
        output.push_str(&format!(
            "Wall Time:    {}",
            format_duration(summary.wall_time())
        ));

        Ok(output)
    }

    fn format_statistics(&self, stats: &LatencyStatistics) -> Result<String> {
        let mut output = String::new();

        output.push_str("Latency Statistics:\n");
        output.push_str("-------------------\n");
        output.push_str(&format!("max:       {}\n", format_duration(stats.max)));
        output.push_str(&format!("min:       {}\n", format_duration(stats.min)));
        output.push_str(&format!("mean:      {}\n", format_duration(stats.mean)));
        output.push_str(&format!("median:    {}\n", format_duration(stats.median)));
        output.push_str(&format!("std:       {}\n", format_duration(stats.std_dev)));
        output.push_str(&format!("variance:  {}\n", format_variance(stats.variance)));
        if self.options.verbose_mode {
            output.push_str(&format!(
                "level:     {:?}\n",
                stats.performance_level()
            ));
        }
        output.push_str(&trim_note(stats));

        Ok(output)
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("ERROR: {}", error))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("SUCCESS: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunConfig;
    use chrono::TimeZone;

    fn summary() -> RunSummary {
        let run_config = RunConfig::new(10, 3, "fn-123".to_string()).unwrap();
        let started = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        RunSummary {
            attempted: 9,
            recorded: 9,
            failed: 1,
            not_issued: 0,
            panicked_workers: 0,
            worker_count: run_config.worker_count,
            per_worker: 3,
            discarded: 1,
            started_at: started,
            completed_at: started + chrono::Duration::milliseconds(2_500),
        }
    }

    fn stats() -> LatencyStatistics {
        LatencyStatistics {
            min: Duration::from_millis(10),
            max: Duration::from_millis(80),
            mean: Duration::from_millis(45),
            median: Duration::from_millis(50),
            std_dev: Duration::from_micros(22_913),
            variance: Duration::from_nanos(525_000_000_000_000),
            sample_count: 8,
            trimmed_count: 2,
        }
    }

    #[test]
    fn test_plain_statistics_block_lists_every_figure() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let block = formatter.format_statistics(&stats()).unwrap();

        assert!(block.contains("max:       80.0ms"));
        assert!(block.contains("min:       10.0ms"));
        assert!(block.contains("mean:      45.0ms"));
        assert!(block.contains("median:    50.0ms"));
        assert!(block.contains("std:       22.9ms"));
        assert!(block.contains("variance:  525.0ms\u{00b2}"));
        assert!(block.contains("Trimmed the 2 slowest samples"));
    }

    #[test]
    fn test_untrimmed_statistics_note_says_so() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let mut untrimmed = stats();
        untrimmed.trimmed_count = 0;
        untrimmed.sample_count = 3;

        let block = formatter.format_statistics(&untrimmed).unwrap();
        assert!(block.contains("Trim skipped"));
        assert!(block.contains("all 3 samples used"));
    }

    #[test]
    fn test_run_summary_includes_counts_and_window() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let block = formatter.format_run_summary(&summary()).unwrap();

        assert!(block.contains("9 attempted, 9 recorded, 1 failed, 0 not issued"));
        assert!(block.contains("3 x 3 invocations each"));
        assert!(block.contains("Dropped:      1 requested invocations"));
        assert!(block.contains("Mar  1 12:00:00.000"));
        assert!(block.contains("Wall Time:    2.50s"));
    }

    #[test]
    fn test_duration_units_scale_with_magnitude() {
        assert_eq!(format_duration(Duration::from_micros(250)), "250.00μs");
        assert_eq!(format_duration(Duration::from_millis(45)), "45.0ms");
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30.0s");
    }

    #[test]
    fn test_target_line() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let line = formatter
            .format_target("myapp", "hello", "fn-123")
            .unwrap();
        assert_eq!(line, "Target: myapp/hello (id fn-123)");
    }
}
