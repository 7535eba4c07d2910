//! Colored output formatting implementation

use crate::{
    error::{AppError, Result},
    executor::RunSummary,
    output::formatter::{trim_note, FormattingOptions, OutputFormatter},
    stats::LatencyStatistics,
    types::PerformanceLevel,
};
use colored::{Color, ColoredString, Colorize};
use std::fmt::Write as _;
use std::time::Duration;

/// Color scheme for different output elements
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub label: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub good: Color,
    pub moderate: Color,
    pub poor: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Cyan,
            label: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            good: Color::Green,
            moderate: Color::Yellow,
            poor: Color::Red,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    options: FormattingOptions,
    scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            scheme: ColorScheme::default(),
        }
    }

    /// Create a formatter with a custom color scheme
    pub fn with_scheme(options: FormattingOptions, scheme: ColorScheme) -> Self {
        Self { options, scheme }
    }

    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    fn dimmed(&self, text: &str) -> ColoredString {
        if self.options.enable_color {
            text.dimmed()
        } else {
            text.normal()
        }
    }

    fn level_color(&self, level: PerformanceLevel) -> Color {
        match level {
            PerformanceLevel::Good => self.scheme.good,
            PerformanceLevel::Moderate => self.scheme.moderate,
            PerformanceLevel::Poor => self.scheme.poor,
        }
    }

    fn colored_duration(&self, duration: Duration) -> ColoredString {
        let text = format_duration(duration);
        let level = PerformanceLevel::from_duration(duration);
        self.colorize(&text, self.level_color(level))
    }
}

/// Render a duration in a human-readable unit
fn format_duration(duration: Duration) -> String {
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

fn format_variance(variance: Duration) -> String {
    let variance_ms2 = variance.as_nanos() as f64 / 1e12;
    format!("{:.1}ms\u{00b2}", variance_ms2)
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        let border = "=".repeat(title.len() + 4);

        writeln!(output, "{}", self.colorize(&border, self.scheme.header))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        writeln!(output, "  {}  ", self.bold(title))
            .map_err(|e| AppError::io(format!("Failed to format header: {}", e)))?;
        write!(output, "{}", self.colorize(&border, self.scheme.header))
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
            "{} {} (id {})",
            self.colorize("Target:", self.scheme.label),
            self.bold(&format!("{}/{}", app_name, function_name)),
            self.dimmed(target_id)
        ))
    }

    fn format_run_summary(&self, summary: &RunSummary) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", self.bold("Run Summary:"))
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(output, "{}", self.dimmed("------------"))
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "{}  {} attempted, {} recorded, {} failed, {} not issued",
            self.colorize("Invocations:", self.scheme.label),
            summary.attempted,
            summary.recorded,
            summary.failed,
            summary.not_issued
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "{}      {} x {} invocations each",
            self.colorize("Workers:", self.scheme.label),
            summary.worker_count,
            summary.per_worker
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        if summary.discarded > 0 {
            writeln!(
                output,
                "{}      {} requested invocations (uneven split)",
                self.colorize("Dropped:", self.scheme.warning),
                summary.discarded
            )
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        }
        if summary.panicked_workers > 0 {
            writeln!(
                output,
                "{}     {} workers did not finish their share",
                self.colorize("Panicked:", self.scheme.error),
                summary.panicked_workers
            )
            .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        }
        writeln!(
            output,
            "{}      {}",
            self.colorize("Started:", self.scheme.label),
            summary
                .started_at
                .format(crate::defaults::STAMP_MILLI_FORMAT)
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        writeln!(
            output,
            "{}    {}",
            self.colorize("Completed:", self.scheme.label),
            summary
                .completed_at
                .format(crate::defaults::STAMP_MILLI_FORMAT)
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;
        write!(
            output,
            "{}    {}",
            self.colorize("Wall Time:", self.scheme.label),
            format_duration(summary.wall_time())
        )
        .map_err(|e| AppError::io(format!("Failed to format summary: {}", e)))?;

        Ok(output)
    }

    fn format_statistics(&self, stats: &LatencyStatistics) -> Result<String> {
        let mut output = String::new();

        writeln!(output, "{}", self.bold("Latency Statistics:"))
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(output, "{}", self.dimmed("-------------------"))
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "{}       {}",
            self.colorize("max:", self.scheme.label),
            self.colored_duration(stats.max)
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "{}       {}",
            self.colorize("min:", self.scheme.label),
            self.colored_duration(stats.min)
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "{}      {}",
            self.colorize("mean:", self.scheme.label),
            self.colored_duration(stats.mean)
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "{}    {}",
            self.colorize("median:", self.scheme.label),
            self.colored_duration(stats.median)
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "{}       {}",
            self.colorize("std:", self.scheme.label),
            format_duration(stats.std_dev)
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        writeln!(
            output,
            "{}  {}",
            self.colorize("variance:", self.scheme.label),
            self.dimmed(&format_variance(stats.variance))
        )
        .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        if self.options.verbose_mode {
            writeln!(
                output,
                "{}     {}",
                self.colorize("level:", self.scheme.label),
                self.colorize(
                    &format!("{:?}", stats.performance_level()),
                    self.level_color(stats.performance_level())
                )
            )
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;
        }
        write!(output, "{}", self.dimmed(&trim_note(stats)))
            .map_err(|e| AppError::io(format!("Failed to format statistics: {}", e)))?;

        Ok(output)
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.colorize("ERROR:", self.scheme.error),
            error
        ))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.colorize("WARNING:", self.scheme.warning),
            warning
        ))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.colorize("SUCCESS:", self.scheme.success),
            message
        ))
    }
}
