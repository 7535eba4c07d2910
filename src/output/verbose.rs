//! Verbose per-sample listing
//!
//! When verbose mode is on, every recorded sample is listed individually
//! with its index, duration and wall-clock bounds. The listing is sorted
//! ascending by duration and always shows the full set, including the
//! samples that statistical trimming later discards.

use crate::{
    error::Result,
    models::{Config, Sample, SampleSet},
    types::PerformanceLevel,
};
use colored::{Color, Colorize};
use std::time::Duration;

/// Formats the individual sample listing for verbose output
pub struct SampleListingFormatter {
    use_color: bool,
}

impl SampleListingFormatter {
    pub fn new(config: &Config) -> Self {
        Self {
            use_color: config.enable_color,
        }
    }

    /// Render the full listing, one line per sample
    pub fn format_listing(&self, samples: &SampleSet) -> Result<String> {
        if samples.is_empty() {
            return Ok("No samples to list.".to_string());
        }

        let mut output = String::new();
        output.push_str("Individual Samples (sorted by duration):\n");
        output.push_str(&format!(
            "{:>5}  {:>10}  {:<19}  {:<19}\n",
            "#", "duration", "start", "end"
        ));

        for (index, sample) in samples.sorted_by_duration().iter().enumerate() {
            output.push_str(&self.format_row(index, sample));
            output.push('\n');
        }

        // Drop the trailing newline so callers control spacing.
        output.pop();
        Ok(output)
    }

    fn format_row(&self, index: usize, sample: &Sample) -> String {
        format!(
            "{:>5}  {:>10}  {}  {}",
            index,
            self.duration_cell(sample.duration()),
            sample.start.format(crate::defaults::STAMP_MILLI_FORMAT),
            sample.end.format(crate::defaults::STAMP_MILLI_FORMAT)
        )
    }

    fn duration_cell(&self, duration: Duration) -> String {
        let text = format!("{:.1}ms", duration.as_secs_f64() * 1000.0);
        if !self.use_color {
            return text;
        }
        let color = match PerformanceLevel::from_duration(duration) {
            PerformanceLevel::Good => Color::Green,
            PerformanceLevel::Moderate => Color::Yellow,
            PerformanceLevel::Poor => Color::Red,
        };
        // Pad before coloring; escape codes would break column math.
        format!("{:>10}", text)
            .color(color)
            .to_string()
    }
}
