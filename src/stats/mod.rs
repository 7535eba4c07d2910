//! Statistical analysis engine for invocation latency runs

use crate::{
    error::{AppError, Result},
    models::{Sample, SampleSet},
    types::PerformanceLevel,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Latency figures computed once from a completed run.
///
/// Every field is expressed as a duration, including the variance: its
/// nanosecond count carries a squared-nanosecond magnitude, which keeps
/// the whole result in one unit family at the cost of that quirk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyStatistics {
    /// Fastest sample after trimming
    pub min: Duration,
    /// Slowest sample after trimming
    pub max: Duration,
    /// Arithmetic mean of the trimmed samples
    pub mean: Duration,
    /// Sample at index `n / 2` of the sorted trimmed sequence; for
    /// even-length sets this is the upper median, never an interpolation
    pub median: Duration,
    /// Population standard deviation
    pub std_dev: Duration,
    /// Population variance (squared-nanosecond magnitude, see above)
    pub variance: Duration,
    /// Samples the figures were computed over, after trimming
    pub sample_count: usize,
    /// Slowest samples excluded as cold-start outliers
    pub trimmed_count: usize,
}

impl LatencyStatistics {
    /// Classify the run by its mean latency
    pub fn performance_level(&self) -> PerformanceLevel {
        PerformanceLevel::from_duration(self.mean)
    }
}

/// Statistics engine for one run.
///
/// The worker count doubles as the trim width: the slowest `worker_count`
/// samples are assumed to carry cold-start or connection-establishment
/// cost correlated with pool size, and are dropped before computing.
pub struct StatisticsEngine {
    worker_count: u32,
}

impl StatisticsEngine {
    /// Create an engine trimming by the given pool size
    pub fn new(worker_count: u32) -> Self {
        Self { worker_count }
    }

    /// Width of the trim window
    pub fn trim_width(&self) -> u32 {
        self.worker_count
    }

    /// Compute latency statistics over a completed sample set.
    ///
    /// Sorts ascending by duration, drops the slowest `worker_count`
    /// samples when the set is strictly larger than the pool, and computes
    /// over what remains. Sets no larger than the pool are kept whole; the
    /// degenerate small run still gets statistics, just untrimmed ones.
    pub fn analyze(&self, samples: &SampleSet) -> Result<LatencyStatistics> {
        if samples.is_empty() {
            return Err(AppError::insufficient_samples(
                "no samples were recorded; statistics cannot be computed",
            ));
        }

        let mut sorted = samples.sorted_by_duration();
        let trimmed_count = if sorted.len() > self.worker_count as usize {
            self.worker_count as usize
        } else {
            0
        };
        sorted.truncate(sorted.len() - trimmed_count);

        Ok(Self::compute(&sorted, trimmed_count))
    }

    /// Compute the figures over a sorted, non-empty slice
    fn compute(sorted: &[Sample], trimmed_count: usize) -> LatencyStatistics {
        let n = sorted.len() as f64;
        let durations_ns: Vec<f64> = sorted.iter().map(Sample::duration_ns).collect();

        let mean_ns = durations_ns.iter().sum::<f64>() / n;
        let variance_ns = durations_ns
            .iter()
            .map(|d| (d - mean_ns).powi(2))
            .sum::<f64>()
            / n;
        let std_dev_ns = variance_ns.sqrt();

        LatencyStatistics {
            min: sorted.first().map(Sample::duration).unwrap_or(Duration::ZERO),
            max: sorted.last().map(Sample::duration).unwrap_or(Duration::ZERO),
            mean: Duration::from_nanos(mean_ns.round() as u64),
            median: sorted
                .get(sorted.len() / 2)
                .map(Sample::duration)
                .unwrap_or(Duration::ZERO),
            std_dev: Duration::from_nanos(std_dev_ns.round() as u64),
            variance: Duration::from_nanos(variance_ns.round() as u64),
            sample_count: sorted.len(),
            trimmed_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap() + chrono::Duration::milliseconds(ms)
    }

    fn sample_with_ms(duration_ms: u64) -> Sample {
        Sample::new(at(0), at(duration_ms as i64)).unwrap()
    }

    fn set_of_ms(durations_ms: &[u64]) -> SampleSet {
        SampleSet::new(durations_ms.iter().map(|&ms| sample_with_ms(ms)).collect())
    }

    #[test]
    fn test_empty_set_is_insufficient() {
        let engine = StatisticsEngine::new(2);
        let result = engine.analyze(&SampleSet::default());

        assert!(matches!(
            result.unwrap_err(),
            AppError::InsufficientSamples(_)
        ));
    }

    #[test]
    fn test_canonical_two_worker_run() {
        // 10 samples from 2 workers: the two slowest (90, 100) are trimmed
        // and the figures come from [10..80].
        let set = set_of_ms(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
        let stats = StatisticsEngine::new(2).analyze(&set).unwrap();

        assert_eq!(stats.sample_count, 8);
        assert_eq!(stats.trimmed_count, 2);
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(80));
        assert_eq!(stats.mean, Duration::from_millis(45));
        assert_eq!(stats.median, Duration::from_millis(50));

        // Population variance of [10..80] ms is 525 ms^2.
        assert_eq!(stats.variance, Duration::from_nanos(525_000_000_000_000));
        let std_ms = stats.std_dev.as_secs_f64() * 1000.0;
        assert!((std_ms - 525.0_f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_small_set_is_not_trimmed() {
        let set = set_of_ms(&[30, 10, 20]);
        let stats = StatisticsEngine::new(5).analyze(&set).unwrap();

        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.trimmed_count, 0);
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(30));
        assert_eq!(stats.mean, Duration::from_millis(20));
        // n/2 = 1 in the sorted view [10, 20, 30].
        assert_eq!(stats.median, Duration::from_millis(20));
    }

    #[test]
    fn test_set_equal_to_pool_size_is_kept_whole() {
        let set = set_of_ms(&[10, 20, 30]);
        let stats = StatisticsEngine::new(3).analyze(&set).unwrap();

        assert_eq!(stats.trimmed_count, 0);
        assert_eq!(stats.sample_count, 3);
        assert_eq!(stats.max, Duration::from_millis(30));
    }

    #[test]
    fn test_one_sample_survives_maximal_trim() {
        let set = set_of_ms(&[10, 20, 30, 40]);
        let stats = StatisticsEngine::new(3).analyze(&set).unwrap();

        assert_eq!(stats.trimmed_count, 3);
        assert_eq!(stats.sample_count, 1);
        assert_eq!(stats.min, Duration::from_millis(10));
        assert_eq!(stats.max, Duration::from_millis(10));
        assert_eq!(stats.mean, Duration::from_millis(10));
        assert_eq!(stats.median, Duration::from_millis(10));
        assert_eq!(stats.std_dev, Duration::ZERO);
        assert_eq!(stats.variance, Duration::ZERO);
    }

    #[test]
    fn test_even_length_median_is_the_upper_middle() {
        // Sorted view [10, 20, 30, 40]; n/2 = 2 picks 30, not (20+30)/2.
        let set = set_of_ms(&[40, 10, 30, 20]);
        let stats = StatisticsEngine::new(10).analyze(&set).unwrap();

        assert_eq!(stats.median, Duration::from_millis(30));
    }

    #[test]
    fn test_identical_samples_have_zero_spread() {
        let set = set_of_ms(&[25, 25, 25, 25, 25]);
        let stats = StatisticsEngine::new(1).analyze(&set).unwrap();

        assert_eq!(stats.sample_count, 4);
        assert_eq!(stats.mean, Duration::from_millis(25));
        assert_eq!(stats.std_dev, Duration::ZERO);
        assert_eq!(stats.variance, Duration::ZERO);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let forward = set_of_ms(&[10, 20, 30, 40, 50, 60]);
        let shuffled = set_of_ms(&[40, 10, 60, 30, 50, 20]);
        let engine = StatisticsEngine::new(2);

        assert_eq!(
            engine.analyze(&forward).unwrap(),
            engine.analyze(&shuffled).unwrap()
        );
    }

    #[test]
    fn test_performance_level_follows_the_mean() {
        let fast = StatisticsEngine::new(1).analyze(&set_of_ms(&[5, 10])).unwrap();
        assert_eq!(fast.performance_level(), PerformanceLevel::Good);

        let slow = StatisticsEngine::new(1)
            .analyze(&set_of_ms(&[2000, 3000]))
            .unwrap();
        assert_eq!(slow.performance_level(), PerformanceLevel::Poor);
    }

    proptest! {
        #[test]
        fn prop_extremes_bound_the_middle(
            durations_ms in prop::collection::vec(1u64..5_000, 1..200),
            workers in 1u32..=64,
        ) {
            let set = set_of_ms(&durations_ms);
            let stats = StatisticsEngine::new(workers).analyze(&set).unwrap();

            prop_assert!(stats.min <= stats.median);
            prop_assert!(stats.median <= stats.max);
            prop_assert!(stats.min <= stats.mean);
            prop_assert!(stats.mean <= stats.max);
        }

        #[test]
        fn prop_trim_drops_exactly_the_pool_width_or_nothing(
            durations_ms in prop::collection::vec(1u64..5_000, 1..200),
            workers in 1u32..=64,
        ) {
            let set = set_of_ms(&durations_ms);
            let stats = StatisticsEngine::new(workers).analyze(&set).unwrap();

            if durations_ms.len() > workers as usize {
                prop_assert_eq!(stats.trimmed_count, workers as usize);
                prop_assert_eq!(stats.sample_count, durations_ms.len() - workers as usize);
            } else {
                prop_assert_eq!(stats.trimmed_count, 0);
                prop_assert_eq!(stats.sample_count, durations_ms.len());
            }
        }

        #[test]
        fn prop_trim_removes_the_slowest_samples(
            durations_ms in prop::collection::vec(1u64..5_000, 2..200),
            workers in 1u32..=64,
        ) {
            let set = set_of_ms(&durations_ms);
            let stats = StatisticsEngine::new(workers).analyze(&set).unwrap();

            let mut sorted = durations_ms.clone();
            sorted.sort_unstable();
            let kept = &sorted[..sorted.len() - stats.trimmed_count];

            prop_assert_eq!(stats.min, Duration::from_millis(sorted[0]));
            prop_assert_eq!(stats.max, Duration::from_millis(kept[kept.len() - 1]));
        }

        #[test]
        fn prop_statistics_are_order_invariant(
            durations_ms in prop::collection::vec(1u64..5_000, 1..100),
            workers in 1u32..=16,
        ) {
            let engine = StatisticsEngine::new(workers);
            let forward = engine.analyze(&set_of_ms(&durations_ms)).unwrap();

            let mut reversed = durations_ms.clone();
            reversed.reverse();
            let backward = engine.analyze(&set_of_ms(&reversed)).unwrap();

            prop_assert_eq!(forward, backward);
        }
    }
}
