//! Performance benchmarks for the function latency tester
//!
//! Measures the in-process hot paths around a run: sample collection and
//! merging, work distribution, the statistics pass over a collected window,
//! and the configuration pipeline. Nothing here touches the network.

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use clap::Parser;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use function_latency_tester::{
    cli::Cli,
    config::ConfigParser,
    executor::{per_worker_share, SampleCollector},
    models::{Config, RunConfig, Sample, SampleSet},
    stats::StatisticsEngine,
};

/// Build a window of samples with a spread of durations
fn sample_window(count: usize) -> Vec<Sample> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let start = base + ChronoDuration::milliseconds(i as i64);
            let end = start + ChronoDuration::milliseconds(10 + (i as i64 % 90));
            Sample::new(start, end).unwrap()
        })
        .collect()
}

/// Benchmark per-worker sample recording and the drain merge
fn benchmark_sample_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_collection");

    group.bench_function("record_1000_across_4_workers", |b| {
        let samples = sample_window(1000);
        b.iter(|| {
            let collector = SampleCollector::new(4, 250);
            for (i, sample) in samples.iter().enumerate() {
                collector.record(i % 4, *sample);
            }
            black_box(collector.len());
        });
    });

    group.bench_function("drain_merges_worker_buffers", |b| {
        let samples = sample_window(1000);
        b.iter(|| {
            let collector = SampleCollector::new(8, 125);
            for (i, sample) in samples.iter().enumerate() {
                collector.record(i % 8, *sample);
            }
            let merged = collector.drain();
            black_box(merged.len());
        });
    });

    group.finish();
}

/// Benchmark the work distribution arithmetic
fn benchmark_work_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("work_distribution");

    group.bench_function("per_worker_share", |b| {
        let run_config = RunConfig::new(100_000, 64, "fn-01".to_string()).unwrap();
        b.iter(|| {
            black_box(per_worker_share(black_box(&run_config)));
        });
    });

    group.finish();
}

/// Benchmark the statistics pass over windows of different sizes
fn benchmark_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for size in [10usize, 100, 1_000, 10_000] {
        let samples = SampleSet::new(sample_window(size));

        group.bench_with_input(BenchmarkId::new("analyze", size), &size, |b, _| {
            let engine = StatisticsEngine::new(4);
            b.iter(|| {
                let stats = engine.analyze(black_box(&samples)).unwrap();
                black_box(stats);
            });
        });

        group.bench_with_input(BenchmarkId::new("sort_window", size), &size, |b, _| {
            b.iter(|| {
                black_box(samples.sorted_by_duration());
            });
        });
    }

    group.finish();
}

/// Benchmark configuration parsing and validation
fn benchmark_config_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");

    group.bench_function("parse_cli_args", |b| {
        let args = vec![
            "flt",
            "--app",
            "myapp",
            "--function",
            "myfn",
            "--count",
            "100",
            "--workers",
            "4",
        ];
        b.iter(|| {
            let cli = Cli::try_parse_from(black_box(&args)).unwrap();
            black_box(cli);
        });
    });

    group.bench_function("validate_config", |b| {
        let config = Config {
            app_name: "myapp".to_string(),
            function_name: "myfn".to_string(),
            ..Config::default()
        };
        b.iter(|| {
            let result = config.validate();
            black_box(result);
        });
    });

    group.bench_function("parse_from_cli", |b| {
        let cli = Cli::try_parse_from(vec![
            "flt", "--app", "myapp", "--function", "myfn", "--count", "100",
        ])
        .unwrap();

        b.iter(|| {
            let parser = ConfigParser::new(black_box(cli.clone()));
            let config = parser.parse().unwrap();
            black_box(config);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sample_collection,
    benchmark_work_distribution,
    benchmark_statistics,
    benchmark_config_parsing
);
criterion_main!(benches);
