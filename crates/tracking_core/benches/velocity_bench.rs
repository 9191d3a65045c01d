//! Benchmark suite for velocity estimation.
//!
//! Run with: `cargo bench -p tracking_core`
//!
//! Measures:
//! - Smoothing filters on a single half (45 min at 25 Hz)
//! - Full estimator over 22 players with a half-time split

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracking_core::{
    smoothing::SmoothingFilter, TrackingTable, VelocityConfig, VelocityEstimator, PERIOD_COLUMN,
    TIME_COLUMN,
};

const FRAME_DT: f64 = 0.04;
const HALF_FRAMES: usize = 45 * 60 * 25;

/// Jittery velocity trace around a slow jog.
fn noisy_series(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.8).unwrap();
    (0..len)
        .map(|i| 3.0 + (i as f64 * 0.01).sin() + noise.sample(&mut rng))
        .collect()
}

/// Full-match table with 11 players per side.
fn match_table(frames_per_half: usize) -> TrackingTable {
    let rows = frames_per_half * 2;
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let jitter = Normal::new(0.0, 0.03).unwrap();

    let mut columns: Vec<(String, Vec<f64>)> = vec![
        (TIME_COLUMN.to_string(), (0..rows).map(|i| i as f64 * FRAME_DT).collect()),
        (
            PERIOD_COLUMN.to_string(),
            (0..rows)
                .map(|i| if i < frames_per_half { 1.0 } else { 2.0 })
                .collect(),
        ),
    ];
    for team in ["Home", "Away"] {
        for num in 1..=11 {
            let x: Vec<f64> = (0..rows)
                .map(|i| 52.5 + 30.0 * (i as f64 * 0.002 + num as f64).sin() + jitter.sample(&mut rng))
                .collect();
            let y: Vec<f64> = (0..rows)
                .map(|i| 34.0 + 20.0 * (i as f64 * 0.003 + num as f64).cos() + jitter.sample(&mut rng))
                .collect();
            columns.push((format!("{team}_{num}_x"), x));
            columns.push((format!("{team}_{num}_y"), y));
        }
    }
    TrackingTable::from_columns(columns).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoothing_filters");
    let series = noisy_series(HALF_FRAMES, 7);
    group.throughput(Throughput::Elements(series.len() as u64));

    for window in [5usize, 7, 15] {
        let sg = SmoothingFilter::SavitzkyGolay { window, poly_order: 1 };
        group.bench_with_input(BenchmarkId::new("savitzky_golay", window), &sg, |b, f| {
            b.iter(|| f.smooth(black_box(&series)))
        });

        let ma = SmoothingFilter::MovingAverage { window };
        group.bench_with_input(BenchmarkId::new("moving_average", window), &ma, |b, f| {
            b.iter(|| f.smooth(black_box(&series)))
        });
    }
    group.finish();
}

fn bench_estimator(c: &mut Criterion) {
    let mut group = c.benchmark_group("velocity_estimator");
    group.sample_size(10);

    let table = match_table(HALF_FRAMES / 10);
    group.throughput(Throughput::Elements(table.len() as u64));

    for (name, config) in [
        ("raw", VelocityConfig::raw()),
        ("savitzky_golay", VelocityConfig::default()),
        ("moving_average", VelocityConfig::moving_average(7)),
    ] {
        let estimator = VelocityEstimator::new(config);
        group.bench_function(name, |b| {
            b.iter(|| estimator.estimate(black_box(table.clone())).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_filters, bench_estimator);
criterion_main!(benches);
