//! Benchmarks for multistats
//!
//! Run with: cargo bench

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use multistats::multivariate::{MultivariateSummary, SynchronizedSummary};
use multistats::storeless::{GeometricMean, Mean, Sum};
use multistats::traits::StorelessStatistic;

fn row(i: u64, dimension: usize) -> Vec<f64> {
    (0..dimension).map(|d| (i % 1000) as f64 + d as f64 + 1.0).collect()
}

// ============================================================================
// Storeless Statistic Benchmarks
// ============================================================================

fn bench_storeless(c: &mut Criterion) {
    let mut group = c.benchmark_group("storeless");
    group.throughput(Throughput::Elements(1));

    group.bench_function("sum_increment", |b| {
        let mut sum = Sum::new();
        let mut i = 0u64;
        b.iter(|| {
            sum.increment(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("mean_increment", |b| {
        let mut mean = Mean::new();
        let mut i = 0u64;
        b.iter(|| {
            mean.increment(i as f64);
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("geometric_mean_increment", |b| {
        let mut geo = GeometricMean::new();
        let mut i = 1u64;
        b.iter(|| {
            geo.increment(i as f64);
            i = i.wrapping_add(1).max(1);
        });
    });

    group.finish();
}

// ============================================================================
// Multivariate Summary Benchmarks
// ============================================================================

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("multivariate_summary");
    group.throughput(Throughput::Elements(1));

    for dimension in [2, 8, 32] {
        group.bench_with_input(
            BenchmarkId::new("add_value", dimension),
            &dimension,
            |b, &dimension| {
                let mut summary = MultivariateSummary::new(dimension, true).unwrap();
                let rows: Vec<Vec<f64>> = (0..1024).map(|i| row(i, dimension)).collect();
                let mut i = 0usize;
                b.iter(|| {
                    summary.add_value(black_box(&rows[i & 1023])).unwrap();
                    i = i.wrapping_add(1);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("covariance", dimension),
            &dimension,
            |b, &dimension| {
                let mut summary = MultivariateSummary::new(dimension, true).unwrap();
                for i in 0..10_000 {
                    summary.add_value(&row(i, dimension)).unwrap();
                }
                b.iter(|| black_box(summary.covariance().unwrap()));
            },
        );
    }

    group.bench_function("query_all", |b| {
        let mut summary = MultivariateSummary::new(4, true).unwrap();
        for i in 0..100_000 {
            summary.add_value(&row(i, 4)).unwrap();
        }
        b.iter(|| {
            black_box(summary.mean().unwrap());
            black_box(summary.standard_deviation().unwrap());
            black_box(summary.geometric_mean().unwrap());
            black_box(summary.min().unwrap());
            black_box(summary.max().unwrap());
        });
    });

    group.finish();
}

// ============================================================================
// Synchronized Summary Benchmarks
// ============================================================================

fn bench_synchronized(c: &mut Criterion) {
    let mut group = c.benchmark_group("synchronized_summary");

    group.throughput(Throughput::Elements(1));
    group.bench_function("add_value_uncontended", |b| {
        let summary = SynchronizedSummary::new(4, true).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            summary.add_value(&row(i, 4)).unwrap();
            i = i.wrapping_add(1);
        });
    });

    for threads in [2usize, 4] {
        let per_thread = 10_000u64;
        group.throughput(Throughput::Elements(threads as u64 * per_thread));
        group.bench_with_input(
            BenchmarkId::new("add_value_contended", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let summary = Arc::new(SynchronizedSummary::new(4, true).unwrap());
                    let handles: Vec<_> = (0..threads)
                        .map(|_| {
                            let summary = Arc::clone(&summary);
                            thread::spawn(move || {
                                for i in 0..per_thread {
                                    summary.add_value(&row(i, 4)).unwrap();
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(summary.n())
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(benches, bench_storeless, bench_summary, bench_synchronized);
criterion_main!(benches);
