//! Block-matching benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use oxicodec_core::GrayImage;
use oxicodec_motion::{MotionEstimator, compensate};
use std::hint::black_box;

fn world(x: usize, y: usize) -> u8 {
    (128.0 + 40.0 * (x as f64 / 8.0).sin() + 40.0 * (y as f64 / 8.0).cos()) as u8
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("motion");
    let reference = GrayImage::from_fn(128, 128, world).unwrap();
    let current = GrayImage::from_fn(128, 128, |x, y| world(x + 3, y + 1)).unwrap();

    for window in [2usize, 4, 8] {
        let estimator = MotionEstimator::new(8, window).unwrap();
        group.bench_with_input(BenchmarkId::new("estimate", window), &estimator, |b, est| {
            b.iter(|| black_box(est.estimate(black_box(&reference), black_box(&current)).unwrap()));
        });
    }

    let field = MotionEstimator::default().estimate(&reference, &current).unwrap();
    group.bench_function("compensate", |b| {
        b.iter(|| black_box(compensate(black_box(&reference), &field, 8).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_estimate);
criterion_main!(benches);
