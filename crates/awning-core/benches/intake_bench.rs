//! Benchmarks for the scroll intake path.
//!
//! Measures the per-sample cost of coalescing and wheel accumulation under a
//! synthetic scroll storm, the hot path when a host forwards every scroll
//! listener callback.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use awning_core::scroll::{FrameGate, OffsetAccumulator, ScrollCoalescer};

fn bench_coalesce_storm(c: &mut Criterion) {
    c.bench_function("coalesce_10k_samples", |b| {
        b.iter(|| {
            let mut coalescer = ScrollCoalescer::new();
            let mut gate = FrameGate::new();
            for i in 0..10_000u32 {
                coalescer.push(black_box(f64::from(i)));
                gate.request();
            }
            if gate.take() {
                black_box(coalescer.take());
            }
        });
    });
}

fn bench_wheel_accumulation(c: &mut Criterion) {
    c.bench_function("accumulate_10k_deltas", |b| {
        b.iter(|| {
            let mut acc = OffsetAccumulator::new().with_max(50_000.0);
            for i in 0..10_000u32 {
                let delta = if i % 3 == 0 { -7.0 } else { 16.0 };
                black_box(acc.apply(black_box(delta)));
            }
            acc.offset()
        });
    });
}

criterion_group!(benches, bench_coalesce_storm, bench_wheel_accumulation);
criterion_main!(benches);
