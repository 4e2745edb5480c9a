//! Performance measurement for free-rectangle tiling enumeration

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use shikaku::algorithm::search::Solver;
use shikaku::board::geometry::Extent;
use std::hint::black_box;

/// Measures cold enumeration cost as the rectangle grows
fn bench_enumerate_tilings(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_tilings");

    for side in &[2_usize, 3] {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &side| {
            b.iter(|| {
                let mut solver = Solver::new();
                let tilings = solver.free_rectangle_tilings(Extent::new(side, side));
                black_box(tilings.map(|t| t.len()).unwrap_or(0));
            });
        });
    }

    group.finish();
}

/// Measures the cached path for a shape enumerated once up front
fn bench_cached_lookup(c: &mut Criterion) {
    let mut solver = Solver::new();
    if solver.free_rectangle_tilings(Extent::new(3, 3)).is_err() {
        return;
    }

    c.bench_function("cached_lookup", |b| {
        b.iter(|| {
            let tilings = solver.free_rectangle_tilings(Extent::new(3, 3));
            black_box(tilings.map(|t| t.len()).unwrap_or(0));
        });
    });
}

criterion_group!(benches, bench_enumerate_tilings, bench_cached_lookup);
criterion_main!(benches);
