//! Criterion benchmarks for the sieve strategies.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gprime_bench::{batch_windows, reference_disk, reference_window};
use gprime_sieve::batch::count_windows;
use gprime_sieve::engine::run;
use gprime_sieve::{
    DonutSieve, OctantSieve, RecursiveOracle, Sector, SectorSieve, WindowDonutSieve, WindowSieve,
};
use std::hint::black_box;

/// Octant against wheel-packed full-disk sieve.
fn bench_full_disk(c: &mut Criterion) {
    let oracle = RecursiveOracle::builtin().unwrap();
    let bound = reference_disk();
    let mut group = c.benchmark_group("full_disk");
    group.sample_size(20);
    group.bench_function("octant", |b| {
        b.iter(|| {
            let mut s = OctantSieve::new(bound);
            black_box(run(&mut s, &oracle).unwrap().count)
        });
    });
    group.bench_function("donut", |b| {
        b.iter(|| {
            let mut s = DonutSieve::new(bound);
            black_box(run(&mut s, &oracle).unwrap().count)
        });
    });
    group.finish();
}

/// Plain against wheel-packed window sieve.
fn bench_window(c: &mut Criterion) {
    let oracle = RecursiveOracle::builtin().unwrap();
    let window = reference_window().unwrap();
    let mut group = c.benchmark_group("window");
    group.bench_function("flags", |b| {
        b.iter(|| {
            let mut s = WindowSieve::new(window);
            black_box(run(&mut s, &oracle).unwrap().count)
        });
    });
    group.bench_function("donut", |b| {
        b.iter(|| {
            let mut s = WindowDonutSieve::new(window).unwrap();
            black_box(run(&mut s, &oracle).unwrap().count)
        });
    });
    group.finish();
}

/// A 0.1 rad sector of the reference disk.
fn bench_sector(c: &mut Criterion) {
    let oracle = RecursiveOracle::builtin().unwrap();
    let sector = Sector::new(reference_disk(), 0.3, 0.4).unwrap();
    c.bench_function("sector_0_1_rad", |b| {
        b.iter(|| {
            let mut s = SectorSieve::new(sector);
            black_box(run(&mut s, &oracle).unwrap().count)
        });
    });
}

/// Worker scaling over 16 windows.
fn bench_batch(c: &mut Criterion) {
    let oracle = RecursiveOracle::builtin().unwrap();
    let windows = batch_windows(1_000_000, 0, 200, 200, 16).unwrap();
    let mut group = c.benchmark_group("batch_16_windows");
    for workers in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &w| {
            b.iter(|| black_box(count_windows(&windows, w, &oracle).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_full_disk, bench_window, bench_sector, bench_batch);
criterion_main!(benches);
