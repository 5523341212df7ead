//! Path query benchmarks on open and cluttered terrain.
//!
//! Run with: cargo bench -p skirmish-paths --bench find

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use skirmish_core::{PassGrid, Point, Vec3};
use skirmish_paths::{FinderConfig, PathFinder, PathRequest, TimedPathFinder, find_batch};

const SIZES: &[i32] = &[32, 64, 128];

/// Random walls with the two far corners kept open.
fn cluttered(size: i32, seed: u64) -> PassGrid {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut grid = PassGrid::open(size, size).unwrap();
    for p in grid.bounds().iter().collect::<Vec<_>>() {
        if rng.random_bool(0.25) {
            grid.set(p, false);
        }
    }
    grid.set(Point::new(0, 0), true);
    grid.set(Point::new(size - 1, size - 1), true);
    grid
}

fn corners(size: i32) -> (Vec3, Vec3) {
    (Point::new(0, 0).center(), Point::new(size - 1, size - 1).center())
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    for &size in SIZES {
        let (start, end) = corners(size);

        let open = Arc::new(PassGrid::open(size, size).unwrap());
        group.bench_with_input(BenchmarkId::new("open", size), &open, |b, grid| {
            let mut finder = PathFinder::new(Arc::clone(grid));
            let mut path = Vec::new();
            b.iter(|| black_box(finder.find(&mut path, black_box(start), black_box(end))));
        });

        let walls = Arc::new(cluttered(size, 1));
        group.bench_with_input(BenchmarkId::new("cluttered", size), &walls, |b, grid| {
            let mut finder = PathFinder::new(Arc::clone(grid));
            let mut path = Vec::new();
            b.iter(|| black_box(finder.find(&mut path, black_box(start), black_box(end))));
        });

        group.bench_with_input(
            BenchmarkId::new("cluttered_simplified", size),
            &walls,
            |b, grid| {
                let config = FinderConfig::default().with_simplify(true);
                let mut finder = PathFinder::with_config(Arc::clone(grid), config);
                let mut path = Vec::new();
                b.iter(|| black_box(finder.find(&mut path, black_box(start), black_box(end))));
            },
        );

        group.bench_with_input(BenchmarkId::new("timed", size), &walls, |b, grid| {
            let mut finder = TimedPathFinder::new(Arc::clone(grid));
            let mut path = Vec::new();
            b.iter(|| black_box(finder.find(&mut path, black_box(start), black_box(end))));
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let size = 64;
    let grid = Arc::new(cluttered(size, 2));
    let mut rng = SmallRng::seed_from_u64(3);
    let requests: Vec<PathRequest> = (0..256)
        .map(|_| {
            let a = Point::new(rng.random_range(0..size), rng.random_range(0..size));
            let b = Point::new(rng.random_range(0..size), rng.random_range(0..size));
            PathRequest::new(a.center(), b.center())
        })
        .collect();

    c.bench_function("find_batch_256", |b| {
        b.iter(|| black_box(find_batch(&grid, FinderConfig::default(), &requests)));
    });
}

criterion_group!(benches, bench_find, bench_batch);
criterion_main!(benches);
