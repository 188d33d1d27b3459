//! Frame Search Benchmarks
//!
//! Benchmarks for the recursive frame search over mock frame trees of
//! growing depth and breadth. Each batch gets a fresh driver since the mock
//! keeps a call log and implicit-wait history that grow with every search.
//!
//! Run with: `cargo bench --bench frame_search`

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::time::Duration;
use surefoot::mock::MockDriver;
use surefoot::prelude::*;

/// `breadth` named frames per level, `depth` levels, target in the last
/// frame of the deepest level
fn frame_tree(depth: usize, breadth: usize) -> MockDriver {
    let driver = MockDriver::new();
    let mut level = vec![driver.root()];
    for d in 0..depth {
        let mut next = Vec::new();
        for doc in &level {
            for b in 0..breadth {
                let (_, inner) = driver.add_frame(*doc, Some(&format!("frame-{d}-{b}")));
                next.push(inner);
            }
        }
        level = next;
    }
    if let Some(last) = level.last() {
        let _ = driver.add_frame(*last, Some("target"));
    }
    driver
}

fn bench_search_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_depth");
    let search = FrameSearch::new().with_probe_wait(Duration::ZERO);

    for depth in [1, 3, 6, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bench, &depth| {
            bench.iter_batched(
                || frame_tree(depth, 1),
                |driver| {
                    let found = search.search(&driver, black_box("target")).unwrap();
                    black_box(found);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_search_breadth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_breadth");
    let search = FrameSearch::new().with_probe_wait(Duration::ZERO);

    for breadth in [2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(breadth),
            &breadth,
            |bench, &breadth| {
                bench.iter_batched(
                    || frame_tree(2, breadth),
                    |driver| {
                        let found = search.search(&driver, black_box("target")).unwrap();
                        black_box(found);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_search_miss(c: &mut Criterion) {
    let search = FrameSearch::new().with_probe_wait(Duration::ZERO);
    c.bench_function("search_miss", |bench| {
        bench.iter_batched(
            || frame_tree(3, 3),
            |driver| {
                let found = search.search(&driver, black_box("absent")).unwrap();
                black_box(found);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_search_depth,
    bench_search_breadth,
    bench_search_miss
);
criterion_main!(benches);
