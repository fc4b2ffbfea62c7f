//! Criterion benchmarks for the tour heuristics.
//!
//! Measures nearest-neighbour construction and the 2-opt sweep across
//! problem sizes up to the twenty-point ceiling.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package waypoint-solver
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use waypoint_core::{GreatCircleFallback, MAX_POINTS};
use waypoint_solver::{solve_nearest_neighbour, solve_two_opt};


use bench_support::{BENCHMARK_SEED, generate_points};

/// Problem sizes to benchmark.
const PROBLEM_SIZES: &[usize] = &[5, 10, MAX_POINTS];

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("tour");

    for &size in PROBLEM_SIZES {
        // Pre-generate inputs outside the benchmark loop.
        let points = generate_points(size, BENCHMARK_SEED);
        let matrix = GreatCircleFallback.matrix(&points);

        #[expect(
            clippy::as_conversions,
            reason = "Safe conversion for small problem sizes"
        )]
        let throughput_size = size as u64;
        group.throughput(Throughput::Elements(throughput_size));
        group.bench_with_input(
            BenchmarkId::new("nearest_neighbour", size),
            &size,
            |b, _| {
                b.iter(|| {
                    #[expect(
                        clippy::let_underscore_must_use,
                        reason = "Benchmarking construction performance, result is discarded"
                    )]
                    let _ = solve_nearest_neighbour(&points, &matrix);
                });
            },
        );
        group.bench_with_input(BenchmarkId::new("two_opt", size), &size, |b, _| {
            b.iter(|| {
                #[expect(
                    clippy::let_underscore_must_use,
                    reason = "Benchmarking refinement performance, result is discarded"
                )]
                let _ = solve_two_opt(&points, &matrix);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_heuristics);
criterion_main!(benches);
