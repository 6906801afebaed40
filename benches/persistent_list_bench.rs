//! Benchmark for PersistentList fold-derived operations.
//!
//! Compares the fold-based `map`, `filter`, `concat` and `co_fold_right`
//! against the equivalent `Vec` operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fncore::persistent::PersistentList;
use std::hint::black_box;

const SIZES: [i64; 3] = [100, 1000, 10000];

// =============================================================================
// cons Benchmark (prepend)
// =============================================================================

fn benchmark_cons(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("cons");

    for size in SIZES {
        group.bench_with_input(
            BenchmarkId::new("PersistentList", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut list = PersistentList::new();
                    for index in 0..size {
                        list = list.cons(black_box(index));
                    }
                    black_box(list)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// map / filter Benchmark
// =============================================================================

fn benchmark_map_filter(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("map_filter");

    for size in SIZES {
        let list: PersistentList<i64> = (0..size).collect();
        let vector: Vec<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("PersistentList", size), &list, |bencher, list| {
            bencher.iter(|| black_box(list.map(|x| x * 2).filter(|x| x % 3 == 0)));
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &vector, |bencher, vector| {
            bencher.iter(|| {
                black_box(
                    vector
                        .iter()
                        .map(|x| x * 2)
                        .filter(|x| x % 3 == 0)
                        .collect::<Vec<_>>(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// Fold Benchmark
// =============================================================================

fn benchmark_folds(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("folds");

    for size in SIZES {
        let list: PersistentList<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("fold_left", size), &list, |bencher, list| {
            bencher.iter(|| black_box(list.fold_left(0, |sum, x| sum + x)));
        });

        group.bench_with_input(BenchmarkId::new("co_fold_right", size), &list, |bencher, list| {
            bencher.iter(|| black_box(list.co_fold_right(0, |x, sum| sum + x)));
        });
    }

    group.finish();
}

// =============================================================================
// concat / divide Benchmark
// =============================================================================

fn benchmark_concat_divide(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("concat_divide");

    for size in SIZES {
        let list: PersistentList<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("concat", size), &list, |bencher, list| {
            bencher.iter(|| black_box(list.concat(list)));
        });

        group.bench_with_input(BenchmarkId::new("divide_6", size), &list, |bencher, list| {
            bencher.iter(|| black_box(list.divide(6)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_cons,
    benchmark_map_filter,
    benchmark_folds,
    benchmark_concat_divide
);

criterion_main!(benches);
