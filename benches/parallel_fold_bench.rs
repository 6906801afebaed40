//! Benchmark for parallel fold over PersistentList.
//!
//! The per-element work is deliberately CPU-heavy: for cheap folds such as
//! a plain sum, partitioning and thread synchronization dominate.
//!
//! Requires the `rayon` feature to be enabled.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fncore::persistent::PersistentList;
use std::hint::black_box;

/// Mixes `input` through 64 rounds of rotations and additions.
#[inline(never)]
fn mix(input: u64) -> u64 {
    let mut state = [input, 0x6a09_e667_bb67_ae85, 0x3c6e_f372_a54f_f53a];
    for round in 0..64 {
        let next = state[2]
            .wrapping_add(state[1].rotate_right(6) ^ state[1].rotate_right(11))
            .wrapping_add(round);
        state[2] = state[1];
        state[1] = state[0].wrapping_add(next);
        state[0] = next.rotate_left(13);
    }
    state[0] ^ state[1] ^ state[2]
}

fn benchmark_fold_depths(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("par_fold_left");
    let pool = rayon::ThreadPoolBuilder::new().build().unwrap();
    let list: PersistentList<u64> = (0..20_000).collect();

    group.bench_function("sequential", |bencher| {
        bencher.iter(|| black_box(list.fold_left(0_u64, |hash, x| hash ^ mix(*x))));
    });

    for depth in [1, 3, 6] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |bencher, &depth| {
            bencher.iter(|| {
                black_box(list.par_fold_left_with_depth(
                    &pool,
                    depth,
                    0_u64,
                    |hash, x| hash ^ mix(*x),
                    |left, right| left ^ right,
                ))
            });
        });
    }

    group.finish();
}

fn benchmark_par_map(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("par_map");
    let pool = rayon::ThreadPoolBuilder::new().build().unwrap();
    let list: PersistentList<u64> = (0..20_000).collect();

    group.bench_function("sequential", |bencher| {
        bencher.iter(|| black_box(list.map(|x| mix(*x))));
    });

    group.bench_function("parallel", |bencher| {
        bencher.iter(|| black_box(list.par_map(&pool, |x| mix(*x))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_fold_depths, benchmark_par_map);
criterion_main!(benches);
