//! Integration tests for parallel fold and map over PersistentList.
//!
//! Requires the `rayon` feature to be enabled.

#![cfg(feature = "rayon")]

use fncore::control::{FailureKind, Outcome};
use fncore::persistent::{DEFAULT_PARALLEL_DEPTH, PersistentList};
use rayon::ThreadPool;
use rstest::{fixture, rstest};

#[fixture]
fn pool() -> ThreadPool {
    rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap()
}

#[rstest]
fn test_parallel_sum_matches_sequential(
    pool: ThreadPool,
    #[values(1, 2, 3, 4, 5, 6)] depth: usize,
) {
    let list: PersistentList<i64> = (1..=100).collect();
    let sequential = list.fold_left(0, |sum, x| sum + x);
    let parallel = list.par_fold_left_with_depth(&pool, depth, 0, |sum, x| sum + x, |a, b| a + b);
    assert_eq!(sequential, 5050);
    assert_eq!(parallel, Outcome::success(sequential));
}

#[rstest]
fn test_default_depth(pool: ThreadPool) {
    assert_eq!(DEFAULT_PARALLEL_DEPTH, 6);
    let list: PersistentList<i64> = (1..=1000).collect();
    let parallel = list.par_fold_left(&pool, 0, |sum, x| sum + x, |a, b| a + b);
    assert_eq!(parallel, Outcome::success(500_500));
}

#[rstest]
fn test_non_commutative_combine_keeps_order(pool: ThreadPool) {
    let letters: PersistentList<char> = "abcdefghijklmnopqrstuvwxyz".chars().collect();
    let joined = letters.par_fold_left_with_depth(
        &pool,
        4,
        String::new(),
        |mut text, letter| {
            text.push(*letter);
            text
        },
        |left, right| left + &right,
    );
    assert_eq!(joined, Outcome::success("abcdefghijklmnopqrstuvwxyz".to_string()));
}

#[rstest]
fn test_par_map_matches_map(pool: ThreadPool, #[values(0, 1, 3, 6)] depth: usize) {
    let list: PersistentList<i32> = (0..257).collect();
    let parallel = list.par_map_with_depth(&pool, depth, |x| x * x);
    assert_eq!(parallel, Outcome::success(list.map(|x| x * x)));
}

#[rstest]
fn test_par_map_panic_becomes_single_failure(pool: ThreadPool) {
    let list: PersistentList<i32> = (1..=16).collect();
    let outcome = list.par_map_with_depth(&pool, 2, |x| {
        assert!(*x != 3, "cannot map 3");
        *x
    });
    match outcome {
        Outcome::Failure(failure) => {
            assert_eq!(failure.kind(), FailureKind::Panic);
            assert_eq!(failure.message(), "parallel fold failed in 1 of 4 partitions");
        }
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[rstest]
fn test_empty_list_maps_to_empty(pool: ThreadPool) {
    let list: PersistentList<i32> = PersistentList::new();
    assert_eq!(list.par_map(&pool, |x| x + 1), Outcome::success(PersistentList::new()));
}
