//! Parallel fold and map over [`PersistentList`] on a caller-supplied pool.
//!
//! The list is bisected with [`PersistentList::divide`] into at most
//! `2^depth` contiguous partitions. Each partition becomes one unit of work
//! on the pool; the caller's thread waits for every unit and then combines
//! the partial results left to right in partition order. The combining
//! function therefore only needs to be associative, not commutative.
//!
//! A unit that panics does not abort the others. Once all units have run,
//! any panic is reported as one aggregate [`Failure`] and every partial
//! result is discarded. A panic in the combining function is a [`Failure`]
//! as well.
//!
//! # Examples
//!
//! ```rust
//! use fncore::control::Outcome;
//! use fncore::persistent::PersistentList;
//!
//! let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
//! let list: PersistentList<i64> = (1..=100).collect();
//!
//! let sum = list.par_fold_left(&pool, 0, |sum, x| sum + x, |left, right| left + right);
//! assert_eq!(sum, Outcome::success(5050));
//! ```

use rayon::ThreadPool;

use super::PersistentList;
use crate::control::{Failure, FailureKind, Outcome, capture};

/// Bisection depth used by [`PersistentList::par_fold_left`] and
/// [`PersistentList::par_map`], giving up to 64 partitions.
pub const DEFAULT_PARALLEL_DEPTH: usize = 6;

impl<T> PersistentList<T>
where
    T: Clone + Send + Sync,
{
    /// Folds every partition on `pool` with `fold`, then combines the partial
    /// results with `combine`, starting from `identity`.
    ///
    /// `identity` must be an identity of `combine`, and `combine` must be
    /// associative, for the result to equal the sequential
    /// [`fold_left`](PersistentList::fold_left).
    pub fn par_fold_left<U, F, G>(
        &self,
        pool: &ThreadPool,
        identity: U,
        fold: F,
        combine: G,
    ) -> Outcome<U>
    where
        U: Clone + Send + Sync,
        F: Fn(U, &T) -> U + Sync,
        G: FnMut(U, U) -> U,
    {
        self.par_fold_left_with_depth(pool, DEFAULT_PARALLEL_DEPTH, identity, fold, combine)
    }

    /// [`par_fold_left`](PersistentList::par_fold_left) with an explicit
    /// bisection depth.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    /// use fncore::persistent::PersistentList;
    ///
    /// let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    /// let words: PersistentList<String> = PersistentList::from_separated("a b c d", " ");
    ///
    /// // String concatenation is associative but not commutative.
    /// let joined = words.par_fold_left_with_depth(
    ///     &pool,
    ///     2,
    ///     String::new(),
    ///     |text, word| text + word,
    ///     |left, right| left + &right,
    /// );
    /// assert_eq!(joined, Outcome::success("abcd".to_string()));
    /// ```
    pub fn par_fold_left_with_depth<U, F, G>(
        &self,
        pool: &ThreadPool,
        depth: usize,
        identity: U,
        fold: F,
        combine: G,
    ) -> Outcome<U>
    where
        U: Clone + Send + Sync,
        F: Fn(U, &T) -> U + Sync,
        G: FnMut(U, U) -> U,
    {
        let seed = identity.clone();
        let partials = run_partitions(pool, &self.divide(depth), |partition| {
            partition.fold_left(seed.clone(), |accumulator, element| fold(accumulator, element))
        });
        let combined = partials.and_then(|partials| {
            capture(|| partials.into_iter().fold(identity, combine)).map_err(|failure| {
                tracing::debug!(cause = %failure, "combining partial results failed");
                failure.with_context("parallel fold failed while combining partial results")
            })
        });
        match combined {
            Ok(result) => Outcome::Success(result),
            Err(failure) => Outcome::Failure(failure),
        }
    }

    /// Maps every element on `pool`, one unit of work per partition, and
    /// concatenates the mapped partitions in their original order.
    pub fn par_map<U, F>(&self, pool: &ThreadPool, function: F) -> Outcome<PersistentList<U>>
    where
        U: Clone + Send + Sync,
        F: Fn(&T) -> U + Sync,
    {
        self.par_map_with_depth(pool, DEFAULT_PARALLEL_DEPTH, function)
    }

    /// [`par_map`](PersistentList::par_map) with an explicit bisection depth.
    pub fn par_map_with_depth<U, F>(
        &self,
        pool: &ThreadPool,
        depth: usize,
        function: F,
    ) -> Outcome<PersistentList<U>>
    where
        U: Clone + Send + Sync,
        F: Fn(&T) -> U + Sync,
    {
        match run_partitions(pool, &self.divide(depth), |partition| partition.map(&function)) {
            Ok(mapped) => Outcome::Success(mapped.into_iter().collect::<PersistentList<_>>().flatten()),
            Err(failure) => Outcome::Failure(failure),
        }
    }
}

/// Runs `unit` once per partition inside a pool scope and returns the
/// results in partition order.
///
/// Every unit runs to completion even if another one panics.
fn run_partitions<T, R, F>(
    pool: &ThreadPool,
    partitions: &PersistentList<PersistentList<T>>,
    unit: F,
) -> Result<Vec<R>, Failure>
where
    T: Send + Sync,
    R: Send,
    F: Fn(&PersistentList<T>) -> R + Sync,
{
    let total = partitions.len();
    let mut slots: Vec<Option<Result<R, Failure>>> = (0..total).map(|_| None).collect();
    let unit = &unit;

    pool.scope(|scope| {
        for (index, (slot, partition)) in slots.iter_mut().zip(partitions).enumerate() {
            tracing::trace!(partition = index, length = partition.len(), "dispatching partition");
            scope.spawn(move |_| {
                *slot = Some(capture(|| unit(partition)));
            });
        }
    });

    let mut results = Vec::with_capacity(total);
    let mut failures = Vec::new();
    for slot in slots.into_iter().flatten() {
        match slot {
            Ok(result) => results.push(result),
            Err(failure) => failures.push(failure),
        }
    }

    let Some(first_failure) = failures.first().cloned() else {
        return Ok(results);
    };
    tracing::debug!(
        failed = failures.len(),
        partitions = total,
        cause = %first_failure,
        "parallel fold failed"
    );
    Err(Failure::new(
        FailureKind::Panic,
        format!("parallel fold failed in {} of {total} partitions", failures.len()),
    )
    .with_cause(first_failure))
}
