//! Turning lists of outcomes into outcomes of lists.
//!
//! [`sequence`] and [`traverse`] follow one policy:
//!
//! - the first `Failure`, left to right, is the result and nothing after it
//!   is examined;
//! - `Empty` elements are skipped, so they do not make the whole result empty;
//! - an empty input gives `Success` of an empty list.
//!
//! [`sequence_optional`] and [`traverse_optional`] are stricter: a single
//! `Absent` makes the whole result `Absent`.
//!
//! All four run on [`PersistentList::fold_left_until`], so they are
//! stack-safe and stop as soon as the result is decided.

use super::PersistentList;
use crate::control::{OptionalValue, Outcome};

/// Collects the successful values of `outcomes`, in order.
///
/// # Examples
///
/// ```rust
/// use fncore::control::Outcome;
/// use fncore::persistent::{PersistentList, sequence};
///
/// let outcomes: PersistentList<Outcome<i32>> =
///     vec![Outcome::success(1), Outcome::empty(), Outcome::success(3)].into_iter().collect();
/// assert_eq!(sequence(&outcomes).map(|list| list.to_vec()), Outcome::success(vec![1, 3]));
///
/// let failed: PersistentList<Outcome<i32>> =
///     vec![Outcome::success(1), Outcome::failure("boom")].into_iter().collect();
/// assert!(sequence(&failed).is_failure());
/// ```
pub fn sequence<A: Clone>(outcomes: &PersistentList<Outcome<A>>) -> Outcome<PersistentList<A>> {
    traverse(outcomes, Outcome::clone)
}

/// Applies `function` to each element and collects the successful results.
///
/// `function` is not called for any element after the first `Failure`.
///
/// # Examples
///
/// ```rust
/// use fncore::control::Outcome;
/// use fncore::persistent::{PersistentList, traverse};
///
/// let validate_positive = |x: &i32| {
///     if *x > 0 { Outcome::success(*x) } else { Outcome::failure(format!("{x} is not positive")) }
/// };
///
/// let good: PersistentList<i32> = (1..=3).collect();
/// assert_eq!(traverse(&good, validate_positive).map(|list| list.to_vec()), Outcome::success(vec![1, 2, 3]));
///
/// let bad: PersistentList<i32> = vec![1, -2, 3].into_iter().collect();
/// assert_eq!(traverse(&bad, validate_positive), Outcome::failure("-2 is not positive"));
/// ```
pub fn traverse<A, B, F>(list: &PersistentList<A>, mut function: F) -> Outcome<PersistentList<B>>
where
    F: FnMut(&A) -> Outcome<B>,
{
    list.fold_left_until(
        Outcome::Success(Vec::with_capacity(list.len())),
        Outcome::is_failure,
        |collected, element| match function(element) {
            Outcome::Empty => collected,
            outcome => collected.map2(outcome, |mut values, value| {
                values.push(value);
                values
            }),
        },
    )
    .map(PersistentList::from_iter)
}

/// Collects the present values of `optionals`; `Absent` if any is absent.
pub fn sequence_optional<A: Clone>(
    optionals: &PersistentList<OptionalValue<A>>,
) -> OptionalValue<PersistentList<A>> {
    traverse_optional(optionals, |optional| optional.clone())
}

/// Applies `function` to each element; `Absent` as soon as one result is
/// absent.
pub fn traverse_optional<A, B, F>(
    list: &PersistentList<A>,
    mut function: F,
) -> OptionalValue<PersistentList<B>>
where
    F: FnMut(&A) -> OptionalValue<B>,
{
    list.fold_left_until(
        OptionalValue::Present(Vec::with_capacity(list.len())),
        OptionalValue::is_empty,
        |collected, element| {
            collected.map2(function(element), |mut values, value| {
                values.push(value);
                values
            })
        },
    )
    .map(PersistentList::from_iter)
}

/// Keeps only the successful values, dropping failures and empties.
pub fn flatten_outcomes<A: Clone>(outcomes: &PersistentList<Outcome<A>>) -> PersistentList<A> {
    outcomes.flat_map(|outcome| match outcome {
        Outcome::Success(value) => PersistentList::singleton(value.clone()),
        Outcome::Failure(_) | Outcome::Empty => PersistentList::new(),
    })
}
