//! Assertion helpers that report through [`Outcome`] instead of panicking.
//!
//! Every function here returns `Success(value)` when the check passes and a
//! `Failure` otherwise, so checks chain with `flat_map`:
//!
//! ```rust
//! use fncore::control::Outcome;
//! use fncore::validation::{assert_positive, assert_valid_name};
//!
//! #[derive(Debug, PartialEq)]
//! struct Person {
//!     id: i64,
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! fn person(id: i64, first_name: &str, last_name: &str) -> Outcome<Person> {
//!     assert_positive(id).flat_map(|id| {
//!         assert_valid_name(first_name).flat_map(|first_name| {
//!             assert_valid_name(last_name).map(|last_name| Person { id, first_name, last_name })
//!         })
//!     })
//! }
//!
//! assert!(person(1, "Ada", "Lovelace").is_success());
//! assert!(person(1, "ada", "Lovelace").is_failure());
//! assert!(person(0, "Ada", "Lovelace").is_failure());
//! ```
//!
//! Failure messages start with `"Assertion error:"` and are wrapped by
//! [`Outcome::check`], which also names the rejected value.

use std::fmt::Debug;

use crate::control::Outcome;

const TAG: &str = "Assertion error:";

fn condition_message(expected: &str) -> String {
    format!("{TAG} condition should be {expected}")
}

fn value_message(value: i64, expected: &str) -> String {
    format!("{TAG} value {value} should be {expected}")
}

/// Checks `value` against `predicate` with a generic failure message.
pub fn assert_condition<T, P>(value: T, predicate: P) -> Outcome<T>
where
    T: Debug,
    P: FnOnce(&T) -> bool,
{
    assert_condition_with(value, &condition_message("true"), predicate)
}

/// Checks `value` against `predicate`, failing with `message`.
///
/// A panicking predicate is reported as a failure too.
pub fn assert_condition_with<T, P>(value: T, message: &str, predicate: P) -> Outcome<T>
where
    T: Debug,
    P: FnOnce(&T) -> bool,
{
    Outcome::check(predicate, value, message)
}

/// Succeeds with `true` if `condition` holds.
pub fn assert_true(condition: bool) -> Outcome<bool> {
    assert_condition_with(condition, &condition_message("true"), |condition| *condition)
}

/// Succeeds with `false` if `condition` does not hold.
pub fn assert_false(condition: bool) -> Outcome<bool> {
    assert_condition_with(condition, &condition_message("false"), |condition| !*condition)
}

/// Unwraps a value that must be present.
///
/// # Examples
///
/// ```rust
/// use fncore::validation::assert_not_none;
///
/// assert!(assert_not_none(Some(1)).is_success());
/// assert!(assert_not_none::<i32>(None).is_failure());
/// ```
pub fn assert_not_none<T: Debug>(value: Option<T>) -> Outcome<T> {
    assert_condition_with(value, &condition_message("present"), Option::is_some)
        .flat_map(Outcome::from_nullable)
}

/// Succeeds if `value > 0`.
pub fn assert_positive(value: i64) -> Outcome<i64> {
    assert_condition_with(value, &value_message(value, "positive"), |value| *value > 0)
}

/// Succeeds if `value >= 0`.
pub fn assert_positive_or_zero(value: i64) -> Outcome<i64> {
    assert_condition_with(value, &value_message(value, ">= 0"), |value| *value >= 0)
}

/// Succeeds if `min <= value < max`.
pub fn assert_in_range(value: i64, min: i64, max: i64) -> Outcome<i64> {
    assert_condition_with(
        value,
        &value_message(value, &format!(">= {min} and < {max}")),
        |value| (min..max).contains(value),
    )
}

/// Succeeds if `name` starts with an ASCII uppercase letter.
pub fn assert_valid_name(name: &str) -> Outcome<String> {
    assert_condition_with(name.to_owned(), "Invalid name", |name| {
        name.chars().next().is_some_and(|first| first.is_ascii_uppercase())
    })
}
