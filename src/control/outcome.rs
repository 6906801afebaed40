//! Outcome type - a value, a captured failure, or a legitimate absence.
//!
//! [`Outcome<A>`] is the crate's result monad. Unlike [`Result`], it has a
//! third state, [`Outcome::Empty`], for values that are absent without that
//! being an error (an optional setting that was never configured, say).
//!
//! Transformations applied to `Failure` or `Empty` are no-ops that pass the
//! state through unchanged. A panic raised by a transformation applied to
//! `Success` is captured and becomes a `Failure`.
//!
//! Capturing a panic does not silence it: the process panic hook still runs
//! first, and the default hook prints the message to stderr. Install a quiet
//! hook with [`std::panic::set_hook`] if captured panics should stay silent.
//!
//! # Examples
//!
//! ```rust
//! use fncore::control::Outcome;
//!
//! let parsed = Outcome::success("42")
//!     .flat_map(|text| Outcome::try_of(|| text.parse::<i32>()))
//!     .map(|value| value * 2);
//! assert_eq!(parsed.get_or_else(0), 84);
//!
//! let divisor = std::hint::black_box(0);
//! let divided = Outcome::of(|| 1 / divisor);
//! assert!(divided.is_failure());
//! ```

use std::error::Error;
use std::fmt;

use super::failure::{Failure, capture};

/// Default message used by [`Outcome::keep_if`].
const CONDITION_NOT_MATCHED: &str = "Condition not matched.";

/// A value that is either present, failed with a [`Failure`], or empty.
///
/// Consume an `Outcome` with [`for_each`](Outcome::for_each) or one of the
/// `get_or_else` variants rather than by matching on its variants.
#[derive(Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    /// A successfully computed value.
    Success(A),
    /// A captured error.
    Failure(Failure),
    /// No value, and no error either.
    Empty,
}

impl<A> Outcome<A> {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a successful outcome.
    #[inline]
    pub const fn success(value: A) -> Self {
        Self::Success(value)
    }

    /// Creates an empty outcome.
    #[inline]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Creates a failed outcome with an [`IllegalState`](super::FailureKind::IllegalState)
    /// failure carrying `message`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(Failure::illegal_state(message))
    }

    /// Creates a failed outcome from an existing [`Failure`].
    #[inline]
    pub const fn failure_with(failure: Failure) -> Self {
        Self::Failure(failure)
    }

    /// Creates a failed outcome wrapping a foreign error.
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self::Failure(Failure::from_error(error))
    }

    /// Builds an outcome from a possibly missing value.
    ///
    /// `None` becomes a [`NullReference`](super::FailureKind::NullReference) failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// assert_eq!(Outcome::from_nullable(Some(3)), Outcome::success(3));
    /// assert!(Outcome::<i32>::from_nullable(None).is_failure());
    /// ```
    pub fn from_nullable(value: Option<A>) -> Self {
        Self::from_nullable_or(value, "value was null")
    }

    /// Like [`from_nullable`](Outcome::from_nullable), with a custom message
    /// for the missing case.
    pub fn from_nullable_or(value: Option<A>, message: impl Into<String>) -> Self {
        value.map_or_else(|| Self::Failure(Failure::null_reference(message)), Self::Success)
    }

    /// Builds an outcome that is `Empty` when `predicate` rejects the value.
    ///
    /// A missing value is still a failure; only a present value that does
    /// not satisfy the predicate becomes `Empty`. Use [`require`](Outcome::require)
    /// when a rejected value should be reported as an error instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// assert_eq!(Outcome::when(Some(5), |value| *value > 0), Outcome::success(5));
    /// assert_eq!(Outcome::when(Some(-5), |value| *value > 0), Outcome::empty());
    /// assert!(Outcome::when(None, |value: &i32| *value > 0).is_failure());
    /// ```
    pub fn when<P>(value: Option<A>, predicate: P) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        match value {
            None => Self::Failure(Failure::null_reference("value was null")),
            Some(value) => {
                if predicate(&value) {
                    Self::Success(value)
                } else {
                    Self::Empty
                }
            }
        }
    }

    /// Runs `supplier`, capturing a panic as a failure.
    ///
    /// The panic hook still sees the panic, so the default hook prints it to
    /// stderr before it is captured.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// assert_eq!(Outcome::of(|| 2 + 2), Outcome::success(4));
    /// assert!(Outcome::<i32>::of(|| panic!("boom")).is_failure());
    /// ```
    pub fn of<F>(supplier: F) -> Self
    where
        F: FnOnce() -> A,
    {
        capture(supplier).map_or_else(Self::Failure, Self::Success)
    }

    /// Runs a fallible `supplier`; both an `Err` and a panic become failures.
    pub fn try_of<E, F>(supplier: F) -> Self
    where
        E: Error + Send + Sync + 'static,
        F: FnOnce() -> Result<A, E>,
    {
        match capture(supplier) {
            Ok(Ok(value)) => Self::Success(value),
            Ok(Err(error)) => Self::from_error(error),
            Err(failure) => Self::Failure(failure),
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Returns `true` for `Success`.
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for `Failure`.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns `true` for `Empty`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Borrows the contents, cloning only the failure if there is one.
    pub fn as_ref(&self) -> Outcome<&A> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(failure) => Outcome::Failure(failure.clone()),
            Self::Empty => Outcome::Empty,
        }
    }

    /// Returns `true` when this is a `Success` whose value satisfies `predicate`.
    ///
    /// A panicking predicate counts as `false`.
    pub fn exists<P>(&self, predicate: P) -> bool
    where
        P: FnOnce(&A) -> bool,
    {
        self.as_ref().map(predicate).get_or_else(false)
    }

    // =========================================================================
    // Transformation
    // =========================================================================

    /// Applies `function` to a successful value.
    ///
    /// `Failure` and `Empty` pass through unchanged; a panic inside
    /// `function` becomes a `Failure`. As with [`of`](Outcome::of), the
    /// panic hook runs before the panic is captured.
    pub fn map<B, F>(self, function: F) -> Outcome<B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Self::Success(value) => Outcome::of(move || function(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
            Self::Empty => Outcome::Empty,
        }
    }

    /// Chains a computation that itself produces an outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// let halve = |value: i32| {
    ///     if value % 2 == 0 { Outcome::success(value / 2) } else { Outcome::failure("odd") }
    /// };
    /// assert_eq!(Outcome::success(8).flat_map(halve), Outcome::success(4));
    /// assert!(Outcome::success(3).flat_map(halve).is_failure());
    /// ```
    pub fn flat_map<B, F>(self, function: F) -> Outcome<B>
    where
        F: FnOnce(A) -> Outcome<B>,
    {
        match self {
            Self::Success(value) => {
                capture(move || function(value)).unwrap_or_else(Outcome::Failure)
            }
            Self::Failure(failure) => Outcome::Failure(failure),
            Self::Empty => Outcome::Empty,
        }
    }

    /// Combines two outcomes with `function` when both are successful.
    ///
    /// The first non-successful outcome, checked left to right, is returned
    /// otherwise.
    pub fn map2<B, C, F>(self, other: Outcome<B>, function: F) -> Outcome<C>
    where
        F: FnOnce(A, B) -> C,
    {
        self.flat_map(move |first| other.map(move |second| function(first, second)))
    }

    /// Returns `self` if successful, otherwise the outcome of `supplier`.
    ///
    /// A panic inside `supplier` becomes a `Failure`.
    pub fn or_else<F>(self, supplier: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Success(value) => Self::Success(value),
            Self::Failure(_) | Self::Empty => capture(supplier).unwrap_or_else(Self::Failure),
        }
    }

    /// Adds context to a failure; the original failure becomes its cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// let outcome: Outcome<i32> = Outcome::failure("no such file").map_failure("loading config");
    /// outcome.for_each(
    ///     |_| unreachable!(),
    ///     |failure| assert_eq!(failure.messages(), vec!["loading config", "no such file"]),
    ///     || unreachable!(),
    /// );
    /// ```
    #[must_use]
    pub fn map_failure(self, message: impl Into<String>) -> Self {
        match self {
            Self::Failure(failure) => Self::Failure(failure.with_context(message)),
            other => other,
        }
    }

    /// Replaces a failure with one built by `function` from the old failure
    /// and `message`.
    #[must_use]
    pub fn map_failure_with<F>(self, message: impl Into<String>, function: F) -> Self
    where
        F: FnOnce(Failure, String) -> Failure,
    {
        match self {
            Self::Failure(failure) => Self::Failure(function(failure, message.into())),
            other => other,
        }
    }

    /// Turns `Empty` into an [`IllegalState`](super::FailureKind::IllegalState)
    /// failure carrying `message`.
    #[must_use]
    pub fn map_empty(self, message: impl Into<String>) -> Self {
        match self {
            Self::Empty => Self::failure(message),
            other => other,
        }
    }

    /// Reports whether this outcome was empty.
    ///
    /// `Empty` becomes `Success(())`, `Success` becomes a failure and an
    /// existing `Failure` is kept.
    pub fn map_empty_to_success(&self) -> Outcome<()> {
        match self {
            Self::Empty => Outcome::Success(()),
            Self::Success(_) => Outcome::failure("Not Empty"),
            Self::Failure(failure) => Outcome::Failure(failure.clone()),
        }
    }

    /// Turns a successful value that fails `predicate` into a failure with
    /// `message`.
    #[must_use]
    pub fn filter<P>(self, predicate: P, message: impl Into<String>) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        let message = message.into();
        self.flat_map(move |value| {
            if predicate(&value) {
                Self::Success(value)
            } else {
                Self::failure(message)
            }
        })
    }

    /// [`filter`](Outcome::filter) with the message `"Condition not matched."`.
    #[must_use]
    pub fn keep_if<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        self.filter(predicate, CONDITION_NOT_MATCHED)
    }

    // =========================================================================
    // Consumption
    // =========================================================================

    /// Runs exactly one of the three callbacks, depending on the variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// let mut seen = Vec::new();
    /// Outcome::success(1).for_each(
    ///     |value| seen.push(format!("value {value}")),
    ///     |failure| eprintln!("{failure}"),
    ///     || {},
    /// );
    /// assert_eq!(seen, vec!["value 1"]);
    /// ```
    pub fn for_each<S, F, E>(self, on_success: S, on_failure: F, on_empty: E)
    where
        S: FnOnce(A),
        F: FnOnce(Failure),
        E: FnOnce(),
    {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(failure) => on_failure(failure),
            Self::Empty => on_empty(),
        }
    }

    /// Returns the value, or `default` for `Failure` and `Empty`.
    pub fn get_or_else(self, default: A) -> A {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) | Self::Empty => default,
        }
    }

    /// Returns the value, or computes one for `Failure` and `Empty`.
    pub fn get_or_else_with<F>(self, default: F) -> A
    where
        F: FnOnce() -> A,
    {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) | Self::Empty => default(),
        }
    }

    /// Converts into an [`Option`], discarding any failure.
    pub fn into_option(self) -> Option<A> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) | Self::Empty => None,
        }
    }

    // =========================================================================
    // Lifting
    // =========================================================================

    /// Lifts `function` to operate on outcomes.
    pub fn lift<B, F>(function: F) -> impl Fn(Self) -> Outcome<B>
    where
        F: Fn(A) -> B,
    {
        move |outcome| outcome.map(&function)
    }

    /// Lifts a two-argument function to operate on outcomes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// let add = Outcome::lift2(|a: i32, b: i32| a + b);
    /// assert_eq!(add(Outcome::success(1), Outcome::success(2)), Outcome::success(3));
    /// assert!(add(Outcome::success(1), Outcome::empty()).is_empty());
    /// ```
    pub fn lift2<B, C, F>(function: F) -> impl Fn(Self, Outcome<B>) -> Outcome<C>
    where
        F: Fn(A, B) -> C,
    {
        move |first, second| first.map2(second, &function)
    }

    /// Lifts a three-argument function to operate on outcomes.
    pub fn lift3<B, C, D, F>(function: F) -> impl Fn(Self, Outcome<B>, Outcome<C>) -> Outcome<D>
    where
        F: Fn(A, B, C) -> D,
    {
        move |first, second, third| {
            first.flat_map(|a| second.flat_map(|b| third.map(|c| function(a, b, c))))
        }
    }
}

impl<A: fmt::Debug> Outcome<A> {
    /// Builds an outcome that fails when `predicate` rejects the value.
    ///
    /// A missing value is a [`NullReference`](super::FailureKind::NullReference)
    /// failure; a rejected value is an
    /// [`InvalidArgument`](super::FailureKind::InvalidArgument) failure whose
    /// message names the value and `message`. Use [`when`](Outcome::when)
    /// when a rejected value should be `Empty` instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    ///
    /// let outcome = Outcome::require(Some(-1), |value| *value > 0, "must be positive");
    /// outcome.for_each(
    ///     |_| unreachable!(),
    ///     |failure| {
    ///         assert_eq!(failure.message(), "Argument -1 does not match the condition: must be positive");
    ///     },
    ///     || unreachable!(),
    /// );
    /// ```
    pub fn require<P>(value: Option<A>, predicate: P, message: &str) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        match value {
            None => Self::Failure(Failure::null_reference("value was null")),
            Some(value) => {
                if predicate(&value) {
                    Self::Success(value)
                } else {
                    Self::Failure(Failure::invalid_argument(format!(
                        "Argument {value:?} does not match the condition: {message}"
                    )))
                }
            }
        }
    }

    /// Validates `value` with a predicate that may itself panic.
    ///
    /// A rejected value becomes an `IllegalState` failure; a panicking
    /// predicate becomes a failure whose cause is the captured panic.
    pub fn check<P>(predicate: P, value: A, message: &str) -> Self
    where
        P: FnOnce(&A) -> bool,
    {
        match capture(|| predicate(&value)) {
            Ok(true) => Self::Success(value),
            Ok(false) => Self::failure(format!(
                "Assertion failed for value {value:?} with message: {message}"
            )),
            Err(panic) => Self::Failure(
                Failure::illegal_state(format!("Exception while validating {value:?}"))
                    .with_cause(panic),
            ),
        }
    }
}

impl<A> Default for Outcome<A> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<A, E> From<Result<A, E>> for Outcome<A>
where
    E: Error + Send + Sync + 'static,
{
    fn from(result: Result<A, E>) -> Self {
        result.map_or_else(Self::from_error, Self::Success)
    }
}

impl<A: fmt::Debug> fmt::Debug for Outcome<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => formatter.debug_tuple("Success").field(value).finish(),
            Self::Failure(failure) => formatter
                .debug_tuple("Failure")
                .field(&failure.messages())
                .finish(),
            Self::Empty => formatter.write_str("Empty"),
        }
    }
}

impl<A: fmt::Display> fmt::Display for Outcome<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(value) => write!(formatter, "Success({value})"),
            Self::Failure(failure) => write!(formatter, "Failure({failure})"),
            Self::Empty => write!(formatter, "Empty"),
        }
    }
}
