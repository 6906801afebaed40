//! The error payload carried by [`Outcome::Failure`](super::Outcome::Failure).
//!
//! A [`Failure`] records what went wrong as a [`FailureKind`] plus a message,
//! and may wrap the failure (or foreign error) that caused it. Wrapping is
//! how context is added without losing the original cause:
//!
//! ```rust
//! use fncore::control::{Failure, FailureKind};
//! use std::error::Error;
//!
//! let root = Failure::illegal_state("connection refused");
//! let wrapped = root.with_context("could not load settings");
//!
//! assert_eq!(wrapped.message(), "could not load settings");
//! assert_eq!(wrapped.kind(), FailureKind::IllegalState);
//! assert_eq!(wrapped.source().map(ToString::to_string), Some("connection refused".to_string()));
//! ```

use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Shared handle to the error that caused a [`Failure`].
type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Classifies a [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A required value was missing.
    NullReference,
    /// A value was present but did not satisfy a condition.
    InvalidArgument,
    /// An explicit failure raised by the caller.
    IllegalState,
    /// A panic was captured while running a user-supplied function.
    Panic,
    /// An error produced outside this crate (I/O, parsing, ...).
    External,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NullReference => "null reference",
            Self::InvalidArgument => "invalid argument",
            Self::IllegalState => "illegal state",
            Self::Panic => "panic",
            Self::External => "external error",
        };
        formatter.write_str(name)
    }
}

/// A captured error with a message and an optional chained cause.
///
/// `Failure` is cheap to clone: the cause chain is reference counted.
#[derive(Debug, Clone)]
pub struct Failure {
    kind: FailureKind,
    message: String,
    cause: Option<Cause>,
}

impl Failure {
    /// Creates a failure of the given kind without a cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::{Failure, FailureKind};
    ///
    /// let failure = Failure::new(FailureKind::InvalidArgument, "negative amount");
    /// assert_eq!(failure.to_string(), "negative amount");
    /// ```
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a [`FailureKind::NullReference`] failure.
    pub fn null_reference(message: impl Into<String>) -> Self {
        Self::new(FailureKind::NullReference, message)
    }

    /// Creates a [`FailureKind::InvalidArgument`] failure.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(FailureKind::InvalidArgument, message)
    }

    /// Creates a [`FailureKind::IllegalState`] failure.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::new(FailureKind::IllegalState, message)
    }

    /// Converts a panic payload, as returned by `catch_unwind`, into a failure.
    ///
    /// String payloads become the message; anything else is reported as
    /// `"Unknown panic"`.
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        Self::new(FailureKind::Panic, panic_message(payload))
    }

    /// Wraps a foreign error, keeping it as the cause.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::{Failure, FailureKind};
    ///
    /// let error = "abc".parse::<i32>().unwrap_err();
    /// let failure = Failure::from_error(error);
    /// assert_eq!(failure.kind(), FailureKind::External);
    /// assert_eq!(failure.message(), "invalid digit found in string");
    /// ```
    pub fn from_error<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            kind: FailureKind::External,
            message: error.to_string(),
            cause: Some(Arc::new(error)),
        }
    }

    /// Returns a new failure with `message`, keeping `self` as its cause.
    ///
    /// The kind is preserved so that callers inspecting the outermost
    /// failure still see what category of error occurred.
    #[must_use]
    pub fn with_context(self, message: impl Into<String>) -> Self {
        Self {
            kind: self.kind,
            message: message.into(),
            cause: Some(Arc::new(self)),
        }
    }

    /// Attaches `cause`, replacing any existing one.
    #[must_use]
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.cause = Some(Arc::new(cause));
        self
    }

    /// Returns the kind of this failure.
    #[inline]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Returns the message of this failure.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the direct cause, if any.
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns the messages of this failure and every chained cause,
    /// outermost first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Failure;
    ///
    /// let failure = Failure::illegal_state("disk full").with_context("save failed");
    /// assert_eq!(failure.messages(), vec!["save failed", "disk full"]);
    /// ```
    pub fn messages(&self) -> Vec<String> {
        let mut messages = vec![self.message.clone()];
        let mut current: Option<&(dyn Error + 'static)> = self.source();
        while let Some(error) = current {
            messages.push(error.to_string());
            current = error.source();
        }
        messages
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for Failure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

/// Two failures are equal when their kinds, messages and cause chains agree.
impl PartialEq for Failure {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.messages() == other.messages()
    }
}

impl Eq for Failure {}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Runs `function`, turning a panic into a [`FailureKind::Panic`] failure.
///
/// The installed panic hook runs before the unwind is caught; this function
/// never replaces it.
pub(crate) fn capture<R, F>(function: F) -> Result<R, Failure>
where
    F: FnOnce() -> R,
{
    catch_unwind(AssertUnwindSafe(function)).map_err(|payload| Failure::from_panic(payload.as_ref()))
}
