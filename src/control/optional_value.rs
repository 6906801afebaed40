//! `OptionalValue` - a value that may be absent, with no diagnostic payload.
//!
//! Use [`OptionalValue`] where absence carries no information worth
//! reporting. When the reason for absence matters, use
//! [`Outcome`](super::Outcome) instead.
//!
//! # Examples
//!
//! ```rust
//! use fncore::control::OptionalValue;
//!
//! let port = OptionalValue::from("8080".parse::<u16>().ok())
//!     .filter(|port| *port >= 1024)
//!     .get_or_else(80);
//! assert_eq!(port, 8080);
//! ```

use std::fmt;

use super::failure::capture;

/// Either `Absent` or `Present(value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum OptionalValue<T> {
    /// No value.
    #[default]
    Absent,
    /// A value.
    Present(T),
}

impl<T> OptionalValue<T> {
    /// Wraps a value.
    #[inline]
    pub const fn present(value: T) -> Self {
        Self::Present(value)
    }

    /// Returns the absent value.
    #[inline]
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// Returns `true` for `Absent`.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` for `Present`.
    #[inline]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrows the contained value.
    #[inline]
    pub const fn as_ref(&self) -> OptionalValue<&T> {
        match self {
            Self::Present(value) => OptionalValue::Present(value),
            Self::Absent => OptionalValue::Absent,
        }
    }

    /// Applies `function` to a present value.
    pub fn map<U, F>(self, function: F) -> OptionalValue<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Present(value) => OptionalValue::Present(function(value)),
            Self::Absent => OptionalValue::Absent,
        }
    }

    /// Chains a computation that may itself be absent.
    pub fn flat_map<U, F>(self, function: F) -> OptionalValue<U>
    where
        F: FnOnce(T) -> OptionalValue<U>,
    {
        self.map(function).get_or_else(OptionalValue::Absent)
    }

    /// Combines two present values; absent if either is absent.
    pub fn map2<U, V, F>(self, other: OptionalValue<U>, function: F) -> OptionalValue<V>
    where
        F: FnOnce(T, U) -> V,
    {
        self.flat_map(move |first| other.map(move |second| function(first, second)))
    }

    /// Returns the value, or `default` when absent.
    pub fn get_or_else(self, default: T) -> T {
        match self {
            Self::Present(value) => value,
            Self::Absent => default,
        }
    }

    /// Returns the value, or computes one when absent.
    pub fn get_or_else_with<F>(self, default: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            Self::Present(value) => value,
            Self::Absent => default(),
        }
    }

    /// Returns `self` when present, otherwise the result of `supplier`.
    #[must_use]
    pub fn or_else<F>(self, supplier: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Present(value) => Self::Present(value),
            Self::Absent => supplier(),
        }
    }

    /// Keeps a present value only if it satisfies `predicate`.
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.flat_map(|value| {
            if predicate(&value) {
                Self::Present(value)
            } else {
                Self::Absent
            }
        })
    }

    /// Converts into an [`Option`].
    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    /// Lifts `function` so that it operates on optional values.
    ///
    /// A panic inside `function` produces `Absent`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::OptionalValue;
    ///
    /// let parse = OptionalValue::lift(|text: &str| text.parse::<i32>().unwrap());
    /// assert_eq!(parse(OptionalValue::present("12")), OptionalValue::present(12));
    /// assert_eq!(parse(OptionalValue::present("x")), OptionalValue::absent());
    /// ```
    pub fn lift<U, F>(function: F) -> impl Fn(Self) -> OptionalValue<U>
    where
        F: Fn(T) -> U,
    {
        move |optional| {
            optional.flat_map(|value| capture(|| function(value)).ok().into())
        }
    }

    /// Turns a plain function into one returning an optional value.
    ///
    /// A panic inside `function` produces `Absent`.
    pub fn h_lift<U, F>(function: F) -> impl Fn(T) -> OptionalValue<U>
    where
        F: Fn(T) -> U,
    {
        move |value| capture(|| function(value)).ok().into()
    }
}

impl<T> From<Option<T>> for OptionalValue<T> {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Absent, Self::Present)
    }
}

impl<T> From<OptionalValue<T>> for Option<T> {
    fn from(optional: OptionalValue<T>) -> Self {
        match optional {
            OptionalValue::Present(value) => Some(value),
            OptionalValue::Absent => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for OptionalValue<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present(value) => write!(formatter, "Present({value})"),
            Self::Absent => write!(formatter, "Absent"),
        }
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for OptionalValue<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Present(value) => serializer.serialize_some(value),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for OptionalValue<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
