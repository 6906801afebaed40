//! Containers for values that may be missing or may have failed.
//!
//! This module provides the two closed sum types that the rest of the
//! crate threads values through:
//!
//! - [`Outcome`]: `Success`, `Failure` (with a [`Failure`] payload) or `Empty`
//! - [`OptionalValue`]: `Present` or `Absent`
//!
//! Both short-circuit: once a pipeline is in a failed or absent state,
//! every further `map`/`flat_map` passes that state through unchanged.
//!
//! # Examples
//!
//! ## Chaining dependent steps
//!
//! ```rust
//! use fncore::control::Outcome;
//!
//! fn parse_port(text: &str) -> Outcome<u16> {
//!     Outcome::try_of(|| text.parse::<u16>()).map_failure(format!("invalid port `{text}`"))
//! }
//!
//! let address = Outcome::success("localhost")
//!     .flat_map(|host| parse_port("8080").map(move |port| format!("{host}:{port}")));
//! assert_eq!(address, Outcome::success("localhost:8080".to_string()));
//!
//! assert!(parse_port("eighty").is_failure());
//! ```
//!
//! ## Absence without diagnostics
//!
//! ```rust
//! use fncore::control::OptionalValue;
//!
//! let name = OptionalValue::present("  ada ")
//!     .map(str::trim)
//!     .filter(|name| !name.is_empty());
//! assert_eq!(name, OptionalValue::present("ada"));
//! ```

mod failure;
mod optional_value;
mod outcome;

#[cfg_attr(not(any(feature = "rayon", feature = "properties")), allow(unused_imports))]
pub(crate) use failure::capture;
pub use failure::{Failure, FailureKind};
pub use optional_value::OptionalValue;
pub use outcome::Outcome;
