//! # fncore
//!
//! A small functional-programming foundation: a persistent list with a fold
//! algebra, and container types for values that may be missing or may have
//! failed.
//!
//! ## Overview
//!
//! - **Control**: [`Outcome`](control::Outcome) (`Success` / `Failure` / `Empty`),
//!   [`OptionalValue`](control::OptionalValue) (`Present` / `Absent`) and the
//!   [`Failure`](control::Failure) error payload
//! - **Persistent List**: an immutable, structurally shared singly-linked list
//!   whose operations are all derived from stack-safe folds, plus
//!   `sequence`/`traverse` and, with `rayon`, parallel fold and map
//! - **Validation**: assertion helpers returning `Outcome`
//! - **Retry**: re-running a fallible function a bounded number of times
//! - **Properties**: reading typed values from `key=value` files
//!
//! ## Feature Flags
//!
//! - `control`: `Outcome`, `OptionalValue`, `Failure`
//! - `persistent`: `PersistentList` and its free functions
//! - `arc`: share list nodes with `Arc` instead of `Rc`
//! - `rayon`: parallel fold and map (implies `arc`)
//! - `serde`: serialization for `PersistentList` and `OptionalValue`
//! - `validation`, `retry`, `properties`: the helper modules
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use fncore::prelude::*;
//!
//! let prices: PersistentList<i32> = vec![120, 80, 45].into_iter().collect();
//! let checked = traverse(&prices, |price| {
//!     if *price > 0 { Outcome::success(*price) } else { Outcome::failure("non-positive price") }
//! });
//! let total = checked.map(|prices| prices.fold_left(0, |sum, price| sum + price));
//! assert_eq!(total, Outcome::success(245));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the public types and free functions of every enabled module.
///
/// # Usage
///
/// ```rust
/// use fncore::prelude::*;
/// ```
pub mod prelude {

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "persistent")]
    pub use crate::persistent::*;

    #[cfg(feature = "validation")]
    pub use crate::validation::*;

    #[cfg(feature = "retry")]
    pub use crate::retry::*;

    #[cfg(feature = "properties")]
    pub use crate::properties::*;
}

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "persistent")]
pub mod persistent;

#[cfg(feature = "validation")]
pub mod validation;

#[cfg(feature = "retry")]
pub mod retry;

#[cfg(feature = "properties")]
pub mod properties;
