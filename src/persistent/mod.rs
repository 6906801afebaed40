//! Persistent list and the operations derived from its folds.
//!
//! This module provides [`PersistentList`], an immutable singly-linked list
//! whose operations return new lists that share unchanged nodes with the
//! original, plus the free functions built on it:
//!
//! - [`zip_with`], [`product`], [`unzip`]: combining lists
//! - [`unfold`], [`unfold_outcome`], [`range`]: generating lists
//! - [`sequence`], [`traverse`], [`sequence_optional`], [`traverse_optional`],
//!   [`flatten_outcomes`]: moving between lists of outcomes and outcomes of lists
//!
//! With the `rayon` feature, `par_fold_left` and `par_map` split a list into
//! partitions and process them on a caller-supplied [`rayon::ThreadPool`].
//!
//! # Structural Sharing
//!
//! ```rust
//! use fncore::persistent::PersistentList;
//!
//! let base: PersistentList<i32> = (2..=4).collect();
//! let extended = base.cons(1);
//!
//! // The original is unchanged and its nodes are shared by `extended`.
//! assert_eq!(base.to_vec(), vec![2, 3, 4]);
//! assert_eq!(extended.to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(extended.tail(), base);
//! ```
//!
//! # Thread Safety
//!
//! Nodes are held by [`std::rc::Rc`] by default. Enabling the `arc` feature
//! (implied by `rayon`) switches to [`std::sync::Arc`], making
//! `PersistentList<T>` `Send + Sync` whenever `T` is.

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted pointer used for list nodes.
///
/// `std::sync::Arc` with the `arc` feature, `std::rc::Rc` otherwise.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod list;
#[cfg(feature = "rayon")]
mod parallel;
mod traverse;

pub use list::PersistentList;
pub use list::PersistentListIntoIterator;
pub use list::PersistentListIterator;
pub use list::{product, range, unfold, unfold_outcome, unzip, zip_with};
#[cfg(feature = "rayon")]
pub use parallel::DEFAULT_PARALLEL_DEPTH;
pub use traverse::{flatten_outcomes, sequence, sequence_optional, traverse, traverse_optional};

// =============================================================================
// Tests
// =============================================================================
