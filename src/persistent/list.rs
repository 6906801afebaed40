//! Persistent (immutable) singly-linked list.
//!
//! This module provides [`PersistentList`], an immutable singly-linked list
//! that uses structural sharing, together with a fold algebra from which
//! every other traversal is derived.
//!
//! # Overview
//!
//! - O(1) prepend (`cons`), head and tail access, and length
//! - [`fold_left`](PersistentList::fold_left): iterative left-to-right reduction
//! - [`fold_left_until`](PersistentList::fold_left_until): left fold with early exit
//! - [`co_fold_right`](PersistentList::co_fold_right): right-fold semantics
//!   obtained by reversing once and folding left, so it never recurses
//!
//! `map`, `filter`, `flat_map`, `reverse`, `concat`, `group_by`, `split_at`
//! and the other combinators are all written in terms of these folds, so
//! they share one traversal order and are stack-safe for long lists.
//!
//! # Examples
//!
//! ```rust
//! use fncore::persistent::PersistentList;
//!
//! let list: PersistentList<i32> = (1..=5).collect();
//! let evens_squared = list.filter(|x| x % 2 == 0).map(|x| x * x);
//! assert_eq!(evens_squared.to_vec(), vec![4, 16]);
//!
//! let sum = list.fold_left(0, |accumulator, x| accumulator + x);
//! assert_eq!(sum, 15);
//! ```
//!
//! # Structural Sharing
//!
//! ```text
//! list1: 1 -> 2 -> 3 -> nil
//! list2 = list1.cons(0): 0 -> [1 -> 2 -> 3 -> nil]  // shares [1, 2, 3] with list1
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::ReferenceCounter;
use crate::control::{OptionalValue, Outcome};

const FIRST_EMPTY: &str = "first called on an empty list";
const SET_HEAD_EMPTY: &str = "set_head called on an empty list";
const GET_AT_EMPTY: &str = "get_at called on an empty list";
const INDEX_OUT_OF_BOUND: &str = "Index out of bound";

/// Internal node structure for the persistent list.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// Reference to the next node (if any).
    next: Option<ReferenceCounter<Self>>,
}

/// A persistent (immutable) singly-linked list.
///
/// Cloning a list is O(1): the clone shares every node with the original.
/// No operation ever mutates a node; new lists are built by prepending
/// fresh nodes in front of shared tails.
///
/// # Time Complexity
///
/// | Operation        | Complexity |
/// |------------------|------------|
/// | `new`, `cons`    | O(1)       |
/// | `head`, `tail`   | O(1)       |
/// | `len`            | O(1)       |
/// | `get_at`         | O(n)       |
/// | `fold_left`      | O(n)       |
/// | `co_fold_right`  | O(n)       |
/// | `concat`         | O(n) in the left list |
/// | `reverse`        | O(n)       |
///
/// # Examples
///
/// ```rust
/// use fncore::persistent::PersistentList;
///
/// let list = PersistentList::singleton(42);
/// assert_eq!(list.head(), Some(&42));
/// ```
pub struct PersistentList<T> {
    /// Reference to the head node (if any).
    head: Option<ReferenceCounter<Node<T>>>,
    /// Cached length for O(1) access.
    length: usize,
}

impl<T> PersistentList<T> {
    // =========================================================================
    // Construction and Access
    // =========================================================================

    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = PersistentList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
        }
    }

    /// Creates a list containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self::new().cons(element)
    }

    /// Builds a list from a Vec, preserving order.
    ///
    /// Elements are popped from the back, so each one is moved exactly once.
    fn build_from_vec(mut elements: Vec<T>) -> Self {
        let length = elements.len();
        let mut head: Option<ReferenceCounter<Node<T>>> = None;
        while let Some(element) = elements.pop() {
            head = Some(ReferenceCounter::new(Node {
                element,
                next: head,
            }));
        }
        Self { head, length }
    }

    /// Prepends an element, sharing every node of `self`.
    ///
    /// # Complexity
    ///
    /// O(1) time and space
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(3).cons(2).cons(1);
    /// assert_eq!(list.head(), Some(&1));
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub fn cons(&self, element: T) -> Self {
        Self {
            head: Some(ReferenceCounter::new(Node {
                element,
                next: self.head.clone(),
            })),
            length: self.length + 1,
        }
    }

    /// Returns a reference to the first element, or `None` if the list is empty.
    #[inline]
    #[must_use]
    pub fn head(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.element)
    }

    /// Returns the first element.
    ///
    /// # Panics
    ///
    /// Panics with `"first called on an empty list"` if the list is empty.
    /// Use [`first_safe`](PersistentList::first_safe) to get an `Outcome` instead.
    #[must_use]
    pub fn first(&self) -> &T {
        match self.head() {
            Some(element) => element,
            None => panic!("{FIRST_EMPTY}"),
        }
    }

    /// Returns the first element, or `Empty` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    /// use fncore::persistent::PersistentList;
    ///
    /// let list = PersistentList::new().cons(1);
    /// assert_eq!(list.first_safe(), Outcome::success(&1));
    /// assert!(PersistentList::<i32>::new().first_safe().is_empty());
    /// ```
    pub fn first_safe(&self) -> Outcome<&T> {
        self.head().map_or(Outcome::Empty, Outcome::Success)
    }

    /// Returns the last element, or `Empty` if the list is empty.
    pub fn last_safe(&self) -> Outcome<&T> {
        self.fold_left(Outcome::Empty, |_, element| Outcome::Success(element))
    }

    /// Returns a list whose head is `element` and whose tail is shared with
    /// the tail of `self`.
    ///
    /// # Panics
    ///
    /// Panics with `"set_head called on an empty list"` if the list is empty.
    /// Use [`set_head_safe`](PersistentList::set_head_safe) to get an `Outcome` instead.
    #[must_use]
    pub fn set_head(&self, element: T) -> Self {
        assert!(!self.is_empty(), "{SET_HEAD_EMPTY}");
        self.tail().cons(element)
    }

    /// Like [`set_head`](PersistentList::set_head), returning `Empty` for an
    /// empty list.
    pub fn set_head_safe(&self, element: T) -> Outcome<Self> {
        if self.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Success(self.tail().cons(element))
        }
    }

    /// Returns the list without its first element.
    ///
    /// If the list is empty, returns an empty list. The result shares all of
    /// its nodes with `self`.
    #[inline]
    #[must_use]
    pub fn tail(&self) -> Self {
        self.head.as_ref().map_or_else(Self::new, |node| Self {
            head: node.next.clone(),
            length: self.length.saturating_sub(1),
        })
    }

    /// Decomposes the list into its head and tail.
    #[inline]
    #[must_use]
    pub fn uncons(&self) -> Option<(&T, Self)> {
        self.head.as_ref().map(|node| {
            let tail = Self {
                head: node.next.clone(),
                length: self.length.saturating_sub(1),
            };
            (&node.element, tail)
        })
    }

    /// Returns the element at `index`.
    ///
    /// Negative and out-of-bound indices produce a `Failure` rather than a
    /// panic. The scan stops as soon as the element is reached.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// assert_eq!(list.get_at(1), Outcome::success(&2));
    /// assert!(list.get_at(-1).is_failure());
    /// assert!(list.get_at(3).is_failure());
    /// ```
    pub fn get_at(&self, index: isize) -> Outcome<&T> {
        if self.is_empty() {
            return Outcome::failure(GET_AT_EMPTY);
        }
        if usize::try_from(index).map_or(true, |index| index >= self.length) {
            return Outcome::failure(INDEX_OUT_OF_BOUND);
        }
        let (found, _) = self.fold_left_until(
            (Outcome::failure(INDEX_OUT_OF_BOUND), index),
            |(_, remaining)| *remaining < 0,
            |(_, remaining), element| (Outcome::Success(element), remaining - 1),
        );
        found
    }

    /// Returns the number of elements in the list.
    ///
    /// # Complexity
    ///
    /// O(1) - the length is cached
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns an iterator over references to the elements, front to back.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> PersistentListIterator<'_, T> {
        PersistentListIterator {
            current: self.head.as_ref(),
            remaining: self.length,
        }
    }

    /// Returns the list without its first `count` elements, sharing the rest.
    #[must_use]
    pub fn drop(&self, count: usize) -> Self {
        let mut current = self.clone();
        for _ in 0..count.min(self.length) {
            current = current.tail();
        }
        current
    }

    /// Drops leading elements while `predicate` holds, sharing the rest.
    #[must_use]
    pub fn drop_while<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let mut current = self.clone();
        while current.head().is_some_and(&mut predicate) {
            current = current.tail();
        }
        current
    }

    // =========================================================================
    // Fold Algebra
    // =========================================================================

    /// Reduces the list from left to right.
    ///
    /// Runs as a loop, so it is safe for lists of any length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// let digits = list.fold_left(String::new(), |text, x| format!("{text}{x}"));
    /// assert_eq!(digits, "1234");
    /// ```
    pub fn fold_left<'a, U, F>(&'a self, identity: U, mut function: F) -> U
    where
        F: FnMut(U, &'a T) -> U,
    {
        let mut accumulator = identity;
        let mut current = self.head.as_ref();
        while let Some(node) = current {
            accumulator = function(accumulator, &node.element);
            current = node.next.as_ref();
        }
        accumulator
    }

    /// Reduces from left to right, stopping as soon as `stop` holds for the
    /// accumulator.
    ///
    /// `stop` is checked before each element is combined, so the remaining
    /// elements are never visited once it returns `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=100).collect();
    /// let partial = list.fold_left_until(0, |sum| *sum >= 10, |sum, x| sum + x);
    /// assert_eq!(partial, 10); // 1 + 2 + 3 + 4
    /// ```
    pub fn fold_left_until<'a, U, P, F>(&'a self, identity: U, mut stop: P, mut function: F) -> U
    where
        P: FnMut(&U) -> bool,
        F: FnMut(U, &'a T) -> U,
    {
        let mut accumulator = identity;
        let mut current = self.head.as_ref();
        while let Some(node) = current {
            if stop(&accumulator) {
                break;
            }
            accumulator = function(accumulator, &node.element);
            current = node.next.as_ref();
        }
        accumulator
    }

    /// Reduces from left to right, stopping once the accumulator equals `zero`.
    ///
    /// `zero` is an absorbing value: once reached, further elements could not
    /// change the result.
    pub fn fold_left_to_zero<'a, U, F>(&'a self, identity: U, zero: U, function: F) -> U
    where
        U: PartialEq,
        F: FnMut(U, &'a T) -> U,
    {
        self.fold_left_until(identity, |accumulator| *accumulator == zero, function)
    }

    /// Reverses the list into a list of references, without cloning elements.
    pub(crate) fn reversed_references(&self) -> PersistentList<&T> {
        self.fold_left(PersistentList::new(), |reversed, element| reversed.cons(element))
    }

    /// Folds from the right by reversing once and folding left.
    ///
    /// `function` receives `(element, accumulator)` and is applied from the
    /// last element to the first, which gives right-fold semantics without
    /// recursion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=4).collect();
    /// // 1 - (2 - (3 - (4 - 0)))
    /// assert_eq!(list.co_fold_right(0, |x, accumulator| x - accumulator), -2);
    /// ```
    pub fn co_fold_right<'a, U, F>(&'a self, identity: U, mut function: F) -> U
    where
        F: FnMut(&'a T, U) -> U,
    {
        self.reversed_references()
            .fold_left(identity, |accumulator, element| function(*element, accumulator))
    }

    /// Right fold; an alias for [`co_fold_right`](PersistentList::co_fold_right)
    /// so that it is stack-safe for any length.
    pub fn fold_right<'a, U, F>(&'a self, identity: U, function: F) -> U
    where
        F: FnMut(&'a T, U) -> U,
    {
        self.co_fold_right(identity, function)
    }

    // =========================================================================
    // Derived Operations
    // =========================================================================

    /// Applies `function` to every element, preserving order.
    ///
    /// `function` is invoked from the last element to the first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// assert_eq!(list.map(|x| x * 10).to_vec(), vec![10, 20, 30]);
    /// ```
    #[must_use]
    pub fn map<U, F>(&self, mut function: F) -> PersistentList<U>
    where
        F: FnMut(&T) -> U,
    {
        self.co_fold_right(PersistentList::new(), |element, mapped| {
            mapped.cons(function(element))
        })
    }

    /// Runs `effect` on every element, front to back.
    pub fn for_each<F>(&self, mut effect: F)
    where
        F: FnMut(&T),
    {
        self.fold_left((), |(), element| effect(element));
    }

    /// Returns `true` if any element satisfies `predicate`, stopping at the
    /// first match.
    pub fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.fold_left_to_zero(false, true, |_, element| predicate(element))
    }

    /// Returns `true` if every element satisfies `predicate`, stopping at the
    /// first counterexample.
    pub fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        !self.exists(|element| !predicate(element))
    }

    /// Returns `true` if the list begins with the elements of `prefix`.
    ///
    /// The empty list is a prefix of every list.
    pub fn starts_with(&self, prefix: &Self) -> bool
    where
        T: PartialEq,
    {
        if prefix.length > self.length {
            return false;
        }
        let (matched, _) = self.fold_left_until(
            (true, prefix.iter()),
            |(matched, remaining)| !*matched || remaining.len() == 0,
            |(_, mut remaining), element| {
                let matched = remaining.next().is_some_and(|expected| expected == element);
                (matched, remaining)
            },
        );
        matched
    }

    /// Returns `true` if `sublist` occurs as a contiguous run anywhere in the list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=5).collect();
    /// let middle: PersistentList<i32> = (2..=4).collect();
    /// let gap: PersistentList<i32> = vec![2, 4].into_iter().collect();
    /// assert!(list.has_sublist(&middle));
    /// assert!(!list.has_sublist(&gap));
    /// ```
    pub fn has_sublist(&self, sublist: &Self) -> bool
    where
        T: PartialEq,
    {
        if sublist.length > self.length {
            return false;
        }
        let mut suffix = self.clone();
        loop {
            if suffix.starts_with(sublist) {
                return true;
            }
            if suffix.length <= sublist.length {
                return false;
            }
            suffix = suffix.tail();
        }
    }

    /// Splits every element into a pair and collects each side into its own list.
    pub fn unzip<A, B, F>(&self, mut function: F) -> (PersistentList<A>, PersistentList<B>)
    where
        F: FnMut(&T) -> (A, B),
    {
        self.co_fold_right(
            (PersistentList::new(), PersistentList::new()),
            |element, (firsts, seconds)| {
                let (first, second) = function(element);
                (firsts.cons(first), seconds.cons(second))
            },
        )
    }
}

impl<T: Clone> PersistentList<T> {
    /// Creates a list from a slice, preserving order.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        Self::build_from_vec(slice.to_vec())
    }

    /// Collects the elements into a Vec, front to back.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.fold_left(Vec::with_capacity(self.length), |mut elements, element| {
            elements.push(element.clone());
            elements
        })
    }

    /// Returns a new list with elements in reverse order.
    #[must_use]
    pub fn reverse(&self) -> Self {
        self.fold_left(Self::new(), |reversed, element| reversed.cons(element.clone()))
    }

    /// Rebuilds a reversed list of references as an owned list in reverse
    /// order again, i.e. restoring the original order.
    fn from_reversed_references(reversed: &PersistentList<&T>) -> Self {
        reversed.fold_left(Self::new(), |list, element| list.cons((*element).clone()))
    }

    /// Keeps the elements that satisfy `predicate`, preserving order.
    ///
    /// Matching elements are consed onto an accumulator and the result is
    /// reversed once, so the whole operation is O(n).
    #[must_use]
    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        let matching = self.fold_left(PersistentList::new(), |matching, element| {
            if predicate(element) {
                matching.cons(element)
            } else {
                matching
            }
        });
        Self::from_reversed_references(&matching)
    }

    /// [`filter`](PersistentList::filter) expressed through `flat_map`.
    #[must_use]
    pub fn filter_via_flat_map<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        self.flat_map(|element| {
            if predicate(element) {
                Self::singleton(element.clone())
            } else {
                Self::new()
            }
        })
    }

    /// Maps every element to a list and concatenates the results in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=3).collect();
    /// let doubled = list.flat_map(|x| PersistentList::new().cons(*x).cons(*x));
    /// assert_eq!(doubled.to_vec(), vec![1, 1, 2, 2, 3, 3]);
    /// ```
    #[must_use]
    pub fn flat_map<U, F>(&self, function: F) -> PersistentList<U>
    where
        U: Clone,
        F: FnMut(&T) -> PersistentList<U>,
    {
        self.map(function).flatten()
    }

    /// Returns `self` followed by `other`.
    ///
    /// The elements of `self` are copied; every node of `other` is shared.
    ///
    /// # Complexity
    ///
    /// O(n) where n = `self.len()`
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        self.reversed_references()
            .fold_left(other.clone(), |list, element| list.cons((*element).clone()))
    }

    /// Returns every element except the last.
    #[must_use]
    pub fn init(&self) -> Self {
        self.reverse().drop(1).reverse()
    }

    /// Splits after `index` elements, assuming `index <= len`.
    fn split_at_position(&self, index: usize) -> (Self, Self) {
        let (suffix, prefix, _) = self.fold_left_until(
            (self.clone(), PersistentList::new(), 0_usize),
            |(_, _, taken)| *taken == index,
            |(suffix, prefix, taken), element| (suffix.tail(), prefix.cons(element), taken + 1),
        );
        (Self::from_reversed_references(&prefix), suffix)
    }

    /// Splits the list into the first `index` elements and the rest.
    ///
    /// An index below zero or above the length leaves the list whole:
    /// the result is `(self, empty)`. The suffix shares nodes with `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=5).collect();
    /// let (left, right) = list.split_at(2);
    /// assert_eq!(left.to_vec(), vec![1, 2]);
    /// assert_eq!(right.to_vec(), vec![3, 4, 5]);
    ///
    /// let (whole, nothing) = list.split_at(9);
    /// assert_eq!(whole, list);
    /// assert!(nothing.is_empty());
    /// ```
    #[must_use]
    pub fn split_at(&self, index: isize) -> (Self, Self) {
        match usize::try_from(index) {
            Ok(index) if index <= self.length => self.split_at_position(index),
            _ => (self.clone(), Self::new()),
        }
    }

    /// Like [`split_at`](PersistentList::split_at), returning the parts as a
    /// list of lists.
    ///
    /// An empty list, or an index outside `0..=len`, yields a single
    /// partition holding the whole list.
    #[must_use]
    pub fn split_list_at(&self, index: isize) -> PersistentList<Self> {
        match usize::try_from(index) {
            Ok(index) if !self.is_empty() && index <= self.length => {
                let (prefix, suffix) = self.split_at_position(index);
                PersistentList::new().cons(suffix).cons(prefix)
            }
            _ => PersistentList::singleton(self.clone()),
        }
    }

    /// Recursively bisects the list into contiguous partitions.
    ///
    /// Each round splits every partition in half. Rounds stop after `depth`
    /// rounds, or as soon as the first (smallest) partition has fewer than
    /// two elements, so no partition is ever empty. An empty list yields no
    /// partitions. Concatenating the partitions in order gives back `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=8).collect();
    /// let partitions = list.divide(2);
    /// assert_eq!(partitions.len(), 4);
    /// assert!(partitions.for_all(|partition| partition.len() == 2));
    /// assert_eq!(partitions.flatten(), list);
    /// ```
    #[must_use]
    pub fn divide(&self, depth: usize) -> PersistentList<Self> {
        if self.is_empty() {
            return PersistentList::new();
        }
        let mut partitions = PersistentList::singleton(self.clone());
        let mut rounds = 0;
        while rounds < depth && partitions.head().is_some_and(|first| first.length >= 2) {
            partitions = partitions.flat_map(|partition| {
                let (prefix, suffix) = partition.split_at_position(partition.length / 2);
                PersistentList::new().cons(suffix).cons(prefix)
            });
            rounds += 1;
        }
        partitions
    }

    /// Groups elements by key, preserving their relative order within each group.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list: PersistentList<i32> = (1..=6).collect();
    /// let groups = list.group_by(|x| x % 2);
    /// assert_eq!(groups[&0].to_vec(), vec![2, 4, 6]);
    /// assert_eq!(groups[&1].to_vec(), vec![1, 3, 5]);
    /// ```
    pub fn group_by<K, F>(&self, mut key: F) -> HashMap<K, Self>
    where
        K: Eq + Hash,
        F: FnMut(&T) -> K,
    {
        self.reversed_references()
            .fold_left(HashMap::new(), |mut groups, element| {
                let group: &mut Self = groups.entry(key(*element)).or_default();
                *group = group.cons((*element).clone());
                groups
            })
    }
}

impl PersistentList<String> {
    /// Splits `text` on every occurrence of `separator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::persistent::PersistentList;
    ///
    /// let list = PersistentList::from_separated("a,b,,c", ",");
    /// assert_eq!(list.to_vec(), vec!["a", "b", "", "c"]);
    /// ```
    #[must_use]
    pub fn from_separated(text: &str, separator: &str) -> Self {
        text.split(separator).map(str::to_owned).collect()
    }
}

// =============================================================================
// Specialized Methods for Nested Lists
// =============================================================================

impl<T: Clone> PersistentList<PersistentList<T>> {
    /// Concatenates the inner lists in order.
    ///
    /// Folds from the right so that each inner list is copied once and the
    /// accumulated suffix is shared.
    #[must_use]
    pub fn flatten(&self) -> PersistentList<T> {
        self.co_fold_right(PersistentList::new(), |inner, flattened| inner.concat(&flattened))
    }
}

// =============================================================================
// Free Functions
// =============================================================================

/// Combines two lists element by element, stopping at the shorter one.
///
/// # Examples
///
/// ```rust
/// use fncore::persistent::{PersistentList, zip_with};
///
/// let numbers: PersistentList<i32> = (1..=3).collect();
/// let letters: PersistentList<char> = vec!['a', 'b'].into_iter().collect();
/// let zipped = zip_with(&numbers, &letters, |n, c| format!("{n}{c}"));
/// assert_eq!(zipped.to_vec(), vec!["1a", "2b"]);
/// ```
pub fn zip_with<A, B, C, F>(
    first: &PersistentList<A>,
    second: &PersistentList<B>,
    mut function: F,
) -> PersistentList<C>
where
    F: FnMut(&A, &B) -> C,
{
    let mut remaining = second.iter();
    let zipped = first.fold_left_until(
        Vec::with_capacity(first.length.min(second.length)),
        |zipped| zipped.len() == second.length,
        |mut zipped, element| {
            if let Some(other) = remaining.next() {
                zipped.push(function(element, other));
            }
            zipped
        },
    );
    PersistentList::build_from_vec(zipped)
}

/// Applies `function` to every pairing of an element of `first` with an
/// element of `second`, in row-major order.
pub fn product<A, B, C, F>(
    first: &PersistentList<A>,
    second: &PersistentList<B>,
    mut function: F,
) -> PersistentList<C>
where
    A: Clone,
    C: Clone,
    F: FnMut(&A, &B) -> C,
{
    first.flat_map(|a| second.map(|b| function(a, b)))
}

/// Splits a list of pairs into a pair of lists.
pub fn unzip<A: Clone, B: Clone>(
    list: &PersistentList<(A, B)>,
) -> (PersistentList<A>, PersistentList<B>) {
    list.unzip(|(a, b)| (a.clone(), b.clone()))
}

/// Builds a list by repeatedly applying `next` to a state until it returns
/// `Absent`.
///
/// Runs as a loop, so it is safe for any number of steps.
///
/// # Examples
///
/// ```rust
/// use fncore::control::OptionalValue;
/// use fncore::persistent::unfold;
///
/// let powers = unfold(1, |n| {
///     if n <= 16 { OptionalValue::present((n, n * 2)) } else { OptionalValue::absent() }
/// });
/// assert_eq!(powers.to_vec(), vec![1, 2, 4, 8, 16]);
/// ```
pub fn unfold<T, S, F>(seed: S, mut next: F) -> PersistentList<T>
where
    F: FnMut(S) -> OptionalValue<(T, S)>,
{
    let mut elements = Vec::new();
    let mut state = seed;
    while let OptionalValue::Present((element, next_state)) = next(state) {
        elements.push(element);
        state = next_state;
    }
    PersistentList::build_from_vec(elements)
}

/// Like [`unfold`], for a generator that can fail.
///
/// `Empty` ends the list successfully; the first `Failure` is returned and
/// the elements generated so far are discarded.
pub fn unfold_outcome<T, S, F>(seed: S, mut next: F) -> Outcome<PersistentList<T>>
where
    F: FnMut(S) -> Outcome<(T, S)>,
{
    let mut elements = Vec::new();
    let mut state = seed;
    loop {
        match next(state) {
            Outcome::Success((element, next_state)) => {
                elements.push(element);
                state = next_state;
            }
            Outcome::Empty => return Outcome::Success(PersistentList::build_from_vec(elements)),
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        }
    }
}

/// Returns the integers from `start` (inclusive) to `end` (exclusive).
pub fn range(start: i64, end: i64) -> PersistentList<i64> {
    unfold(start, |current| {
        if current < end {
            OptionalValue::Present((current, current + 1))
        } else {
            OptionalValue::Absent
        }
    })
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`PersistentList`].
pub struct PersistentListIterator<'a, T> {
    current: Option<&'a ReferenceCounter<Node<T>>>,
    remaining: usize,
}

impl<'a, T> Iterator for PersistentListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            self.current = node.next.as_ref();
            self.remaining -= 1;
            &node.element
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for PersistentListIterator<'_, T> {}

/// An owning iterator over elements of a [`PersistentList`].
pub struct PersistentListIntoIterator<T> {
    list: PersistentList<T>,
}

impl<T: Clone> Iterator for PersistentListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (head, tail) = self.list.uncons().map(|(head, tail)| (head.clone(), tail))?;
        self.list = tail;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.length, Some(self.list.length))
    }
}

impl<T: Clone> ExactSizeIterator for PersistentListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Clone for PersistentList<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length,
        }
    }
}

/// Unlinks uniquely owned nodes one at a time so that dropping a long list
/// does not recurse once per node.
///
/// When several threads release handles to a shared node at once,
/// `into_inner` gives the node to exactly one of them.
impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match ReferenceCounter::into_inner(node) {
                Some(mut node) => current = node.next.take(),
                None => break,
            }
        }
    }
}

impl<T> Default for PersistentList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for PersistentList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::build_from_vec(iter.into_iter().collect())
    }
}

impl<T: Clone> IntoIterator for PersistentList<T> {
    type Item = T;
    type IntoIter = PersistentListIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        PersistentListIntoIterator { list: self }
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = PersistentListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.length != other.length {
            return false;
        }
        self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for PersistentList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "[")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "]")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for PersistentList<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct PersistentListVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::de::Visitor<'de> for PersistentListVisitor<T> {
    type Value = PersistentList<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(element) = seq.next_element()? {
            elements.push(element);
        }
        Ok(PersistentList::build_from_vec(elements))
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for PersistentList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(PersistentListVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list_of(elements: &[i32]) -> PersistentList<i32> {
        PersistentList::from_slice(elements)
    }

    #[rstest]
    fn test_display() {
        assert_eq!(format!("{}", PersistentList::<i32>::new()), "[]");
        assert_eq!(format!("{}", list_of(&[1, 2, 3])), "[1, 2, 3]");
    }

    #[rstest]
    fn test_cons_shares_tail() {
        let tail = list_of(&[2, 3]);
        let list = tail.cons(1);
        let tail_node = tail.head.as_ref().unwrap();
        let shared_node = list.head.as_ref().unwrap().next.as_ref().unwrap();
        assert!(ReferenceCounter::ptr_eq(tail_node, shared_node));
    }

    #[rstest]
    fn test_concat_shares_right_operand() {
        let left = list_of(&[1, 2]);
        let right = list_of(&[3, 4]);
        let combined = left.concat(&right);
        assert_eq!(combined.to_vec(), vec![1, 2, 3, 4]);
        let suffix = combined.drop(2);
        assert!(ReferenceCounter::ptr_eq(
            suffix.head.as_ref().unwrap(),
            right.head.as_ref().unwrap()
        ));
    }

    #[rstest]
    fn test_split_at_suffix_is_shared() {
        let list = list_of(&[1, 2, 3, 4]);
        let (_, suffix) = list.split_at(1);
        let original_second = list.tail();
        assert!(ReferenceCounter::ptr_eq(
            suffix.head.as_ref().unwrap(),
            original_second.head.as_ref().unwrap()
        ));
    }

    #[rstest]
    #[should_panic(expected = "first called on an empty list")]
    fn test_first_on_empty_panics() {
        let list: PersistentList<i32> = PersistentList::new();
        let _ = list.first();
    }

    #[rstest]
    #[should_panic(expected = "set_head called on an empty list")]
    fn test_set_head_on_empty_panics() {
        let list: PersistentList<i32> = PersistentList::new();
        let _ = list.set_head(1);
    }

    #[rstest]
    fn test_set_head_replaces_first() {
        let list = list_of(&[1, 2, 3]);
        assert_eq!(list.set_head(9).to_vec(), vec![9, 2, 3]);
        assert_eq!(list.set_head_safe(9), Outcome::success(list_of(&[9, 2, 3])));
        assert!(PersistentList::<i32>::new().set_head_safe(1).is_empty());
    }

    #[rstest]
    fn test_get_at_on_empty_list() {
        let list: PersistentList<i32> = PersistentList::new();
        assert_eq!(list.get_at(0), Outcome::failure(GET_AT_EMPTY));
    }

    #[rstest]
    #[case(0, 10)]
    #[case(2, 30)]
    #[case(4, 50)]
    fn test_get_at_in_range(#[case] index: isize, #[case] expected: i32) {
        let list = list_of(&[10, 20, 30, 40, 50]);
        assert_eq!(list.get_at(index), Outcome::success(&expected));
    }

    #[rstest]
    fn test_fold_left_until_stops_visiting() {
        let list = list_of(&[1, 2, 3]);
        let mut visited = 0;
        let _ = list.fold_left_until(
            0,
            |steps| *steps == 2,
            |steps, _| {
                visited += 1;
                steps + 1
            },
        );
        assert_eq!(visited, 2);
    }

    #[rstest]
    fn test_last_safe() {
        assert_eq!(list_of(&[1, 2, 3]).last_safe(), Outcome::success(&3));
        assert!(PersistentList::<i32>::new().last_safe().is_empty());
    }

    #[rstest]
    fn test_exists_short_circuits() {
        let list = list_of(&[1, 2, 3, 4]);
        let mut visited = 0;
        let found = list.exists(|x| {
            visited += 1;
            *x == 2
        });
        assert!(found);
        assert_eq!(visited, 2);
    }

    #[rstest]
    fn test_for_all() {
        assert!(list_of(&[2, 4]).for_all(|x| x % 2 == 0));
        assert!(!list_of(&[2, 3]).for_all(|x| x % 2 == 0));
        assert!(PersistentList::<i32>::new().for_all(|_| false));
    }

    #[rstest]
    #[case(&[1, 2, 3], &[1, 2], true)]
    #[case(&[1, 2, 3], &[], true)]
    #[case(&[1, 2, 3], &[2], false)]
    #[case(&[1], &[1, 2], false)]
    #[case(&[], &[], true)]
    fn test_starts_with(#[case] list: &[i32], #[case] prefix: &[i32], #[case] expected: bool) {
        assert_eq!(list_of(list).starts_with(&list_of(prefix)), expected);
    }

    #[rstest]
    #[case(&[1, 2, 3, 4], &[3, 4], true)]
    #[case(&[1, 2, 3, 4], &[2, 3], true)]
    #[case(&[1, 2, 3, 4], &[4, 5], false)]
    #[case(&[1, 2], &[1, 2, 3], false)]
    #[case(&[1, 2], &[], true)]
    fn test_has_sublist(#[case] list: &[i32], #[case] sublist: &[i32], #[case] expected: bool) {
        assert_eq!(list_of(list).has_sublist(&list_of(sublist)), expected);
    }

    #[rstest]
    #[case(-1)]
    #[case(6)]
    fn test_split_at_out_of_range_keeps_list_whole(#[case] index: isize) {
        let list = list_of(&[1, 2, 3, 4, 5]);
        let (prefix, suffix) = list.split_at(index);
        assert_eq!(prefix, list);
        assert!(suffix.is_empty());
    }

    #[rstest]
    fn test_split_list_at() {
        let list = list_of(&[1, 2, 3]);
        let parts = list.split_list_at(1);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts.first().to_vec(), vec![1]);
        assert_eq!(parts.tail().first().to_vec(), vec![2, 3]);
        assert_eq!(list.split_list_at(-2).len(), 1);
    }

    #[rstest]
    fn test_divide_depth_three_of_eight() {
        let list = list_of(&[1, 2, 3, 4, 5, 6, 7, 8]);
        let partitions = list.divide(3);
        assert_eq!(partitions.len(), 8);
        assert!(partitions.for_all(|partition| partition.len() == 1));
        assert_eq!(partitions.flatten(), list);
    }

    #[rstest]
    fn test_divide_empty_has_no_partitions() {
        assert!(PersistentList::<i32>::new().divide(4).is_empty());
    }

    #[rstest]
    fn test_divide_depth_zero_is_whole_list() {
        let list = list_of(&[1, 2, 3]);
        let partitions = list.divide(0);
        assert_eq!(partitions.len(), 1);
        assert_eq!(partitions.first(), &list);
    }

    #[rstest]
    fn test_drop_while_and_init() {
        let list = list_of(&[1, 2, 3, 4]);
        assert_eq!(list.drop_while(|x| *x < 3).to_vec(), vec![3, 4]);
        assert_eq!(list.init().to_vec(), vec![1, 2, 3]);
        assert!(PersistentList::<i32>::new().init().is_empty());
    }

    #[rstest]
    fn test_zip_with_stops_at_shorter() {
        let zipped = zip_with(&list_of(&[1, 2, 3]), &list_of(&[10, 20]), |a, b| a + b);
        assert_eq!(zipped.to_vec(), vec![11, 22]);
    }

    #[rstest]
    fn test_product() {
        let pairs = product(&list_of(&[1, 2]), &list_of(&[3, 4]), |a, b| (*a, *b));
        assert_eq!(pairs.to_vec(), vec![(1, 3), (1, 4), (2, 3), (2, 4)]);
    }

    #[rstest]
    fn test_unzip() {
        let pairs: PersistentList<(i32, char)> = vec![(1, 'a'), (2, 'b')].into_iter().collect();
        let (numbers, letters) = unzip(&pairs);
        assert_eq!(numbers.to_vec(), vec![1, 2]);
        assert_eq!(letters.to_vec(), vec!['a', 'b']);
    }

    #[rstest]
    fn test_unfold_outcome_propagates_failure() {
        let result = unfold_outcome(0, |n| {
            if n == 3 {
                Outcome::failure("generator broke")
            } else {
                Outcome::success((n, n + 1))
            }
        });
        assert_eq!(result, Outcome::failure("generator broke"));
    }

    #[rstest]
    fn test_unfold_outcome_stops_on_empty() {
        let result = unfold_outcome(0, |n| if n < 3 { Outcome::success((n, n + 1)) } else { Outcome::empty() });
        assert_eq!(result, Outcome::success(list_of(&[0, 1, 2])));
    }

    #[rstest]
    fn test_range() {
        assert_eq!(range(3, 6).to_vec(), vec![3, 4, 5]);
        assert!(range(5, 5).is_empty());
    }

    #[rstest]
    fn test_iter_is_exact_size() {
        let list = list_of(&[1, 2, 3]);
        let mut iter = list.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);
    }

    #[rstest]
    fn test_dropping_long_list_does_not_overflow() {
        let list: PersistentList<i64> = range(0, 1_000_000);
        assert_eq!(list.len(), 1_000_000);
        drop(list);
    }
}
