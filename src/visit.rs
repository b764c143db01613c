//! The Visit protocol: inspect a key's slot, then decide its fate, in one descent.
//!
//! A [`Visit`] container searches for a key and hands the callback the current value (if any).
//! The callback answers with a [`VisitAction`] that inserts, keeps, replaces or removes the
//! entry. Compared to a `get` followed by an `insert` or `remove`, the tree is only searched once.
//!
//! Not every action is legal in every situation:
//!
//! | key        | `Insert`      | `Get`      | `Replace`     | `Remove`     |
//! |------------|---------------|------------|---------------|--------------|
//! | found      | violation     | `Found`    | `Replaced(_)` | `Removed(_)` |
//! | not found  | `Inserted`    | `NotFound` | violation     | violation    |
//!
//! The free functions in this module cover every combination of get / insert / replace / remove
//! as fixed callback policies:
//!
//! ```
//! use xbst::{visit, Tree};
//!
//! let tree = Tree::new();
//! assert_eq!(visit::get_or_insert(&tree, "apples", 3), None);
//! assert_eq!(visit::get_or_insert(&tree, "apples", 5), Some(3));
//! assert_eq!(visit::get_and_replace(&tree, "apples", 7), Some(3));
//! assert_eq!(visit::get_and_remove(&tree, "apples"), Some(7));
//! assert!(tree.is_empty());
//! ```

use core::fmt;

use crate::error::violation;
use crate::{Container, Violation};

/// What a [`Visit`] callback wants done with the visited key.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VisitAction<V> {
    /// Store the value under the (absent) key.
    Insert(V),
    /// Leave the container unchanged.
    Get,
    /// Overwrite the (present) key's value.
    Replace(V),
    /// Remove the (present) key.
    Remove,
}

impl<V> VisitAction<V> {
    /// The action's name as used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            VisitAction::Insert(_) => "INSERT",
            VisitAction::Get => "GET",
            VisitAction::Replace(_) => "REPLACE",
            VisitAction::Remove => "REMOVE",
        }
    }
}

impl<V> fmt::Display for VisitAction<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a [`Visit`] did. Values displaced from the container are handed back.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VisitResult<V> {
    Inserted,
    NotFound,
    Found,
    /// The key's previous value.
    Replaced(V),
    /// The removed key's value.
    Removed(V),
}

impl<V> VisitResult<V> {
    /// The result's name as used in diagnostics.
    pub const fn name(&self) -> &'static str {
        match self {
            VisitResult::Inserted => "INSERTED",
            VisitResult::NotFound => "NOT_FOUND",
            VisitResult::Found => "FOUND",
            VisitResult::Replaced(_) => "REPLACED",
            VisitResult::Removed(_) => "REMOVED",
        }
    }
}

impl<V> fmt::Display for VisitResult<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A container that can locate a key and act on it in the same pass.
pub trait Visit: Container {
    /// Searches for `key` and calls `f` exactly once with its value (`None` if absent), then
    /// applies the returned action.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] if the action is illegal for the outcome of the search. The
    /// container is left untouched in that case.
    fn try_visit<F>(&self, key: Self::Key, f: F) -> Result<VisitResult<Self::Value>, Violation>
    where
        F: FnOnce(Option<&Self::Value>) -> VisitAction<Self::Value>;

    /// Like [`try_visit`](Visit::try_visit), but an illegal action is fatal.
    ///
    /// # Panics
    ///
    /// Panics with the [`Violation`] message if the action is illegal.
    #[track_caller]
    fn visit<F>(&self, key: Self::Key, f: F) -> VisitResult<Self::Value>
    where
        F: FnOnce(Option<&Self::Value>) -> VisitAction<Self::Value>,
    {
        match self.try_visit(key, f) {
            Ok(result) => result,
            Err(v) => violation(v),
        }
    }
}

/// Returns a copy of the value stored under `key`.
pub fn get<T>(tree: &T, key: T::Key) -> Option<T::Value>
where
    T: Visit + ?Sized,
    T::Value: Clone,
{
    let mut found = None;
    tree.visit(key, |value| {
        found = value.cloned();
        VisitAction::Get
    });
    found
}

/// Returns a copy of the existing value, or inserts `value` and returns `None`.
pub fn get_or_insert<T>(tree: &T, key: T::Key, value: T::Value) -> Option<T::Value>
where
    T: Visit + ?Sized,
    T::Value: Clone,
{
    let mut found = None;
    tree.visit(key, |existing| match existing {
        Some(existing) => {
            found = Some(existing.clone());
            VisitAction::Get
        }
        None => VisitAction::Insert(value),
    });
    found
}

/// Replaces an existing value and returns the old one; does nothing if `key` is absent.
pub fn get_and_replace<T>(tree: &T, key: T::Key, value: T::Value) -> Option<T::Value>
where
    T: Visit + ?Sized,
{
    match tree.visit(key, |existing| if existing.is_some() { VisitAction::Replace(value) } else { VisitAction::Get }) {
        VisitResult::Replaced(old) => Some(old),
        _ => None,
    }
}

/// Replaces an existing value and returns the old one, or inserts `value` and returns `None`.
pub fn get_and_replace_or_insert<T>(tree: &T, key: T::Key, value: T::Value) -> Option<T::Value>
where
    T: Visit + ?Sized,
{
    match tree.visit(key, |existing| {
        if existing.is_some() { VisitAction::Replace(value) } else { VisitAction::Insert(value) }
    }) {
        VisitResult::Replaced(old) => Some(old),
        _ => None,
    }
}

/// Removes `key` and returns its value.
pub fn get_and_remove<T>(tree: &T, key: T::Key) -> Option<T::Value>
where
    T: Visit + ?Sized,
{
    match tree.visit(key, |existing| if existing.is_some() { VisitAction::Remove } else { VisitAction::Get }) {
        VisitResult::Removed(old) => Some(old),
        _ => None,
    }
}

/// Removes `key` and returns its value, or inserts `value` and returns `None`.
pub fn get_and_remove_or_insert<T>(tree: &T, key: T::Key, value: T::Value) -> Option<T::Value>
where
    T: Visit + ?Sized,
{
    match tree.visit(key, |existing| if existing.is_some() { VisitAction::Remove } else { VisitAction::Insert(value) }) {
        VisitResult::Removed(old) => Some(old),
        _ => None,
    }
}

/// Overwrites the value of an existing key. Returns `false` (and changes nothing) if absent.
pub fn replace<T>(tree: &T, key: T::Key, value: T::Value) -> bool
where
    T: Visit + ?Sized,
{
    get_and_replace(tree, key, value).is_some()
}

/// Overwrites or inserts. Returns `true` if a value was replaced.
pub fn replace_or_insert<T>(tree: &T, key: T::Key, value: T::Value) -> bool
where
    T: Visit + ?Sized,
{
    get_and_replace_or_insert(tree, key, value).is_some()
}

/// Removes `key`. Returns `true` if it was present.
pub fn remove<T>(tree: &T, key: T::Key) -> bool
where
    T: Visit + ?Sized,
{
    get_and_remove(tree, key).is_some()
}

/// Removes `key` if present, otherwise inserts `value`. Returns `true` if a key was removed.
pub fn remove_or_insert<T>(tree: &T, key: T::Key, value: T::Value) -> bool
where
    T: Visit + ?Sized,
{
    get_and_remove_or_insert(tree, key, value).is_some()
}
