//! The Find protocol: a caller-directed, downward-only search.
//!
//! A [`Find`] container starts at the root and hands each node to the callback, which answers
//! with a [`FindAction`]. Navigation never goes back up, so implementations can search without
//! recursion.
//!
//! The free functions in this module express the usual lookups as fixed callback policies and
//! work with any [`Find`] container:
//!
//! ```
//! use xbst::{find, Tree};
//!
//! let tree: Tree<i32, &str> = [(10, "ten"), (20, "twenty"), (30, "thirty")].into_iter().collect();
//!
//! assert_eq!(find::min(&tree), Some((10, "ten")));
//! assert_eq!(find::lower_bound(&tree, &25), Some((20, "twenty")));
//! assert_eq!(find::upper_bound(&tree, &25), Some((30, "thirty")));
//! assert_eq!(find::upper_bound(&tree, &31), None);
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::Container;

/// What a [`Find`] callback wants to do from the node it was shown.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum FindAction {
    /// Continue with the left child; stops with no result if there is none.
    Left,
    /// Continue with the right child; stops with no result if there is none.
    Right,
    /// Stop and report the current node.
    Found,
    /// Stop without a result.
    NotFound,
}

impl FindAction {
    /// The action's name as used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            FindAction::Left => "LEFT",
            FindAction::Right => "RIGHT",
            FindAction::Found => "FOUND",
            FindAction::NotFound => "NOT_FOUND",
        }
    }
}

impl fmt::Display for FindAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of a node, handed to [`Find`] callbacks.
pub trait FindNode<K, V> {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    /// Compares two keys with the container's comparator.
    fn compare(&self, a: &K, b: &K) -> Ordering;
    fn has_left(&self) -> bool;
    fn has_right(&self) -> bool;
}

/// A container that supports callback-directed downward search.
pub trait Find: Container {
    /// Runs `f` from the root downwards until it answers [`FindAction::Found`] (returning the
    /// current entry), [`FindAction::NotFound`], or steps onto a missing child.
    ///
    /// An empty container returns `None` without calling `f`.
    fn find<F>(&self, f: F) -> Option<(Self::Key, Self::Value)>
    where
        F: FnMut(&dyn FindNode<Self::Key, Self::Value>) -> FindAction,
        Self::Key: Clone,
        Self::Value: Clone;
}

/// Returns a copy of the value stored under `key`.
pub fn get<T>(tree: &T, key: &T::Key) -> Option<T::Value>
where
    T: Find + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    tree.find(|node| match node.compare(key, node.key()) {
        Ordering::Less => FindAction::Left,
        Ordering::Greater => FindAction::Right,
        Ordering::Equal => FindAction::Found,
    })
    .map(|(_, value)| value)
}

/// Returns the entry with the smallest key.
pub fn min<T>(tree: &T) -> Option<(T::Key, T::Value)>
where
    T: Find + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    tree.find(|node| if node.has_left() { FindAction::Left } else { FindAction::Found })
}

/// Returns the entry with the largest key.
pub fn max<T>(tree: &T) -> Option<(T::Key, T::Value)>
where
    T: Find + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    tree.find(|node| if node.has_right() { FindAction::Right } else { FindAction::Found })
}

/// Returns the entry with the greatest key less than or equal to `bound`.
pub fn lower_bound<T>(tree: &T, bound: &T::Key) -> Option<(T::Key, T::Value)>
where
    T: Find + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    let mut best: Option<(T::Key, T::Value)> = None;
    tree.find(|node| match node.compare(node.key(), bound) {
        Ordering::Less => {
            // Everything further right is greater than this node, so it can only improve.
            if best.as_ref().is_none_or(|(key, _)| node.compare(node.key(), key) == Ordering::Greater) {
                best = Some((node.key().clone(), node.value().clone()));
            }
            FindAction::Right
        }
        Ordering::Greater => FindAction::Left,
        Ordering::Equal => {
            best = Some((node.key().clone(), node.value().clone()));
            FindAction::Found
        }
    });
    best
}

/// Returns the entry with the least key greater than or equal to `bound`.
pub fn upper_bound<T>(tree: &T, bound: &T::Key) -> Option<(T::Key, T::Value)>
where
    T: Find + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    let mut best: Option<(T::Key, T::Value)> = None;
    tree.find(|node| match node.compare(node.key(), bound) {
        Ordering::Greater => {
            if best.as_ref().is_none_or(|(key, _)| node.compare(node.key(), key) == Ordering::Less) {
                best = Some((node.key().clone(), node.value().clone()));
            }
            FindAction::Left
        }
        Ordering::Less => FindAction::Right,
        Ordering::Equal => {
            best = Some((node.key().clone(), node.value().clone()));
            FindAction::Found
        }
    });
    best
}
