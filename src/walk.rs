//! The Walk protocol: free navigation over the tree.
//!
//! A [`Walk`] container shows the callback one node at a time and moves wherever the callback
//! asks: down to a child, back up to the parent, or sideways to the in-order predecessor or
//! successor. Moving somewhere that does not exist is a [`Violation`]; the `has_*` queries on
//! [`WalkNode`] report exactly which moves are legal.
//!
//! ```
//! use xbst::{walk, Tree, WalkAction};
//!
//! let tree: Tree<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
//!
//! // Start at the root and step to its in-order successor.
//! let mut keys = Vec::new();
//! tree.walk(|node| {
//!     keys.push(*node.key());
//!     if keys.len() == 1 { WalkAction::Next } else { WalkAction::Return }
//! });
//! assert_eq!(keys, [2, 3]);
//!
//! let mut descending = Vec::new();
//! walk::foreach_max(&tree, |key, _| descending.push(*key));
//! assert_eq!(descending, [3, 2, 1]);
//! ```

use core::cmp::Ordering;
use core::fmt;

use crate::error::violation;
use crate::{Container, FindNode, Violation};

/// Where a [`Walk`] callback wants to go next.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum WalkAction {
    /// End the walk.
    Return,
    /// Move to the in-order predecessor. Requires [`WalkNode::has_prev`].
    Prev,
    /// Move to the in-order successor. Requires [`WalkNode::has_next`].
    Next,
    /// Move to the left child. Requires [`FindNode::has_left`].
    Left,
    /// Move to the right child. Requires [`FindNode::has_right`].
    Right,
    /// Move back up to the parent. Requires [`WalkNode::has_parent`].
    Parent,
}

impl WalkAction {
    /// The action's name as used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            WalkAction::Return => "RETURN",
            WalkAction::Prev => "PREV",
            WalkAction::Next => "NEXT",
            WalkAction::Left => "LEFT",
            WalkAction::Right => "RIGHT",
            WalkAction::Parent => "PARENT",
        }
    }
}

impl fmt::Display for WalkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of a node during a walk.
pub trait WalkNode<K, V>: FindNode<K, V> {
    /// Depth of the node; the root is at level 1.
    fn level(&self) -> usize;
    fn has_parent(&self) -> bool;
    fn has_prev(&self) -> bool;
    fn has_next(&self) -> bool;
}

/// A container that can be navigated in any direction.
pub trait Walk: Container {
    /// Starts at the root and calls `f` on every node the walk lands on until `f` answers
    /// [`WalkAction::Return`]. An empty container never calls `f`.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] if `f` asks for a move the current node does not allow. Walking
    /// never modifies the container.
    fn try_walk<F>(&self, f: F) -> Result<(), Violation>
    where
        F: FnMut(&dyn WalkNode<Self::Key, Self::Value>) -> WalkAction;

    /// Like [`try_walk`](Walk::try_walk), but an illegal move is fatal.
    ///
    /// # Panics
    ///
    /// Panics with the [`Violation`] message if `f` asks for an illegal move.
    #[track_caller]
    fn walk<F>(&self, f: F)
    where
        F: FnMut(&dyn WalkNode<Self::Key, Self::Value>) -> WalkAction,
    {
        if let Err(v) = self.try_walk(f) {
            violation(v);
        }
    }
}

/// Returns a copy of the value stored under `key`.
pub fn get<T>(tree: &T, key: &T::Key) -> Option<T::Value>
where
    T: Walk + ?Sized,
    T::Value: Clone,
{
    let mut found = None;
    tree.walk(|node| match node.compare(key, node.key()) {
        Ordering::Less if node.has_left() => WalkAction::Left,
        Ordering::Greater if node.has_right() => WalkAction::Right,
        Ordering::Equal => {
            found = Some(node.value().clone());
            WalkAction::Return
        }
        _ => WalkAction::Return,
    });
    found
}

/// Returns the entry with the smallest key.
pub fn min<T>(tree: &T) -> Option<(T::Key, T::Value)>
where
    T: Walk + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    let mut found = None;
    tree.walk(|node| {
        if node.has_left() {
            return WalkAction::Left;
        }
        found = Some((node.key().clone(), node.value().clone()));
        WalkAction::Return
    });
    found
}

/// Returns the entry with the largest key.
pub fn max<T>(tree: &T) -> Option<(T::Key, T::Value)>
where
    T: Walk + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    let mut found = None;
    tree.walk(|node| {
        if node.has_right() {
            return WalkAction::Right;
        }
        found = Some((node.key().clone(), node.value().clone()));
        WalkAction::Return
    });
    found
}

/// Returns the entry with the greatest key less than or equal to `bound`.
pub fn lower_bound<T>(tree: &T, bound: &T::Key) -> Option<(T::Key, T::Value)>
where
    T: Walk + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    let mut best: Option<(T::Key, T::Value)> = None;
    tree.walk(|node| match node.compare(node.key(), bound) {
        Ordering::Less => {
            if best.as_ref().is_none_or(|(key, _)| node.compare(node.key(), key) == Ordering::Greater) {
                best = Some((node.key().clone(), node.value().clone()));
            }
            if node.has_right() { WalkAction::Right } else { WalkAction::Return }
        }
        Ordering::Greater => {
            if node.has_left() { WalkAction::Left } else { WalkAction::Return }
        }
        Ordering::Equal => {
            best = Some((node.key().clone(), node.value().clone()));
            WalkAction::Return
        }
    });
    best
}

/// Returns the entry with the least key greater than or equal to `bound`.
pub fn upper_bound<T>(tree: &T, bound: &T::Key) -> Option<(T::Key, T::Value)>
where
    T: Walk + ?Sized,
    T::Key: Clone,
    T::Value: Clone,
{
    let mut best: Option<(T::Key, T::Value)> = None;
    tree.walk(|node| match node.compare(node.key(), bound) {
        Ordering::Greater => {
            if best.as_ref().is_none_or(|(key, _)| node.compare(node.key(), key) == Ordering::Less) {
                best = Some((node.key().clone(), node.value().clone()));
            }
            if node.has_left() { WalkAction::Left } else { WalkAction::Return }
        }
        Ordering::Less => {
            if node.has_right() { WalkAction::Right } else { WalkAction::Return }
        }
        Ordering::Equal => {
            best = Some((node.key().clone(), node.value().clone()));
            WalkAction::Return
        }
    });
    best
}

/// Calls `f` on every entry in ascending key order.
pub fn foreach_min<T, F>(tree: &T, mut f: F)
where
    T: Walk + ?Sized,
    F: FnMut(&T::Key, &T::Value),
{
    let mut at_min = false;
    tree.walk(|node| {
        if !at_min {
            if node.has_left() {
                return WalkAction::Left;
            }
            at_min = true;
        }
        f(node.key(), node.value());
        if node.has_next() { WalkAction::Next } else { WalkAction::Return }
    });
}

/// Calls `f` on every entry in descending key order.
pub fn foreach_max<T, F>(tree: &T, mut f: F)
where
    T: Walk + ?Sized,
    F: FnMut(&T::Key, &T::Value),
{
    let mut at_max = false;
    tree.walk(|node| {
        if !at_max {
            if node.has_right() {
                return WalkAction::Right;
            }
            at_max = true;
        }
        f(node.key(), node.value());
        if node.has_prev() { WalkAction::Prev } else { WalkAction::Return }
    });
}
