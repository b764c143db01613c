use core::cmp::Ordering;

use super::handle::Handle;
use crate::{Comparator, FindNode};

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A tree node. The key never changes after insertion; the value may be replaced in place.
///
/// Children are owned exclusively through their handles. There is no parent link.
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K, V> Node<K, V> {
    /// Creates a childless node.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    /// Replaces the value, returning the previous one.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        core::mem::replace(&mut self.value, value)
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }
}

/// A node as shown to protocol callbacks.
pub(crate) struct NodeView<'a, K, V, C> {
    pub(crate) node: &'a Node<K, V>,
    pub(crate) cmp: &'a C,
}

impl<K, V, C: Comparator<K>> FindNode<K, V> for NodeView<'_, K, V, C> {
    fn key(&self) -> &K {
        self.node.key()
    }

    fn value(&self) -> &V {
        self.node.value()
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.cmp.compare(a, b)
    }

    fn has_left(&self) -> bool {
        self.node.left.is_some()
    }

    fn has_right(&self) -> bool {
        self.node.right.is_some()
    }
}
