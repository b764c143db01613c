use core::cmp::Ordering;

use smallvec::SmallVec;
use tracing::debug;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, NodeView, Side};
use super::walker;
use crate::{Comparator, FindAction, FindNode, Violation, VisitAction, VisitResult, WalkAction, WalkNode};

/// The link a search ended on: where a node hangs, or where a new one would be attached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Link {
    Root,
    Child(Handle, Side),
}

/// An unbalanced binary search tree over an arena of nodes.
///
/// All operations are iterative. Synchronization is left to the owner.
pub(crate) struct RawTree<K, V, C> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    cmp: C,
    /// Side the next two-child removal takes its donor from.
    prefer_left: bool,
}

impl<K, V, C: Comparator<K>> RawTree<K, V, C> {
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
            prefer_left: true,
        }
    }

    pub(crate) fn with_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            cmp,
            prefer_left: true,
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Descends towards `key`, returning the link it ended on and the node holding `key`, if any.
    fn search(&self, key: &K) -> (Link, Option<Handle>) {
        let mut link = Link::Root;
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            let side = match self.cmp.compare(key, node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return (link, Some(handle)),
            };
            link = Link::Child(handle, side);
            cursor = node.child(side);
        }
        (link, None)
    }

    fn set_link(&mut self, link: Link, child: Option<Handle>) {
        match link {
            Link::Root => self.root = child,
            Link::Child(parent, side) => self.nodes.get_mut(parent).set_child(side, child),
        }
    }

    fn attach(&mut self, link: Link, key: K, value: V) {
        let handle = self.nodes.insert(Node::leaf(key, value));
        self.set_link(link, Some(handle));
    }

    /// Unlinks the node at `handle` (hanging from `link`) and frees it.
    fn detach(&mut self, link: Link, handle: Handle) -> (K, V) {
        let replacement = self.splice(handle);
        self.set_link(link, replacement);
        self.nodes.remove(handle).into_entry()
    }

    /// Rearranges the subtrees of the node at `handle` so it can be unlinked, returning the node
    /// that takes its place.
    ///
    /// The replacement is the in-order neighbour ("donor") from the left or right subtree. A node
    /// with one child draws from that child's side. A node with two children draws from the side
    /// `prefer_left` names, and the preference flips so consecutive removals alternate sides.
    fn splice(&mut self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        let (side, subtree) = match (node.left(), node.right()) {
            (None, None) => return None,
            (Some(left), None) => {
                self.prefer_left = true;
                (Side::Left, left)
            }
            (None, Some(right)) => {
                self.prefer_left = false;
                (Side::Right, right)
            }
            (Some(left), Some(_)) if self.prefer_left => {
                self.prefer_left = false;
                (Side::Left, left)
            }
            (Some(_), Some(right)) => {
                self.prefer_left = true;
                (Side::Right, right)
            }
        };
        let outward = side.opposite();
        let outer = node.child(outward);

        // The donor is the extreme node of `subtree` in the `outward` direction.
        let donor = match self.nodes.get(subtree).child(outward) {
            None => subtree,
            Some(mut donor) => {
                let mut parent = subtree;
                while let Some(next) = self.nodes.get(donor).child(outward) {
                    parent = donor;
                    donor = next;
                }
                let orphan = self.nodes.get(donor).child(side);
                self.nodes.get_mut(parent).set_child(outward, orphan);
                self.nodes.get_mut(donor).set_child(side, Some(subtree));
                donor
            }
        };
        self.nodes.get_mut(donor).set_child(outward, outer);

        debug!(removed = ?handle, ?donor, ?side, prefer_left = self.prefer_left, "spliced removal donor");
        Some(donor)
    }

    /// Stores `value` under `key`, returning the previous value if the key was present.
    pub(crate) fn replace_or_insert(&mut self, key: K, value: V) -> Option<V> {
        match self.search(&key) {
            (_, Some(handle)) => Some(self.nodes.get_mut(handle).replace_value(value)),
            (link, None) => {
                self.attach(link, key, value);
                None
            }
        }
    }

    pub(crate) fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let (_, found) = self.search(key);
        found.map(|handle| {
            let node = self.nodes.get(handle);
            (node.key(), node.value())
        })
    }

    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        match self.search(key) {
            (link, Some(handle)) => Some(self.detach(link, handle)),
            (_, None) => None,
        }
    }

    /// Leftmost (`Side::Left`) or rightmost node.
    pub(crate) fn extreme(&self, side: Side) -> Option<(&K, &V)> {
        let mut handle = self.root?;
        while let Some(next) = self.nodes.get(handle).child(side) {
            handle = next;
        }
        let node = self.nodes.get(handle);
        Some((node.key(), node.value()))
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.prefer_left = true;
    }

    pub(crate) fn find<F>(&self, mut f: F) -> Option<(&K, &V)>
    where
        F: FnMut(&dyn FindNode<K, V>) -> FindAction,
    {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            cursor = match f(&NodeView { node, cmp: &self.cmp }) {
                FindAction::Left => node.left(),
                FindAction::Right => node.right(),
                FindAction::Found => return Some((node.key(), node.value())),
                FindAction::NotFound => return None,
            };
        }
        None
    }

    /// Searches for `key` once, lets `f` pick an action, and applies it if it is legal.
    pub(crate) fn visit<F>(&mut self, key: K, f: F) -> Result<VisitResult<V>, Violation>
    where
        F: FnOnce(Option<&V>) -> VisitAction<V>,
    {
        match self.search(&key) {
            (link, Some(handle)) => match f(Some(self.nodes.get(handle).value())) {
                action @ VisitAction::Insert(_) => Err(Violation::VisitFound { action: action.name() }),
                VisitAction::Get => Ok(VisitResult::Found),
                VisitAction::Replace(value) => Ok(VisitResult::Replaced(self.nodes.get_mut(handle).replace_value(value))),
                VisitAction::Remove => {
                    let (_, value) = self.detach(link, handle);
                    Ok(VisitResult::Removed(value))
                }
            },
            (link, None) => match f(None) {
                VisitAction::Insert(value) => {
                    self.attach(link, key, value);
                    Ok(VisitResult::Inserted)
                }
                VisitAction::Get => Ok(VisitResult::NotFound),
                action => Err(Violation::VisitNotFound { action: action.name() }),
            },
        }
    }

    pub(crate) fn walk<F>(&self, f: F) -> Result<(), Violation>
    where
        F: FnMut(&dyn WalkNode<K, V>) -> WalkAction,
    {
        walker::walk(&self.nodes, self.root, &self.cmp, f)
    }

    /// Consumes the tree, returning its entries in ascending order.
    pub(crate) fn into_vec(mut self) -> Vec<(K, V)> {
        let mut entries = Vec::with_capacity(self.len());
        let mut pending: SmallVec<[Handle; 32]> = SmallVec::new();
        let mut cursor = self.root.take();
        loop {
            while let Some(handle) = cursor {
                pending.push(handle);
                cursor = self.nodes.get(handle).left();
            }
            let Some(handle) = pending.pop() else {
                break;
            };
            let node = self.nodes.remove(handle);
            cursor = node.right();
            entries.push(node.into_entry());
        }
        entries
    }
}
