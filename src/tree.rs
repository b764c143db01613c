use core::fmt;

use parking_lot::Mutex;

use crate::raw::{RawTree, Side};
use crate::{
    Comparator, Container, Find, FindAction, FindNode, Natural, Violation, Visit, VisitAction, VisitResult, Walk,
    WalkAction, WalkNode, walk,
};

/// An ordered map built on an unbalanced binary search tree.
///
/// Keys are ordered by a [`Comparator`] fixed at construction; [`Tree::new`] uses the keys'
/// [`Ord`] implementation. Besides the usual map operations the tree implements the three
/// extension protocols:
///
/// - [`Find`]: a callback steers a downward search.
/// - [`Visit`]: a callback decides what happens to a key once it has been located.
/// - [`Walk`]: a callback navigates freely, including back up to parents and sideways to in-order
///   neighbours.
///
/// The tree does not rebalance itself. Lookups, insertions and removals cost O(height), which
/// degrades to O(n) for sorted insertions. Removing a node with two children alternates between
/// its in-order predecessor and successor as the replacement.
///
/// Every method takes `&self`: the tree serializes access internally, holding its lock for the
/// whole call, including every protocol callback. A callback must therefore not call back into
/// the same tree; doing so deadlocks. Values are returned by clone because they cannot outlive
/// the lock.
///
/// # Examples
///
/// ```
/// use xbst::Tree;
///
/// let stock = Tree::new();
/// stock.replace_or_insert("apples", 3);
/// stock.replace_or_insert("pears", 5);
///
/// assert_eq!(stock.get(&"apples"), Some(3));
/// assert!(stock.replace_or_insert("apples", 4));
/// assert_eq!(stock.len(), 2);
///
/// assert!(stock.remove(&"pears"));
/// assert_eq!(format!("{stock:?}"), r#"{"apples": 4}"#);
/// ```
pub struct Tree<K, V, C = Natural> {
    raw: Mutex<RawTree<K, V, C>>,
}

impl<K: Ord, V> Tree<K, V> {
    /// Makes a new, empty `Tree` ordered by [`Ord`].
    ///
    /// Does not allocate anything on its own.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Makes a new, empty `Tree` with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_comparator_and_capacity(Natural, capacity)
    }
}

impl<K, V, C: Comparator<K>> Tree<K, V, C> {
    /// Makes a new, empty `Tree` ordered by `cmp`.
    #[must_use]
    pub const fn with_comparator(cmp: C) -> Self {
        Self {
            raw: Mutex::new(RawTree::new(cmp)),
        }
    }

    /// Makes a new, empty `Tree` ordered by `cmp` with room for at least `capacity` entries.
    #[must_use]
    pub fn with_comparator_and_capacity(cmp: C, capacity: usize) -> Self {
        Self {
            raw: Mutex::new(RawTree::with_capacity(cmp, capacity)),
        }
    }

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.raw.lock().len()
    }

    /// Returns `true` if the tree contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of entries the tree can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.raw.lock().capacity()
    }

    /// Stores `value` under `key`.
    ///
    /// Returns `true` if the key was already present (its value is overwritten, the key itself is
    /// kept) and `false` if a new entry was created.
    pub fn replace_or_insert(&self, key: K, value: V) -> bool {
        self.raw.lock().replace_or_insert(key, value).is_some()
    }

    /// Returns a copy of the value stored under `key`.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.raw.lock().get_key_value(key).map(|(_, value)| value.clone())
    }

    /// Returns copies of the stored key equal to `key` and its value.
    pub fn get_key_value(&self, key: &K) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.raw.lock().get_key_value(key).map(|(key, value)| (key.clone(), value.clone()))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.lock().get_key_value(key).is_some()
    }

    /// Removes `key`, returning `true` if it was present.
    pub fn remove(&self, key: &K) -> bool {
        self.raw.lock().remove(key).is_some()
    }

    /// Removes `key`, returning the stored key and its value if it was present.
    pub fn remove_entry(&self, key: &K) -> Option<(K, V)> {
        self.raw.lock().remove(key)
    }

    /// Returns the entry with the smallest key.
    pub fn min(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.raw.lock().extreme(Side::Left).map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Returns the entry with the largest key.
    pub fn max(&self) -> Option<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.raw.lock().extreme(Side::Right).map(|(key, value)| (key.clone(), value.clone()))
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.raw.lock().clear();
    }

    /// Consumes the tree, returning its entries in ascending key order.
    pub fn into_vec(self) -> Vec<(K, V)> {
        self.raw.into_inner().into_vec()
    }

    /// See [`Find::find`].
    pub fn find<F>(&self, f: F) -> Option<(K, V)>
    where
        F: FnMut(&dyn FindNode<K, V>) -> FindAction,
        K: Clone,
        V: Clone,
    {
        self.raw.lock().find(f).map(|(key, value)| (key.clone(), value.clone()))
    }

    /// See [`Visit::try_visit`].
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] if the callback's action is illegal for the search outcome.
    pub fn try_visit<F>(&self, key: K, f: F) -> Result<VisitResult<V>, Violation>
    where
        F: FnOnce(Option<&V>) -> VisitAction<V>,
    {
        self.raw.lock().visit(key, f)
    }

    /// See [`Visit::visit`].
    ///
    /// # Panics
    ///
    /// Panics if the callback's action is illegal for the search outcome.
    #[track_caller]
    pub fn visit<F>(&self, key: K, f: F) -> VisitResult<V>
    where
        F: FnOnce(Option<&V>) -> VisitAction<V>,
    {
        Visit::visit(self, key, f)
    }

    /// See [`Walk::try_walk`].
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] if the callback asks for a move the current node does not allow.
    pub fn try_walk<F>(&self, f: F) -> Result<(), Violation>
    where
        F: FnMut(&dyn WalkNode<K, V>) -> WalkAction,
    {
        self.raw.lock().walk(f)
    }

    /// See [`Walk::walk`].
    ///
    /// # Panics
    ///
    /// Panics if the callback asks for a move the current node does not allow.
    #[track_caller]
    pub fn walk<F>(&self, f: F)
    where
        F: FnMut(&dyn WalkNode<K, V>) -> WalkAction,
    {
        Walk::walk(self, f);
    }
}

impl<K, V, C: Comparator<K>> Container for Tree<K, V, C> {
    type Key = K;
    type Value = V;

    fn is_empty(&self) -> bool {
        Tree::is_empty(self)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }

    fn replace_or_insert(&self, key: K, value: V) -> bool {
        Tree::replace_or_insert(self, key, value)
    }

    fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        Tree::get(self, key)
    }

    fn remove(&self, key: &K) -> bool {
        Tree::remove(self, key)
    }
}

impl<K, V, C: Comparator<K>> Find for Tree<K, V, C> {
    fn find<F>(&self, f: F) -> Option<(K, V)>
    where
        F: FnMut(&dyn FindNode<K, V>) -> FindAction,
        K: Clone,
        V: Clone,
    {
        Tree::find(self, f)
    }
}

impl<K, V, C: Comparator<K>> Visit for Tree<K, V, C> {
    fn try_visit<F>(&self, key: K, f: F) -> Result<VisitResult<V>, Violation>
    where
        F: FnOnce(Option<&V>) -> VisitAction<V>,
    {
        Tree::try_visit(self, key, f)
    }
}

impl<K, V, C: Comparator<K>> Walk for Tree<K, V, C> {
    fn try_walk<F>(&self, f: F) -> Result<(), Violation>
    where
        F: FnMut(&dyn WalkNode<K, V>) -> WalkAction,
    {
        Tree::try_walk(self, f)
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for Tree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        walk::foreach_min(self, |key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

impl<K, V, C: Comparator<K> + Default> Default for Tree<K, V, C> {
    fn default() -> Self {
        Tree::with_comparator(C::default())
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for Tree<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut tree = Tree::default();
        tree.extend(iter);
        tree
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for Tree<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let raw = self.raw.get_mut();
        for (key, value) in iter {
            raw.replace_or_insert(key, value);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::Reverse;
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Tree<i32, String>: Send, Sync, Default, fmt::Debug);

    #[test]
    fn debug_renders_in_order() {
        let tree: Tree<i32, char> = [(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();
        assert_eq!(format!("{tree:?}"), "{1: 'a', 2: 'b', 3: 'c'}");
        assert_eq!(format!("{:?}", Tree::<i32, char>::new()), "{}");
    }

    #[test]
    fn reverse_comparator_orders_everything() {
        let tree: Tree<i32, (), Reverse<Natural>> = (1..=5).map(|k| (k, ())).collect();
        assert_eq!(tree.min(), Some((5, ())));
        assert_eq!(tree.max(), Some((1, ())));
        assert_eq!(crate::find::lower_bound(&tree, &3), Some((3, ())));
        assert_eq!(tree.into_vec().into_iter().map(|(k, ())| k).collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
    }

    #[test]
    fn entries_and_clear() {
        let tree = Tree::with_capacity(8);
        assert!(tree.capacity() >= 8);
        assert!(!tree.replace_or_insert(String::from("k"), 1));
        assert_eq!(tree.get_key_value(&String::from("k")), Some((String::from("k"), 1)));
        assert!(tree.contains_key(&String::from("k")));
        assert_eq!(tree.remove_entry(&String::from("k")), Some((String::from("k"), 1)));
        assert!(tree.is_empty());

        tree.replace_or_insert(String::from("a"), 2);
        tree.clear();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.min(), None);
    }

    #[test]
    fn container_methods_match_inherent() {
        fn fill<T: Container<Key = u8, Value = u8>>(container: &T) {
            for key in [3, 1, 2, 3] {
                container.replace_or_insert(key, key);
            }
            assert!(container.remove(&1));
        }
        let tree = Tree::new();
        fill(&tree);
        assert_eq!(Container::len(&tree), 2);
        assert_eq!(Container::get(&tree, &3), Some(3));
        assert!(!Container::is_empty(&tree));
    }
}
