use core::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// A comparator is supplied once, when a [`Tree`](crate::Tree) is built, and is never changed
/// afterwards. It must define a strict total order: for any two keys exactly one of `Less`,
/// `Equal` or `Greater` holds, consistently and transitively. Violating this is a logic error; the
/// tree stays memory safe but lookups may miss keys that are present.
///
/// Any closure `Fn(&K, &K) -> Ordering` is a comparator:
///
/// ```
/// use xbst::Tree;
///
/// let tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// tree.replace_or_insert(1, "one");
/// tree.replace_or_insert(2, "two");
///
/// assert_eq!(tree.min(), Some((2, "two")));
/// ```
pub trait Comparator<K: ?Sized> {
    /// Compares `a` against `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
///
/// ```
/// use xbst::{Natural, Reverse, Tree};
///
/// let mut tree = Tree::with_comparator(Reverse(Natural));
/// tree.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
///
/// assert_eq!(tree.into_vec(), vec![(3, 'c'), (2, 'b'), (1, 'a')]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reverse<C>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
