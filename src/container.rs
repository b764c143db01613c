/// The minimal key/value container the protocols plug into.
///
/// Methods take `&self`: a conforming container serializes its own mutations (the reference
/// [`Tree`](crate::Tree) holds a lock for the duration of every call).
///
/// [`Find`](crate::Find), [`Visit`](crate::Visit) and [`Walk`](crate::Walk) extend this trait;
/// the derived operations in [`find`](crate::find), [`visit`](crate::visit) and
/// [`walk`](crate::walk) accept any container implementing them.
pub trait Container {
    type Key;
    type Value;

    /// Returns `true` if the container holds no entries.
    fn is_empty(&self) -> bool;

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Stores `value` under `key`, returning `true` if an existing value was replaced and `false`
    /// if a new entry was inserted.
    fn replace_or_insert(&self, key: Self::Key, value: Self::Value) -> bool;

    /// Returns a copy of the value stored under `key`.
    fn get(&self, key: &Self::Key) -> Option<Self::Value>
    where
        Self::Value: Clone;

    /// Removes `key`, returning `true` if it was present.
    fn remove(&self, key: &Self::Key) -> bool;
}
