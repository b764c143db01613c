//! The derived operations only rely on the protocol traits; these tests drive them over a
//! container that is not a `Tree` at all.

use std::cell::RefCell;
use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use xbst::{
    Container, Find, FindAction, FindNode, Tree, Violation, Visit, VisitAction, VisitResult, Walk, WalkAction,
    WalkNode, find, visit, walk,
};

// ─── A sorted vector posing as a tree ────────────────────────────────────────

/// Entries kept sorted in a vector.
///
/// `Find` sees it as the implicit balanced tree of a binary search. `Walk` sees it as a chain of
/// right children starting at the smallest key, which is also a valid binary search tree.
#[derive(Default)]
struct SortedVec {
    entries: RefCell<Vec<(u32, String)>>,
}

struct Slot<'a> {
    entry: &'a (u32, String),
    has_left: bool,
    has_right: bool,
    index: usize,
    len: usize,
}

impl FindNode<u32, String> for Slot<'_> {
    fn key(&self) -> &u32 {
        &self.entry.0
    }

    fn value(&self) -> &String {
        &self.entry.1
    }

    fn compare(&self, a: &u32, b: &u32) -> Ordering {
        a.cmp(b)
    }

    fn has_left(&self) -> bool {
        self.has_left
    }

    fn has_right(&self) -> bool {
        self.has_right
    }
}

impl WalkNode<u32, String> for Slot<'_> {
    fn level(&self) -> usize {
        self.index + 1
    }

    fn has_parent(&self) -> bool {
        self.index > 0
    }

    fn has_prev(&self) -> bool {
        self.index > 0
    }

    fn has_next(&self) -> bool {
        self.index + 1 < self.len
    }
}

impl Container for SortedVec {
    type Key = u32;
    type Value = String;

    fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn replace_or_insert(&self, key: u32, value: String) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(index) => {
                entries[index].1 = value;
                true
            }
            Err(index) => {
                entries.insert(index, (key, value));
                false
            }
        }
    }

    fn get(&self, key: &u32) -> Option<String> {
        let entries = self.entries.borrow();
        entries.binary_search_by_key(key, |(k, _)| *k).ok().map(|index| entries[index].1.clone())
    }

    fn remove(&self, key: &u32) -> bool {
        let mut entries = self.entries.borrow_mut();
        match entries.binary_search_by_key(key, |(k, _)| *k) {
            Ok(index) => {
                entries.remove(index);
                true
            }
            Err(_) => false,
        }
    }
}

impl Find for SortedVec {
    fn find<F>(&self, mut f: F) -> Option<(u32, String)>
    where
        F: FnMut(&dyn FindNode<u32, String>) -> FindAction,
    {
        let entries = self.entries.borrow();
        let (mut low, mut high) = (0, entries.len());
        while low < high {
            let mid = low + (high - low) / 2;
            let slot = Slot {
                entry: &entries[mid],
                has_left: low < mid,
                has_right: mid + 1 < high,
                index: mid,
                len: entries.len(),
            };
            match f(&slot) {
                FindAction::Left => high = mid,
                FindAction::Right => low = mid + 1,
                FindAction::Found => return Some(entries[mid].clone()),
                FindAction::NotFound => return None,
            }
        }
        None
    }
}

impl Visit for SortedVec {
    fn try_visit<F>(&self, key: u32, f: F) -> Result<VisitResult<String>, Violation>
    where
        F: FnOnce(Option<&String>) -> VisitAction<String>,
    {
        let mut entries = self.entries.borrow_mut();
        match entries.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(index) => match f(Some(&entries[index].1)) {
                action @ VisitAction::Insert(_) => Err(Violation::VisitFound { action: action.name() }),
                VisitAction::Get => Ok(VisitResult::Found),
                VisitAction::Replace(value) => Ok(VisitResult::Replaced(std::mem::replace(&mut entries[index].1, value))),
                VisitAction::Remove => Ok(VisitResult::Removed(entries.remove(index).1)),
            },
            Err(index) => match f(None) {
                VisitAction::Insert(value) => {
                    entries.insert(index, (key, value));
                    Ok(VisitResult::Inserted)
                }
                VisitAction::Get => Ok(VisitResult::NotFound),
                action => Err(Violation::VisitNotFound { action: action.name() }),
            },
        }
    }
}

impl Walk for SortedVec {
    fn try_walk<F>(&self, mut f: F) -> Result<(), Violation>
    where
        F: FnMut(&dyn WalkNode<u32, String>) -> WalkAction,
    {
        let entries = self.entries.borrow();
        if entries.is_empty() {
            return Ok(());
        }
        let mut index = 0;
        loop {
            let slot = Slot {
                entry: &entries[index],
                has_left: false,
                has_right: index + 1 < entries.len(),
                index,
                len: entries.len(),
            };
            index = match f(&slot) {
                WalkAction::Return => return Ok(()),
                WalkAction::Left => return Err(Violation::WalkLeft),
                WalkAction::Right if slot.has_right() => index + 1,
                WalkAction::Right => return Err(Violation::WalkRight),
                WalkAction::Next if slot.has_next() => index + 1,
                WalkAction::Next => return Err(Violation::WalkNext),
                WalkAction::Prev if slot.has_prev() => index - 1,
                WalkAction::Prev => return Err(Violation::WalkPrev),
                WalkAction::Parent if slot.has_parent() => index - 1,
                WalkAction::Parent => return Err(Violation::WalkParent),
            };
        }
    }
}

fn filled(keys: &[u32]) -> SortedVec {
    let container = SortedVec::default();
    for &key in keys {
        container.replace_or_insert(key, key.to_string());
    }
    container
}

fn entry(key: u32) -> Option<(u32, String)> {
    Some((key, key.to_string()))
}

// ─── Find ────────────────────────────────────────────────────────────────────

#[rstest]
#[case::below_everything(5, None, entry(10))]
#[case::exact(30, entry(30), entry(30))]
#[case::between(35, entry(30), entry(40))]
#[case::above_everything(99, entry(50), None)]
fn find_bounds(#[case] bound: u32, #[case] lower: Option<(u32, String)>, #[case] upper: Option<(u32, String)>) {
    let container = filled(&[10, 20, 30, 40, 50]);
    assert_eq!(find::lower_bound(&container, &bound), lower);
    assert_eq!(find::upper_bound(&container, &bound), upper);
    assert_eq!(walk::lower_bound(&container, &bound), lower);
    assert_eq!(walk::upper_bound(&container, &bound), upper);
}

#[test]
fn find_extremes_and_get() {
    let container = filled(&[7, 3, 9, 1]);
    assert_eq!(find::min(&container), entry(1));
    assert_eq!(find::max(&container), entry(9));
    assert_eq!(find::get(&container, &3), Some(String::from("3")));
    assert_eq!(find::get(&container, &4), None);
    assert_eq!(find::min(&SortedVec::default()), None);
}

// ─── Visit ───────────────────────────────────────────────────────────────────

#[test]
fn visit_combinations_on_any_container() {
    let container = SortedVec::default();
    assert_eq!(visit::get_or_insert(&container, 1, String::from("one")), None);
    assert_eq!(visit::get_and_replace(&container, 1, String::from("uno")), Some(String::from("one")));
    assert!(visit::replace_or_insert(&container, 1, String::from("eins")));
    assert!(!visit::remove_or_insert(&container, 2, String::from("two")));
    assert_eq!(visit::get(&container, 2), Some(String::from("two")));
    assert!(visit::remove(&container, 2));
    assert_eq!(visit::get_and_remove(&container, 1), Some(String::from("eins")));
    assert!(container.is_empty());
}

#[test]
fn visit_violation_through_provided_method() {
    let container = filled(&[1]);
    assert_eq!(
        container.try_visit(2, |_| VisitAction::Replace(String::new())),
        Err(Violation::VisitNotFound { action: "REPLACE" })
    );
    let outcome = std::panic::catch_unwind(|| filled(&[1]).visit(1, |_| VisitAction::Insert(String::new())));
    assert!(outcome.is_err());
    assert_eq!(container.len(), 1);
}

// ─── Walk ────────────────────────────────────────────────────────────────────

#[test]
fn walk_foreach_in_both_directions() {
    let container = filled(&[4, 2, 8, 6]);
    let mut keys = Vec::new();
    walk::foreach_min(&container, |&key, _| keys.push(key));
    assert_eq!(keys, [2, 4, 6, 8]);

    keys.clear();
    walk::foreach_max(&container, |&key, _| keys.push(key));
    assert_eq!(keys, [8, 6, 4, 2]);

    assert_eq!(walk::get(&container, &6), Some(String::from("6")));
    assert_eq!(walk::min(&container), entry(2));
    assert_eq!(walk::max(&container), entry(8));
}

proptest! {
    /// The mock and the real tree answer every derived query identically.
    #[test]
    fn mock_and_tree_agree(
        keys in prop::collection::vec(0u32..300, 0..100),
        probes in prop::collection::vec(0u32..320, 1..40),
    ) {
        let container = filled(&keys);
        let tree: Tree<u32, String> = keys.iter().map(|&k| (k, k.to_string())).collect();

        for probe in &probes {
            prop_assert_eq!(find::lower_bound(&container, probe), find::lower_bound(&tree, probe));
            prop_assert_eq!(find::upper_bound(&container, probe), find::upper_bound(&tree, probe));
            prop_assert_eq!(walk::lower_bound(&container, probe), walk::lower_bound(&tree, probe));
            prop_assert_eq!(walk::get(&container, probe), tree.get(probe));
        }

        let mut from_mock = Vec::new();
        walk::foreach_max(&container, |&k, _| from_mock.push(k));
        let mut from_tree = Vec::new();
        walk::foreach_max(&tree, |&k, _| from_tree.push(k));
        prop_assert_eq!(from_mock, from_tree);
    }
}
