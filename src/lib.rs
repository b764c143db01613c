//! An extensible binary search tree.
//!
//! This crate provides [`Tree`], an ordered key/value map on an unbalanced binary search tree,
//! together with three extension protocols that let caller code drive the tree directly:
//!
//! - [`Find`] - a callback steers a downward search with [`FindAction`]s.
//! - [`Visit`] - a single descent locates a key, then a callback chooses to insert, keep, replace
//!   or remove it with a [`VisitAction`].
//! - [`Walk`] - a callback moves freely with [`WalkAction`]s: down to children, up to the parent,
//!   or to the in-order predecessor or successor. Nodes store no parent links.
//!
//! The protocols are traits over a minimal [`Container`]. The modules [`find`], [`visit`] and
//! [`walk`] build the everyday operations (`get`, `min`, `max`, bounds, ordered iteration and the
//! get / insert / replace / remove combinations) purely on top of them, so they work with any
//! container that implements the protocols.
//!
//! # Example
//!
//! ```
//! use xbst::{find, visit, walk, Tree};
//!
//! let tree = Tree::new();
//! for (planet, distance) in [("Mercury", 0.4), ("Venus", 0.7), ("Earth", 1.0), ("Mars", 1.5)] {
//!     tree.replace_or_insert(planet, distance);
//! }
//!
//! // Find: the last planet alphabetically up to "N".
//! assert_eq!(find::lower_bound(&tree, &"N"), Some(("Mercury", 0.4)));
//!
//! // Visit: read the old value and remove it in one descent.
//! assert_eq!(visit::get_and_remove(&tree, "Venus"), Some(0.7));
//!
//! // Walk: in-order iteration without an iterator.
//! let mut names = Vec::new();
//! walk::foreach_min(&tree, |name, _| names.push(*name));
//! assert_eq!(names, ["Earth", "Mars", "Mercury"]);
//! ```
//!
//! # Contract violations
//!
//! Asking a protocol for something the current position does not allow (inserting a key that is
//! present, walking left from a node without a left child, ...) is a programmer error reported as
//! a [`Violation`]. The `try_` entry points return it, the plain ones panic with its message. The
//! tree is never modified by a rejected action.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod cmp;
mod container;
mod error;
mod raw;
mod tree;

pub mod find;
pub mod visit;
pub mod walk;

pub use cmp::{Comparator, Natural, Reverse};
pub use container::Container;
pub use error::Violation;
pub use find::{Find, FindAction, FindNode};
pub use tree::Tree;
pub use visit::{Visit, VisitAction, VisitResult};
pub use walk::{Walk, WalkAction, WalkNode};
