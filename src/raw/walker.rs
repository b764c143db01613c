use core::cmp::Ordering;

use smallvec::SmallVec;
use tracing::trace;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, NodeView, Side};
use crate::{Comparator, FindNode, Violation, WalkAction, WalkNode};

/// A position on the walk: a node plus the in-order boundaries inherited from its ancestors.
///
/// `left_parent` is the stack index of the nearest ancestor whose right subtree holds this node
/// (its in-order predecessor when the node has no left child); `right_parent` is the mirror.
#[derive(Clone, Copy, Debug)]
struct Frame {
    handle: Handle,
    left_parent: Option<usize>,
    right_parent: Option<usize>,
}

#[derive(Clone, Copy, Debug)]
enum Step {
    Visit,
    Move(WalkAction),
    /// Follow left children, then visit.
    DescendMin,
    /// Follow right children, then visit.
    DescendMax,
}

struct WalkView<'a, K, V, C> {
    node: NodeView<'a, K, V, C>,
    frame: Frame,
    level: usize,
}

impl<K, V, C: Comparator<K>> FindNode<K, V> for WalkView<'_, K, V, C> {
    fn key(&self) -> &K {
        self.node.key()
    }

    fn value(&self) -> &V {
        self.node.value()
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.node.compare(a, b)
    }

    fn has_left(&self) -> bool {
        self.node.has_left()
    }

    fn has_right(&self) -> bool {
        self.node.has_right()
    }
}

impl<K, V, C: Comparator<K>> WalkNode<K, V> for WalkView<'_, K, V, C> {
    fn level(&self) -> usize {
        self.level
    }

    fn has_parent(&self) -> bool {
        self.frame.left_parent.is_some() || self.frame.right_parent.is_some()
    }

    fn has_prev(&self) -> bool {
        self.node.has_left() || self.frame.left_parent.is_some()
    }

    fn has_next(&self) -> bool {
        self.node.has_right() || self.frame.right_parent.is_some()
    }
}

/// Walk state: the current frame and every ancestor above it, root first.
struct Walker {
    current: Frame,
    ancestors: SmallVec<[Frame; 32]>,
}

impl Walker {
    fn new(root: Handle) -> Self {
        Self {
            current: Frame {
                handle: root,
                left_parent: None,
                right_parent: None,
            },
            ancestors: SmallVec::new(),
        }
    }

    fn level(&self) -> usize {
        self.ancestors.len() + 1
    }

    fn descend(&mut self, child: Handle, side: Side) {
        let index = self.ancestors.len();
        let parent = self.current;
        self.ancestors.push(parent);
        self.current = match side {
            Side::Left => Frame {
                handle: child,
                left_parent: parent.left_parent,
                right_parent: Some(index),
            },
            Side::Right => Frame {
                handle: child,
                left_parent: Some(index),
                right_parent: parent.right_parent,
            },
        };
    }

    fn ascend(&mut self) -> Result<(), Violation> {
        self.current = self.ancestors.pop().ok_or(Violation::WalkParent)?;
        trace!(level = self.level(), "walked to parent");
        Ok(())
    }

    fn unwind(&mut self, index: usize) {
        trace!(from = self.level(), to = index + 1, "unwinding to in-order ancestor");
        self.current = self.ancestors[index];
        self.ancestors.truncate(index);
    }
}

/// Drives a walk from `root` until the callback returns [`WalkAction::Return`].
pub(crate) fn walk<K, V, C, F>(nodes: &Arena<Node<K, V>>, root: Option<Handle>, cmp: &C, mut f: F) -> Result<(), Violation>
where
    C: Comparator<K>,
    F: FnMut(&dyn WalkNode<K, V>) -> WalkAction,
{
    let Some(root) = root else {
        return Ok(());
    };
    let mut walker = Walker::new(root);
    let mut step = Step::Visit;

    loop {
        let node = nodes.get(walker.current.handle);
        step = match step {
            Step::Visit => Step::Move(f(&WalkView {
                node: NodeView { node, cmp },
                frame: walker.current,
                level: walker.level(),
            })),
            Step::Move(WalkAction::Return) => return Ok(()),
            Step::Move(WalkAction::Left) => {
                walker.descend(node.left().ok_or(Violation::WalkLeft)?, Side::Left);
                Step::Visit
            }
            Step::Move(WalkAction::Right) => {
                walker.descend(node.right().ok_or(Violation::WalkRight)?, Side::Right);
                Step::Visit
            }
            Step::Move(WalkAction::Parent) => {
                walker.ascend()?;
                Step::Visit
            }
            Step::Move(WalkAction::Prev) => {
                if let Some(left) = node.left() {
                    walker.descend(left, Side::Left);
                    Step::DescendMax
                } else {
                    walker.unwind(walker.current.left_parent.ok_or(Violation::WalkPrev)?);
                    Step::Visit
                }
            }
            Step::Move(WalkAction::Next) => {
                if let Some(right) = node.right() {
                    walker.descend(right, Side::Right);
                    Step::DescendMin
                } else {
                    walker.unwind(walker.current.right_parent.ok_or(Violation::WalkNext)?);
                    Step::Visit
                }
            }
            Step::DescendMin => match node.left() {
                Some(left) => {
                    walker.descend(left, Side::Left);
                    Step::DescendMin
                }
                None => Step::Visit,
            },
            Step::DescendMax => match node.right() {
                Some(right) => {
                    walker.descend(right, Side::Right);
                    Step::DescendMax
                }
                None => Step::Visit,
            },
        };
    }
}
