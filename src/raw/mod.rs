mod arena;
mod handle;
mod node;
mod raw_tree;
mod walker;

pub(crate) use node::Side;
pub(crate) use raw_tree::RawTree;
