pub mod fold_state;
pub mod node;

pub use fold_state::{FoldState, SharedFoldState};
pub use node::{Node, NodeId};
