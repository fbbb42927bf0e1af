//! Core data model types for merkle_tree

mod content;
mod hash;
mod node;

pub use content::{Bytes, Content};
pub use hash::{Blake3, Hash, Hasher, Sha256};
pub use node::{Node, NodeId, NodeKind};
