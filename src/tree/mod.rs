//! Binary Merkle tree over an ordered list of content items
//!
//! The tree is a flat arena of nodes:
//! - Leaves come first, in input order, followed by one padding duplicate
//!   when the item count is odd
//! - Each internal level follows the level below it, so every child sits
//!   at a lower index than its parent
//! - Parents are referenced by [`NodeId`], giving O(log n) upward walks
//!
//! Digests are cached at build time. Only [`MerkleTree::verify_tree`] and
//! [`MerkleTree::rebuild`] recompute them from the content.

mod builder;
mod proof;
mod verify;

pub use proof::{MerkleProof, ProofStep, Side};

use crate::model::{Blake3, Content, Hash, Hasher, Node, NodeId};
use std::fmt;
use std::marker::PhantomData;

/// A Merkle tree committing to an ordered list of content items
///
/// The hash function `H` is fixed for the whole tree; leaf digests come
/// from [`Content::digest`] and internal digests from `H(left || right)`.
pub struct MerkleTree<C, H = Blake3> {
    /// Content in original order (no padding)
    contents: Vec<C>,
    /// Node arena
    nodes: Vec<Node>,
    /// Leaf ids in order, including the padding duplicate if any
    leaves: Vec<NodeId>,
    root: NodeId,
    /// Cached root digest, the externally trusted artifact
    root_digest: Hash,
    _hasher: PhantomData<H>,
}

impl<C: Content> MerkleTree<C, Blake3> {
    /// Build a BLAKE3 tree from the given content
    ///
    /// Roots from other SHA-256 implementations of this scheme only match a
    /// tree built with `MerkleTree::<_, Sha256>::build`.
    pub fn new(contents: impl IntoIterator<Item = C>) -> crate::Result<Self> {
        Self::build(contents)
    }
}

impl<C: Content, H: Hasher> MerkleTree<C, H> {
    /// The cached root digest
    pub fn root_digest(&self) -> Hash {
        self.root_digest
    }

    /// The root node
    pub fn root(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    /// Leaf ids in order, including a padding duplicate
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Number of leaves (always even)
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Number of content items the tree was built from
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    /// Always false: a tree cannot be built from empty input
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Total number of nodes (leaves and internal)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// The leaf node at `position` in leaf order
    pub fn leaf(&self, position: usize) -> Option<&Node> {
        self.leaves.get(position).map(|id| &self.nodes[id.0])
    }

    pub fn contents(&self) -> &[C] {
        &self.contents
    }

    /// Mutable access to a content item
    ///
    /// Cached digests are not refreshed; call [`MerkleTree::rebuild`]
    /// afterwards to commit to the new value.
    pub fn content_mut(&mut self, index: usize) -> Option<&mut C> {
        self.contents.get_mut(index)
    }

    /// Number of levels above the leaves
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.nodes[self.leaves[0].0].parent;
        while let Some(id) = current {
            height += 1;
            current = self.nodes[id.0].parent;
        }
        height
    }
}

impl<C, H> fmt::Debug for MerkleTree<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerkleTree")
            .field("root_digest", &self.root_digest)
            .field("contents", &self.contents.len())
            .field("leaves", &self.leaves.len())
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

/// One line per leaf: position, digest, and a marker for the padding leaf
impl<C, H> fmt::Display for MerkleTree<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, id) in self.leaves.iter().enumerate() {
            let node = &self.nodes[id.0];
            write!(f, "{position}: {}", node.digest)?;
            if node.is_duplicate() {
                write!(f, " (duplicate)")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
