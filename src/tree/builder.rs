//! Tree construction: leaf hashing, padding and pairwise reduction

use super::MerkleTree;
use crate::model::{Content, Hash, Hasher, Node, NodeId};
use crate::{Error, Result};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// A freshly built node graph, swapped into a tree as a whole
struct Graph {
    nodes: Vec<Node>,
    leaves: Vec<NodeId>,
    root: NodeId,
}

impl<C: Content, H: Hasher> MerkleTree<C, H> {
    /// Build a tree from an ordered list of content items
    ///
    /// Input order is the canonical leaf order. Fails with
    /// [`Error::EmptyInput`] for an empty list and [`Error::Hash`] if any
    /// item cannot be hashed; no partially built tree is ever returned.
    pub fn build(contents: impl IntoIterator<Item = C>) -> Result<Self> {
        let contents: Vec<C> = contents.into_iter().collect();
        let graph = build_graph::<C, H>(&contents)?;
        let root_digest = graph.nodes[graph.root.0].digest;

        Ok(MerkleTree {
            contents,
            nodes: graph.nodes,
            leaves: graph.leaves,
            root: graph.root,
            root_digest,
            _hasher: PhantomData,
        })
    }

    /// Rehash all content and replace the node graph and root digest
    ///
    /// Use after mutating content through [`MerkleTree::content_mut`]. On
    /// error the tree is left as it was.
    pub fn rebuild(&mut self) -> Result<()> {
        let graph = build_graph::<C, H>(&self.contents)?;
        let previous = self.root_digest;

        self.root_digest = graph.nodes[graph.root.0].digest;
        self.nodes = graph.nodes;
        self.leaves = graph.leaves;
        self.root = graph.root;

        debug!(
            previous = %previous.short(),
            root = %self.root_digest.short(),
            "rebuilt tree"
        );
        Ok(())
    }
}

fn build_graph<C: Content, H: Hasher>(contents: &[C]) -> Result<Graph> {
    if contents.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut nodes = Vec::with_capacity(2 * contents.len() + 2);
    for (index, content) in contents.iter().enumerate() {
        let digest = content
            .digest::<H>()
            .map_err(|source| Error::hash(index, source))?;
        nodes.push(Node::leaf(digest, index));
    }

    // Pad odd leaf counts with a copy of the last leaf
    if nodes.len() % 2 == 1 {
        let duplicate = Node::duplicate_of(&nodes[nodes.len() - 1]);
        nodes.push(duplicate);
    }

    let leaves: Vec<NodeId> = (0..nodes.len()).map(NodeId).collect();
    let root = reduce_levels::<H>(&mut nodes, leaves.clone());

    debug!(
        hasher = H::NAME,
        items = contents.len(),
        leaves = leaves.len(),
        nodes = nodes.len(),
        root = %nodes[root.0].digest.short(),
        "built tree"
    );

    Ok(Graph {
        nodes,
        leaves,
        root,
    })
}

/// Pair adjacent nodes level by level until one remains, returning the root
///
/// A lone node at the end of an internal level is paired with itself rather
/// than padded with a new duplicate.
fn reduce_levels<H: Hasher>(nodes: &mut Vec<Node>, mut level: Vec<NodeId>) -> NodeId {
    let mut depth = 0;
    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        for pair in level.chunks(2) {
            let left = pair[0];
            let right = pair.get(1).copied().unwrap_or(left);
            let digest: Hash = H::digest_pair(&nodes[left.0].digest, &nodes[right.0].digest);

            let id = NodeId(nodes.len());
            nodes.push(Node::internal(digest, left, right));
            nodes[left.0].parent = Some(id);
            nodes[right.0].parent = Some(id);
            next.push(id);
        }
        depth += 1;
        trace!(depth, width = next.len(), "reduced level");
        level = next;
    }
    level[0]
}
