//! Tree node types

use super::Hash;
use std::fmt;

/// Index of a node in the tree's node arena
///
/// Parent links are ids into the arena, never owning references.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node represents
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A leaf for the content at `content` in the tree's content list.
    /// A duplicate (padding) leaf carries the same index as the leaf it copies.
    Leaf { content: usize, duplicate: bool },
    /// An internal node; `left == right` when a lone node was paired with itself
    Internal { left: NodeId, right: NodeId },
}

/// A node in the tree arena
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) digest: Hash,
    pub(crate) parent: Option<NodeId>,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub(crate) fn leaf(digest: Hash, content: usize) -> Self {
        Node {
            digest,
            parent: None,
            kind: NodeKind::Leaf {
                content,
                duplicate: false,
            },
        }
    }

    /// Padding leaf copying `source`'s digest and content
    pub(crate) fn duplicate_of(source: &Node) -> Self {
        let content = match source.kind {
            NodeKind::Leaf { content, .. } => content,
            NodeKind::Internal { .. } => unreachable!("only leaves are duplicated"),
        };
        Node {
            digest: source.digest,
            parent: None,
            kind: NodeKind::Leaf {
                content,
                duplicate: true,
            },
        }
    }

    pub(crate) fn internal(digest: Hash, left: NodeId, right: NodeId) -> Self {
        Node {
            digest,
            parent: None,
            kind: NodeKind::Internal { left, right },
        }
    }

    /// The cached digest
    pub fn digest(&self) -> Hash {
        self.digest
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// True only for the synthetic padding leaf
    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { duplicate: true, .. })
    }

    /// None for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Both children of an internal node
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Internal { left, right } => Some((left, right)),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Index into the tree's content list (leaves only)
    pub fn content_index(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Leaf { content, .. } => Some(content),
            NodeKind::Internal { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blake3, Hasher};

    #[test]
    fn test_duplicate_aliases_source() {
        let mut source = Node::leaf(Blake3::digest(b"c"), 2);
        source.parent = Some(NodeId(7));
        let dup = Node::duplicate_of(&source);

        assert!(dup.is_leaf());
        assert!(dup.is_duplicate());
        assert!(!source.is_duplicate());
        assert_eq!(dup.digest(), source.digest());
        assert_eq!(dup.content_index(), Some(2));
        assert_eq!(dup.parent(), None);
    }

    #[test]
    fn test_internal_node_has_children_not_content() {
        let n = Node::internal(Hash::ZERO, NodeId(0), NodeId(1));
        assert!(!n.is_leaf());
        assert!(!n.is_duplicate());
        assert_eq!(n.children(), Some((NodeId(0), NodeId(1))));
        assert_eq!(n.content_index(), None);
    }
}
