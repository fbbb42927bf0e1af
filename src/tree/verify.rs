//! Full-tree and single-item verification

use super::MerkleTree;
use crate::model::{Content, Hash, Hasher, NodeId, NodeKind};
use crate::{Error, Result};
use tracing::debug;

impl<C: Content, H: Hasher> MerkleTree<C, H> {
    /// Recompute every digest from the content and compare with the cache
    ///
    /// Returns `Ok(false)` if the recomputed root differs from the cached
    /// root digest, or if any node's cached digest differs from its
    /// recomputed value. Does not modify the tree.
    pub fn verify_tree(&self) -> Result<bool> {
        let mut recomputed: Vec<Hash> = Vec::with_capacity(self.nodes.len());
        let mut consistent = true;

        // Children always precede their parent in the arena
        for (index, node) in self.nodes.iter().enumerate() {
            let digest = match node.kind {
                NodeKind::Leaf { content, .. } => self.content_digest(content)?,
                NodeKind::Internal { left, right } => {
                    H::digest_pair(&recomputed[left.0], &recomputed[right.0])
                }
            };
            if consistent && digest != node.digest {
                debug!(node = index, "cached digest does not match content");
                consistent = false;
            }
            recomputed.push(digest);
        }

        let root = recomputed[self.root.0];
        if root != self.root_digest {
            debug!(
                expected = %self.root_digest.short(),
                actual = %root.short(),
                "root digest mismatch"
            );
            return Ok(false);
        }
        Ok(consistent)
    }

    /// Check that `candidate` is in the tree and its path to the root is intact
    ///
    /// Finds the first leaf whose content equals `candidate` and walks up its
    /// parents, rehashing each pair of children and comparing against the
    /// cached digest. The leaf pair is rehashed from content; above that the
    /// cached child digests are used, so only one sibling digest per level is
    /// touched. Returns `Ok(false)` for absent content or any mismatch.
    pub fn verify_content(&self, candidate: &C) -> Result<bool> {
        let Some((_, leaf)) = self.find_leaf(candidate)? else {
            return Ok(false);
        };

        let mut current = self.nodes[leaf.0].parent;
        let mut first = true;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            let Some((left, right)) = node.children() else {
                return Ok(false);
            };

            let (left_digest, right_digest) = if first {
                let left_digest = self.leaf_digest(left)?;
                let right_digest = self.leaf_digest(right)?;
                if left_digest != self.nodes[left.0].digest
                    || right_digest != self.nodes[right.0].digest
                {
                    debug!(node = id.0, "leaf digest does not match content");
                    return Ok(false);
                }
                (left_digest, right_digest)
            } else {
                (self.nodes[left.0].digest, self.nodes[right.0].digest)
            };

            if H::digest_pair(&left_digest, &right_digest) != node.digest {
                debug!(node = id.0, "path digest mismatch");
                return Ok(false);
            }

            first = false;
            current = node.parent;
        }

        Ok(self.nodes[self.root.0].digest == self.root_digest)
    }

    /// First leaf whose content equals `candidate`, as (position, id)
    pub(super) fn find_leaf(&self, candidate: &C) -> Result<Option<(usize, NodeId)>> {
        for (position, &id) in self.leaves.iter().enumerate() {
            let Some(content) = self.nodes[id.0].content_index() else {
                continue;
            };
            let found = self.contents[content]
                .equals(candidate)
                .map_err(|source| Error::compare(position, source))?;
            if found {
                return Ok(Some((position, id)));
            }
        }
        Ok(None)
    }

    fn content_digest(&self, index: usize) -> Result<Hash> {
        self.contents[index]
            .digest::<H>()
            .map_err(|source| Error::hash(index, source))
    }

    /// Digest of a leaf recomputed from its content
    fn leaf_digest(&self, id: NodeId) -> Result<Hash> {
        match self.nodes[id.0].kind {
            NodeKind::Leaf { content, .. } => self.content_digest(content),
            NodeKind::Internal { .. } => Ok(self.nodes[id.0].digest),
        }
    }
}
