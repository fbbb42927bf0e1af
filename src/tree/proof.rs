//! Compact membership proofs
//!
//! A proof carries the leaf digest and one sibling digest per level, so a
//! party that only knows the root digest can check inclusion of an item.

use super::MerkleTree;
use crate::model::{Content, Hash, Hasher, NodeKind};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which side of the running digest the sibling sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// One level of a membership proof
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub sibling: Hash,
    pub side: Side,
}

/// Inclusion proof for one leaf
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleProof {
    /// Position of the leaf in leaf order
    pub leaf_index: usize,
    /// The leaf digest
    pub leaf: Hash,
    /// Sibling digests from the leaf level up to just below the root
    pub path: Vec<ProofStep>,
}

impl MerkleProof {
    /// Fold the path into the root it implies
    pub fn root<H: Hasher>(&self) -> Hash {
        self.path.iter().fold(self.leaf, |acc, step| match step.side {
            Side::Left => H::digest_pair(&step.sibling, &acc),
            Side::Right => H::digest_pair(&acc, &step.sibling),
        })
    }

    /// Check that this proof leads to `root`
    pub fn verify<H: Hasher>(&self, root: &Hash) -> bool {
        self.root::<H>() == *root
    }

    /// Check that `content` is the proven leaf and the proof leads to `root`
    pub fn verify_content<C: Content, H: Hasher>(&self, content: &C, root: &Hash) -> Result<bool> {
        let digest = content
            .digest::<H>()
            .map_err(|source| Error::hash(self.leaf_index, source))?;
        Ok(digest == self.leaf && self.verify::<H>(root))
    }

    /// Number of levels covered
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

impl<C: Content, H: Hasher> MerkleTree<C, H> {
    /// Build a membership proof for the first leaf equal to `candidate`
    ///
    /// Returns `Ok(None)` when no leaf matches. The proof is taken from the
    /// cached digests; use [`MerkleTree::verify_content`] to check the tree
    /// itself first.
    pub fn proof(&self, candidate: &C) -> Result<Option<MerkleProof>> {
        let Some((leaf_index, leaf)) = self.find_leaf(candidate)? else {
            return Ok(None);
        };

        let mut path = Vec::with_capacity(self.height());
        let mut child = leaf;
        let mut current = self.nodes[leaf.0].parent;
        while let Some(id) = current {
            let node = &self.nodes[id.0];
            if let NodeKind::Internal { left, right } = node.kind {
                // A self-paired node is its own right sibling
                let step = if left == child {
                    ProofStep {
                        sibling: self.nodes[right.0].digest,
                        side: Side::Right,
                    }
                } else {
                    ProofStep {
                        sibling: self.nodes[left.0].digest,
                        side: Side::Left,
                    }
                };
                path.push(step);
            }
            child = id;
            current = node.parent;
        }

        Ok(Some(MerkleProof {
            leaf_index,
            leaf: self.nodes[leaf.0].digest,
            path,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blake3, Bytes, Sha256};

    fn items(n: usize) -> Vec<Bytes> {
        (0..n).map(|i| Bytes::from(format!("item-{i}"))).collect()
    }

    #[test]
    fn test_proofs_fold_to_root() {
        for n in [1, 2, 3, 5, 6, 7, 12, 33] {
            let tree = MerkleTree::<_, Sha256>::build(items(n)).unwrap();
            for item in items(n) {
                let proof = tree.proof(&item).unwrap().unwrap();
                assert_eq!(proof.depth(), tree.height());
                assert!(proof.verify::<Sha256>(&tree.root_digest()), "n = {n}");
                assert!(proof
                    .verify_content::<_, Sha256>(&item, &tree.root_digest())
                    .unwrap());
            }
        }
    }

    #[test]
    fn test_abc_proof_for_b() {
        let tree = MerkleTree::<_, Sha256>::build(vec![
            Bytes::from("a"),
            Bytes::from("b"),
            Bytes::from("c"),
        ])
        .unwrap();
        let proof = tree.proof(&Bytes::from("b")).unwrap().unwrap();

        let cc = Sha256::digest_pair(&Sha256::digest(b"c"), &Sha256::digest(b"c"));
        assert_eq!(proof.leaf_index, 1);
        assert_eq!(
            proof.path,
            vec![
                ProofStep {
                    sibling: Sha256::digest(b"a"),
                    side: Side::Left
                },
                ProofStep {
                    sibling: cc,
                    side: Side::Right
                },
            ]
        );
    }

    #[test]
    fn test_proof_absent_item() {
        let tree = MerkleTree::new(items(4)).unwrap();
        assert!(tree.proof(&Bytes::from("missing")).unwrap().is_none());
    }

    #[test]
    fn test_proof_rejects_wrong_root_and_content() {
        let tree = MerkleTree::new(items(5)).unwrap();
        let other = MerkleTree::new(items(6)).unwrap();
        let proof = tree.proof(&Bytes::from("item-3")).unwrap().unwrap();

        assert!(!proof.verify::<Blake3>(&other.root_digest()));
        assert!(!proof.verify::<Sha256>(&tree.root_digest()));
        assert!(!proof
            .verify_content::<_, Blake3>(&Bytes::from("item-4"), &tree.root_digest())
            .unwrap());
    }

    #[test]
    fn test_proof_json() {
        let tree = MerkleTree::new(items(3)).unwrap();
        let proof = tree.proof(&Bytes::from("item-2")).unwrap().unwrap();

        let json = serde_json::to_string(&proof).unwrap();
        assert!(json.contains("\"side\":\"right\""));
        let back: MerkleProof = serde_json::from_str(&json).unwrap();
        assert_eq!(proof, back);
    }
}
