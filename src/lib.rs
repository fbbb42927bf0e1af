//! # merkle_tree
//!
//! A binary Merkle tree over an ordered list of content items.
//!
//! The tree commits to every item through a single root digest and can
//! check its own integrity, either as a whole or along the path of one item.
//!
//! ## Core Concepts
//!
//! - **Content**: Caller-defined values that can be hashed and compared
//! - **Leaves**: One per item in input order, padded to an even count by
//!   duplicating the last leaf
//! - **Internal nodes**: `H(left || right)`; a lone node on an internal
//!   level is paired with itself
//! - **Proofs**: Sibling digests along one leaf's path, checkable against
//!   the root alone
//!
//! ## Example
//!
//! ```
//! use merkle_tree::{Bytes, MerkleTree};
//!
//! let tree = MerkleTree::new(["a", "b", "c"].map(Bytes::from))?;
//! assert!(tree.verify_tree()?);
//! assert!(tree.verify_content(&Bytes::from("b"))?);
//! assert!(!tree.verify_content(&Bytes::from("z"))?);
//! # Ok::<(), merkle_tree::Error>(())
//! ```

pub mod model;
pub mod tree;

mod error;

pub use error::{Error, Result};
pub use model::{Blake3, Bytes, Content, Hash, Hasher, Node, NodeId, NodeKind, Sha256};
pub use tree::{MerkleProof, MerkleTree, ProofStep, Side};
