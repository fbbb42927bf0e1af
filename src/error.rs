//! Error types for merkle_tree

use thiserror::Error;

/// Result type alias for merkle_tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or verifying a tree
///
/// A verification that completes but does not match is reported as
/// `Ok(false)`, not as one of these.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot build a tree with no content")]
    EmptyInput,

    #[error("Failed to hash content at index {index}: {source}")]
    Hash {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to compare content at index {index}: {source}")]
    Compare {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid hash: {0}")]
    InvalidHash(String),
}

impl Error {
    pub(crate) fn hash(index: usize, source: anyhow::Error) -> Self {
        Error::Hash { index, source }
    }

    pub(crate) fn compare(index: usize, source: anyhow::Error) -> Self {
        Error::Compare { index, source }
    }
}
