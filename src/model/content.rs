//! Content trait - the values a tree commits to

use super::{Hash, Hasher};
use std::fmt;

/// Data that is stored in and verified by a tree
///
/// The tree never interprets content; it only hashes and compares it.
/// Both operations may fail, and failures are propagated to the caller
/// tagged with the position of the offending item.
pub trait Content {
    /// Compute this item's leaf digest with the tree's hash function
    fn digest<H: Hasher>(&self) -> anyhow::Result<Hash>;

    /// Check whether this item is the same content as `other`
    fn equals(&self, other: &Self) -> anyhow::Result<bool>;
}

/// Owned byte content, the common case for CLI input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Bytes(data.into())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Bytes {
    fn from(s: &str) -> Self {
        Bytes(s.as_bytes().to_vec())
    }
}

impl From<String> for Bytes {
    fn from(s: String) -> Self {
        Bytes(s.into_bytes())
    }
}

impl From<&[u8]> for Bytes {
    fn from(b: &[u8]) -> Self {
        Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(b: Vec<u8>) -> Self {
        Bytes(b)
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl Content for Bytes {
    fn digest<H: Hasher>(&self) -> anyhow::Result<Hash> {
        Ok(H::digest(&self.0))
    }

    fn equals(&self, other: &Self) -> anyhow::Result<bool> {
        Ok(self.0 == other.0)
    }
}

impl Content for String {
    fn digest<H: Hasher>(&self) -> anyhow::Result<Hash> {
        Ok(H::digest(self.as_bytes()))
    }

    fn equals(&self, other: &Self) -> anyhow::Result<bool> {
        Ok(self == other)
    }
}

impl Content for Vec<u8> {
    fn digest<H: Hasher>(&self) -> anyhow::Result<Hash> {
        Ok(H::digest(self))
    }

    fn equals(&self, other: &Self) -> anyhow::Result<bool> {
        Ok(self == other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Blake3, Sha256};

    #[test]
    fn test_bytes_digest_matches_hasher() {
        let c = Bytes::from("abc");
        assert_eq!(c.digest::<Sha256>().unwrap(), Sha256::digest(b"abc"));
        assert_eq!(c.digest::<Blake3>().unwrap(), Blake3::digest(b"abc"));
    }

    #[test]
    fn test_string_and_bytes_agree() {
        let s = String::from("hello");
        let b = Bytes::from("hello");
        assert_eq!(s.digest::<Blake3>().unwrap(), b.digest::<Blake3>().unwrap());
    }

    #[test]
    fn test_bytes_equals() {
        let a = Bytes::from("a");
        assert!(a.equals(&Bytes::from("a")).unwrap());
        assert!(!a.equals(&Bytes::from("b")).unwrap());
    }
}
