//! Fixed-size digest type and the hash functions that produce it

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::Digest as _;
use std::fmt;

/// A 32-byte digest of a leaf or internal node
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash([u8; 32]);

impl Hash {
    /// The all-zero digest
    pub const ZERO: Hash = Hash([0u8; 32]);

    /// Digest length in bytes
    pub const LEN: usize = 32;

    /// Create a hash from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != Self::LEN {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Hash(arr))
    }

    /// Get a short prefix for display (first 7 chars, like git)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.short())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Hash::ZERO
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }
}

impl std::str::FromStr for Hash {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Hash::from_hex(s).map_err(|e| crate::Error::InvalidHash(format!("{s}: {e}")))
    }
}

// Digests travel as hex strings in JSON output and proofs.
impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Hash::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// A 256-bit hash function used uniformly for leaves and internal nodes
///
/// The hasher is a type parameter of the tree, so every digest in a tree
/// comes from the same function.
pub trait Hasher {
    /// Name used in logs and CLI output
    const NAME: &'static str;

    /// Hash arbitrary data
    fn digest(data: &[u8]) -> Hash;

    /// Hash the concatenation `left || right`
    fn digest_pair(left: &Hash, right: &Hash) -> Hash;
}

/// BLAKE3 (the default)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Blake3;

impl Hasher for Blake3 {
    const NAME: &'static str = "blake3";

    fn digest(data: &[u8]) -> Hash {
        Hash(*blake3::hash(data).as_bytes())
    }

    fn digest_pair(left: &Hash, right: &Hash) -> Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Hash(*hasher.finalize().as_bytes())
    }
}

/// SHA-256, for roots compatible with other SHA-256 implementations of the scheme
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sha256;

impl Hasher for Sha256 {
    const NAME: &'static str = "sha256";

    fn digest(data: &[u8]) -> Hash {
        Hash(sha2::Sha256::digest(data).into())
    }

    fn digest_pair(left: &Hash, right: &Hash) -> Hash {
        let mut hasher = sha2::Sha256::new();
        hasher.update(left.as_bytes());
        hasher.update(right.as_bytes());
        Hash(hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_digest() {
        let h1 = Blake3::digest(b"hello");
        let h2 = Blake3::digest(b"hello");
        let h3 = Blake3::digest(b"world");

        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_digest_pair_is_concatenation() {
        let a = Sha256::digest(b"a");
        let b = Sha256::digest(b"b");
        let mut joined = a.as_bytes().to_vec();
        joined.extend_from_slice(b.as_bytes());

        assert_eq!(Sha256::digest_pair(&a, &b), Sha256::digest(&joined));
        assert_ne!(Sha256::digest_pair(&a, &b), Sha256::digest_pair(&b, &a));

        let a = Blake3::digest(b"a");
        let b = Blake3::digest(b"b");
        let mut joined = a.as_bytes().to_vec();
        joined.extend_from_slice(b.as_bytes());
        assert_eq!(Blake3::digest_pair(&a, &b), Blake3::digest(&joined));
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            Sha256::digest(b"abc").to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_from_hex_rejects_wrong_length() {
        assert!(Hash::from_hex("abcd").is_err());
        assert!("zz".parse::<Hash>().is_err());
    }

    #[test]
    fn test_hash_serde_as_hex() {
        let h = Blake3::digest(b"test data");
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, format!("\"{}\"", h.to_hex()));
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(h, back);
    }

    #[test]
    fn test_hash_short() {
        let h = Blake3::digest(b"test");
        assert_eq!(h.short().len(), 7);
    }
}
