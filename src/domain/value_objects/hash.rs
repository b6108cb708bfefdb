//! Content hashes and build-input fingerprints
//!
//! Hashes are rendered `sha256:<hex>`. Fingerprints name shared targets and
//! are written to stamp files for up-to-date checks.

use std::fmt;

use sha2::{Digest, Sha256};

const SHA256: &str = "sha256:";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Hash of `content`
    pub fn of(content: &[u8]) -> Self {
        Self::from_digest(Sha256::digest(content))
    }

    fn from_digest(digest: impl fmt::LowerHex) -> Self {
        Self(format!("{}{:x}", SHA256, digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn hex(&self) -> &str {
        &self.0[SHA256.len()..]
    }

    /// First 12 hex characters, used in target ids
    pub fn short(&self) -> &str {
        let hex = self.hex();
        &hex[..hex.len().min(12)]
    }

    /// True when a stamp file's content records this hash. Surrounding
    /// whitespace and a missing `sha256:` prefix are tolerated.
    pub fn matches_stamp(&self, stamp: &str) -> bool {
        let stamp = stamp.trim();
        stamp == self.0 || stamp == self.hex()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Incremental hasher over an ordered list of inputs.
///
/// Every field is length-prefixed so `("ab", "c")` and `("a", "bc")`
/// never collide.
#[derive(Default, Clone)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, value: impl AsRef<[u8]>) -> Self {
        self.push(value);
        self
    }

    pub fn push(&mut self, value: impl AsRef<[u8]>) {
        let bytes = value.as_ref();
        self.hasher.update((bytes.len() as u64).to_le_bytes());
        self.hasher.update(bytes);
    }

    pub fn finish(self) -> ContentHash {
        ContentHash::from_digest(self.hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_prefixed_sha256() {
        let hash = ContentHash::of(b"hello");
        assert_eq!(
            hash.as_str(),
            "sha256:2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(hash.short(), "2cf24dba5fb0");
    }

    #[test]
    fn stamps_match_with_or_without_prefix() {
        let hash = ContentHash::of(b"hello");
        assert!(hash.matches_stamp(&format!("{}\n", hash)));
        assert!(hash.matches_stamp(hash.hex()));
        assert!(!hash.matches_stamp("sha256:2cf24dba5fb0"));
        assert!(!hash.matches_stamp(""));
    }

    #[test]
    fn fingerprint_fields_are_length_prefixed() {
        let a = Fingerprint::new().field("ab").field("c").finish();
        let b = Fingerprint::new().field("a").field("bc").finish();
        assert_ne!(a, b);
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let a = Fingerprint::new().field("x").field([1u8, 2, 3]).finish();
        let b = Fingerprint::new().field("x").field([1u8, 2, 3]).finish();
        assert_eq!(a, b);
        assert_ne!(a, Fingerprint::new().field("x").finish());
    }
}
