//! # Content Digest — Content-Addressed Identifiers
//!
//! Defines `ContentDigest`, the SHA-256 identity of a stored blob. Every
//! ciphertext handle in the store is named by the digest of its raw
//! ciphertext bytes, which is what makes handles content-addressed: the
//! same ciphertext always yields the same handle identity, and a stored
//! handle can never be silently swapped for different bytes.
//!
//! Two digest paths exist, and they are deliberately distinct:
//!
//! - [`sha256_digest()`] — over [`CanonicalBytes`], for structured data
//!   (contexts, claimed cleartext maps). The signature enforces that the
//!   input went through canonicalization.
//! - [`sha256_raw()`] — over raw bytes, **only** for opaque external blobs
//!   (ciphertexts, proofs) that are never re-serialized and therefore have
//!   no canonical form to split.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;

/// A SHA-256 content digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest(pub [u8; 32]);

impl ContentDigest {
    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Access the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sha256:{}", self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// The signature accepts only `&CanonicalBytes`, not raw `&[u8]`, so no
/// code path can digest structured data that skipped canonicalization.
pub fn sha256_digest(data: &CanonicalBytes) -> ContentDigest {
    sha256_raw(data.as_bytes())
}

/// Compute a SHA-256 digest over raw bytes.
///
/// Reserved for opaque external blobs (ciphertexts, proof bytes) that are
/// stored and compared as-is. Structured data goes through
/// [`sha256_digest()`].
pub fn sha256_raw(data: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}
