//! # Ciphertext and Proof Wire Types
//!
//! Opaque byte containers crossing the external boundary. The store never
//! inspects ciphertext or proof contents — the only structure imposed here
//! is the minimal framing needed to reject garbage before it reaches the
//! verifier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use sealrec_core::{sha256_raw, ContentDigest, FieldName, PrincipalId, RecordId};

/// Version byte every raw ciphertext must carry.
pub const CIPHERTEXT_VERSION: u8 = 0x01;

/// Minimum ciphertext body length (bytes after the version byte).
const MIN_BODY_LEN: usize = 32;

/// A raw ciphertext representation could not be parsed.
#[derive(Error, Debug)]
#[error("malformed ciphertext: {reason}")]
pub struct MalformedCiphertext {
    /// Why the representation was rejected.
    pub reason: String,
}

/// An externally produced ciphertext in wire form.
///
/// Framing: one version byte (`0x01`) followed by an opaque body of at
/// least 32 bytes. The body is never interpreted; it belongs to the
/// external encryption scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCiphertext(Vec<u8>);

impl RawCiphertext {
    /// Parse a raw ciphertext from wire bytes.
    ///
    /// # Errors
    ///
    /// Rejects empty input, unknown version bytes, and bodies shorter
    /// than the scheme minimum.
    pub fn parse(bytes: &[u8]) -> Result<Self, MalformedCiphertext> {
        let (version, body) = bytes.split_first().ok_or_else(|| MalformedCiphertext {
            reason: "empty input".to_string(),
        })?;
        if *version != CIPHERTEXT_VERSION {
            return Err(MalformedCiphertext {
                reason: format!("unknown version byte 0x{version:02x}"),
            });
        }
        if body.len() < MIN_BODY_LEN {
            return Err(MalformedCiphertext {
                reason: format!("body too short: {} bytes, minimum {MIN_BODY_LEN}", body.len()),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// The full wire bytes, version byte included.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The content digest naming this ciphertext.
    ///
    /// Raw-bytes digest path: the ciphertext is an opaque external blob
    /// with no canonical form of its own.
    pub fn digest(&self) -> ContentDigest {
        sha256_raw(&self.0)
    }
}

/// Opaque proof that a ciphertext was correctly formed for a specific
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionProof(pub Vec<u8>);

/// Opaque proof binding claimed cleartext values to stored ciphertext
/// handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionProof(pub Vec<u8>);

/// The context an ingestion proof attests to: which record, field, and
/// principal the ciphertext was produced for.
///
/// Serialized canonically when a verifier folds it into a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionContext {
    /// The record the ciphertext is being attached to.
    pub record_id: RecordId,
    /// The encrypted field the ciphertext fills.
    pub field: FieldName,
    /// The principal submitting the ciphertext.
    pub principal: PrincipalId,
}
