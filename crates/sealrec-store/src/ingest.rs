//! # Ciphertext Handle Registry
//!
//! Converts externally supplied ciphertext representations into internal
//! handles. Ingestion runs independently for every encrypted field of a
//! creation request — partial validation is forbidden — and a handle only
//! exists after its ingestion proof has been checked.
//!
//! ## Security Invariant
//!
//! Handles are content-addressed: a handle's identity is the SHA-256
//! digest of the raw ciphertext bytes, so a stored handle can never be
//! silently swapped for a different ciphertext. The raw bytes themselves
//! are not retained — the external encryption engine resolves content
//! addresses on its side.

use serde::{Deserialize, Serialize};

use sealrec_core::{ContentDigest, FieldName};
use sealrec_verify::{IngestionContext, IngestionProof, ProofVerifier, RawCiphertext};

use crate::error::StoreError;
use crate::policy::AuthorizationGate;

/// An opaque, content-addressed reference to a stored encrypted value.
///
/// Immutable once created. The `revealable` flag is decided by the
/// authorization gate at ingestion time; a sealed handle is permanently
/// excluded from reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiphertextHandle {
    field: FieldName,
    digest: ContentDigest,
    revealable: bool,
}

impl CiphertextHandle {
    pub(crate) fn new(field: FieldName, digest: ContentDigest, revealable: bool) -> Self {
        Self {
            field,
            digest,
            revealable,
        }
    }

    /// The encrypted field this handle fills.
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    /// The content digest naming the ciphertext.
    pub fn digest(&self) -> ContentDigest {
        self.digest
    }

    /// Whether this handle may ever be subject to a reveal request.
    pub fn revealable(&self) -> bool {
        self.revealable
    }
}

/// Ingest one encrypted field input: parse the wire representation,
/// check the ingestion proof against the verifier capability, and let
/// the gate decide revealability.
///
/// # Errors
///
/// - `MalformedCiphertext` if the raw representation cannot be parsed.
/// - `InvalidProof` if the verifier rejects (or cannot process) the
///   ingestion proof.
pub(crate) fn ingest_field<V: ProofVerifier, G: AuthorizationGate>(
    ciphertext: &[u8],
    proof: &IngestionProof,
    ctx: &IngestionContext,
    verifier: &V,
    gate: &G,
) -> Result<CiphertextHandle, StoreError> {
    let raw = RawCiphertext::parse(ciphertext).map_err(|e| StoreError::MalformedCiphertext {
        field: ctx.field.clone(),
        reason: e.reason,
    })?;

    let accepted = verifier
        .verify_ingestion(&raw, proof, ctx)
        .map_err(|e| StoreError::InvalidProof {
            reason: format!("ingestion proof for field {}: {e}", ctx.field),
        })?;
    if !accepted {
        return Err(StoreError::InvalidProof {
            reason: format!("ingestion proof rejected for field {}", ctx.field),
        });
    }

    let digest = raw.digest();
    let revealable = gate.mark_revealable(&ctx.field, &digest);
    Ok(CiphertextHandle::new(ctx.field.clone(), digest, revealable))
}
