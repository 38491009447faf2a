//! # Mock Verifier (Phase 1)
//!
//! A deterministic, transparent verifier for tests and Phase-1
//! deployments. Proofs are SHA-256 digests over domain-separated,
//! JCS-canonicalized transcripts — they provide no zero-knowledge privacy
//! but satisfy the capability interface with real accept/reject behavior.
//!
//! The `prove_*` companions mint proofs the verifier accepts, so tests
//! can exercise both outcomes without an external encryption engine.
//!
//! ## Security Notice
//!
//! This implementation provides NO zero-knowledge privacy and must be
//! replaced with a verifier backed by the external encryption engine in
//! production.

use std::collections::BTreeMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

use sealrec_core::{CanonicalBytes, ContentDigest, FieldName};

use crate::ciphertext::{DecryptionProof, IngestionContext, IngestionProof, RawCiphertext};
use crate::traits::{ProofVerifier, VerifyError};

const INGEST_DOMAIN: &[u8] = b"sealrec/ingest/v1";
const REVEAL_DOMAIN: &[u8] = b"sealrec/reveal/v1";

/// Transcript for a decryption proof: the exact ordered handle sequence
/// plus the claimed cleartext map. Arrays keep their order under JCS, so
/// the proof is order-bound by construction.
#[derive(Serialize)]
struct RevealTranscript<'a> {
    handles: &'a [(FieldName, ContentDigest)],
    claimed: &'a BTreeMap<FieldName, i64>,
}

/// Deterministic transparent verifier — no ZK privacy.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockVerifier;

impl MockVerifier {
    /// Mint an ingestion proof the mock verifier will accept.
    pub fn prove_ingestion(
        ciphertext: &RawCiphertext,
        ctx: &IngestionContext,
    ) -> Result<IngestionProof, VerifyError> {
        Ok(IngestionProof(ingest_transcript_hash(ciphertext, ctx)?))
    }

    /// Mint a decryption proof the mock verifier will accept for this
    /// exact handle order and claimed cleartext.
    pub fn prove_decryption(
        handles: &[(FieldName, ContentDigest)],
        claimed: &BTreeMap<FieldName, i64>,
    ) -> Result<DecryptionProof, VerifyError> {
        Ok(DecryptionProof(reveal_transcript_hash(handles, claimed)?))
    }
}

impl ProofVerifier for MockVerifier {
    fn verify_ingestion(
        &self,
        ciphertext: &RawCiphertext,
        proof: &IngestionProof,
        ctx: &IngestionContext,
    ) -> Result<bool, VerifyError> {
        Ok(ingest_transcript_hash(ciphertext, ctx)? == proof.0)
    }

    fn verify_decryption(
        &self,
        handles: &[(FieldName, ContentDigest)],
        claimed: &BTreeMap<FieldName, i64>,
        proof: &DecryptionProof,
    ) -> Result<bool, VerifyError> {
        Ok(reveal_transcript_hash(handles, claimed)? == proof.0)
    }
}

fn ingest_transcript_hash(
    ciphertext: &RawCiphertext,
    ctx: &IngestionContext,
) -> Result<Vec<u8>, VerifyError> {
    let ctx_bytes = CanonicalBytes::new(ctx)?;
    let mut hasher = Sha256::new();
    hasher.update(INGEST_DOMAIN);
    hasher.update(ctx_bytes.as_bytes());
    hasher.update(ciphertext.as_bytes());
    Ok(hasher.finalize().to_vec())
}

fn reveal_transcript_hash(
    handles: &[(FieldName, ContentDigest)],
    claimed: &BTreeMap<FieldName, i64>,
) -> Result<Vec<u8>, VerifyError> {
    let transcript = CanonicalBytes::new(&RevealTranscript { handles, claimed })?;
    let mut hasher = Sha256::new();
    hasher.update(REVEAL_DOMAIN);
    hasher.update(transcript.as_bytes());
    Ok(hasher.finalize().to_vec())
}
