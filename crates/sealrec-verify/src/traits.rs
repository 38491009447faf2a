//! # Proof Verifier Trait
//!
//! The abstract interface for the external verifier capability. The store
//! calls these two oracles and never inspects their internals.
//!
//! ## Security Invariant
//!
//! The trait requires `Send + Sync` bounds for safe concurrent access.
//! Both operations are pure functions with no side effects: the same
//! inputs always produce the same verdict.

use std::collections::BTreeMap;

use thiserror::Error;

use sealrec_core::{CanonicalizationError, ContentDigest, FieldName};

use crate::ciphertext::{DecryptionProof, IngestionContext, IngestionProof, RawCiphertext};

/// Error during proof verification.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The proof is structurally invalid for this verifier.
    #[error("invalid proof: {0}")]
    InvalidProof(String),

    /// The verification context could not be processed.
    #[error("context error: {0}")]
    ContextError(String),

    /// Transcript canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// The external verifier capability.
///
/// Implementations decide whether a proof is acceptable; the store treats
/// `Ok(false)` and structural errors identically (the triggering call
/// fails, state is untouched).
pub trait ProofVerifier: Send + Sync {
    /// Check that `proof` attests `ciphertext` was correctly formed for
    /// `ctx` (this record, field, and principal).
    fn verify_ingestion(
        &self,
        ciphertext: &RawCiphertext,
        proof: &IngestionProof,
        ctx: &IngestionContext,
    ) -> Result<bool, VerifyError>;

    /// Check that `proof` binds `claimed` cleartext values to the exact
    /// ordered sequence of stored ciphertext handles.
    ///
    /// `handles` is the store's own ordered view — field name and content
    /// digest per handle. The proof is bound to this order; a permuted or
    /// substituted sequence must not verify.
    fn verify_decryption(
        &self,
        handles: &[(FieldName, ContentDigest)],
        claimed: &BTreeMap<FieldName, i64>,
        proof: &DecryptionProof,
    ) -> Result<bool, VerifyError>;
}
