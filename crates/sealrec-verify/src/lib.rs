//! # sealrec-verify — External Verifier Boundary
//!
//! The record store treats ciphertexts and proofs as opaque byte strings
//! and consumes proof verification as an external capability. This crate
//! defines that boundary:
//!
//! - [`RawCiphertext`] — the external wire representation of an encrypted
//!   value, parsed (never interpreted) at ingestion.
//! - [`IngestionProof`] / [`DecryptionProof`] — opaque proof blobs.
//! - [`ProofVerifier`] — the capability trait the store calls. Both
//!   operations are pure, stateless, deterministic-per-input oracles.
//! - [`MockVerifier`] — a deterministic, transparent implementation for
//!   tests and Phase-1 deployments. It provides no zero-knowledge privacy.
//!
//! The crate never implements the encryption scheme itself; real
//! deployments plug in a verifier backed by the external encryption
//! engine.

pub mod ciphertext;
pub mod mock;
pub mod traits;

pub use ciphertext::{
    DecryptionProof, IngestionContext, IngestionProof, MalformedCiphertext, RawCiphertext,
    CIPHERTEXT_VERSION,
};
pub use mock::MockVerifier;
pub use traits::{ProofVerifier, VerifyError};
