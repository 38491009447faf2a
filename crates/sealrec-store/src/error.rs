//! # Store Error Taxonomy
//!
//! Every failing operation reports exactly one of these outcomes and
//! leaves the store in the state it was in before the call. There is no
//! internal retry: a rejected proof is permanent for the given inputs and
//! a caller must resubmit with corrected ones.

use thiserror::Error;

use sealrec_core::{FieldName, PrincipalId, RecordId};

/// Terminal outcome of a failed store operation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this id already exists; ids are never reused.
    #[error("duplicate record id: {id}")]
    DuplicateId {
        /// The contested id.
        id: RecordId,
    },

    /// No record with this id exists.
    #[error("record not found: {id}")]
    NotFound {
        /// The requested id.
        id: RecordId,
    },

    /// A creation request names the same field twice; records map each
    /// field name to exactly one value or handle.
    #[error("duplicate field in creation request: {field}")]
    DuplicateField {
        /// The repeated field name.
        field: FieldName,
    },

    /// A raw ciphertext representation could not be parsed.
    #[error("malformed ciphertext for field {field}: {reason}")]
    MalformedCiphertext {
        /// The encrypted field whose input was rejected.
        field: FieldName,
        /// Why the representation was rejected.
        reason: String,
    },

    /// Proof verification failed; the record is unchanged.
    #[error("invalid proof: {reason}")]
    InvalidProof {
        /// Why the proof was rejected.
        reason: String,
    },

    /// The record has already been revealed; reveal is at-most-once.
    #[error("record already revealed: {id}")]
    AlreadyRevealed {
        /// The record in its terminal state.
        id: RecordId,
    },

    /// The authorization gate denied the operation.
    ///
    /// The baseline gate never denies; this outcome exists for stricter
    /// deployments supplying their own gate.
    #[error("principal {principal} is not authorized to {action}")]
    Unauthorized {
        /// The denied principal.
        principal: PrincipalId,
        /// The attempted action ("create record", "reveal record").
        action: &'static str,
    },
}
