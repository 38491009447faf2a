//! # sealrec-store — Encrypted-Attribute Record Store
//!
//! The core of Sealed Records: a keyed, append-only collection of records
//! carrying a mix of plaintext attributes and opaque ciphertext handles,
//! with a proof-gated, at-most-once reveal protocol for the encrypted
//! fields.
//!
//! ## Control Flow
//!
//! A client submits a new record with plaintext attributes plus
//! externally produced ciphertexts and their ingestion proofs. The handle
//! registry validates every encrypted field independently (parse, then
//! proof-check through the [`ProofVerifier`](sealrec_verify::ProofVerifier)
//! capability) before anything is persisted — creation is atomic. Later,
//! a client submits claimed cleartext values and a decryption proof; the
//! proof is checked against the **stored** handle sequence (never
//! caller-supplied handles), and on success the record transitions
//! `Encrypted → Revealed` exactly once, permanently.
//!
//! ## Concurrency Model
//!
//! Single-threaded, serialized per store: every mutating operation takes
//! `&mut self` and runs to completion, so there is no observable
//! "in-progress" reveal and first-writer-wins on races falls out of
//! exclusive access.

pub mod error;
pub mod events;
pub mod ingest;
pub mod policy;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use events::{EventRecord, StoreEvent};
pub use ingest::CiphertextHandle;
pub use policy::{AuthorizationGate, OpenGate, OwnerOnlyGate};
pub use record::{PlainValue, Record, RecordView, RevealState, RevealedValues};
pub use store::{EncryptedFieldInput, RecordStore};
