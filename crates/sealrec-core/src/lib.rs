//! # sealrec-core — Foundational Types for Sealed Records
//!
//! This crate is the bedrock of the Sealed Records workspace. It defines the
//! type-system primitives shared by the verifier boundary and the record
//! store; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `RecordId`, `FieldName`,
//!    `PrincipalId` — validated constructors, no bare strings for
//!    identifiers.
//!
//! 2. **`CanonicalBytes` newtype.** All digest computation over structured
//!    data flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` for digests.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type enforces UTC with Z
//!    suffix and seconds precision.
//!
//! 4. **Content-addressed ciphertext.** `ContentDigest` names opaque
//!    ciphertext blobs by their SHA-256 digest; the raw-bytes digest path
//!    is reserved for external blobs that are never re-serialized.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sealrec-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{sha256_digest, sha256_raw, ContentDigest};
pub use error::{CanonicalizationError, CoreError};
pub use identity::{FieldName, PrincipalId, RecordId};
pub use temporal::Timestamp;
