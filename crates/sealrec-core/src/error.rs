//! # Error Types — Structured Error Hierarchy
//!
//! Errors for the foundational types. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Identifier validation errors name the offending identifier kind.
//! - Canonicalization errors fail loudly — a digest over non-canonical
//!   bytes must never be produced silently.

use thiserror::Error;

/// Top-level error type for the foundational crate.
#[derive(Error, Debug)]
pub enum CoreError {
    /// An identifier failed validation at construction.
    #[error("invalid {kind}: {reason}")]
    InvalidIdentifier {
        /// The identifier kind ("record id", "field name", "principal").
        kind: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A timestamp string failed validation.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Measurements must be integers.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}
