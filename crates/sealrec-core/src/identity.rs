//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the identifier namespaces of Sealed Records.
//! These prevent accidental identifier confusion — you cannot pass a
//! `FieldName` where a `RecordId` is expected.
//!
//! Record ids are caller-supplied string keys (the store enforces
//! uniqueness, not this crate). Principals are opaque identity strings
//! (DID, address, or deployment-specific) supplied by the embedding
//! application.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum accepted length for any identifier string.
const MAX_IDENTIFIER_LEN: usize = 256;

/// Unique key of a record, immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId(String);

/// Name of a plaintext or encrypted field within a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldName(String);

/// Identity of a principal (record creator or reveal requester).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrincipalId(String);

fn validate(kind: &'static str, value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::InvalidIdentifier {
            kind,
            reason: "must not be empty".to_string(),
        });
    }
    if value.len() > MAX_IDENTIFIER_LEN {
        return Err(CoreError::InvalidIdentifier {
            kind,
            reason: format!("exceeds {MAX_IDENTIFIER_LEN} bytes"),
        });
    }
    Ok(())
}

impl RecordId {
    /// Construct a record id, rejecting empty or oversized keys.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        validate("record id", &id)?;
        Ok(Self(id))
    }

    /// Access the inner string key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FieldName {
    /// Construct a field name, rejecting empty or oversized names.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        validate("field name", &name)?;
        Ok(Self(name))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PrincipalId {
    /// Construct a principal identity, rejecting empty or oversized values.
    pub fn new(principal: impl Into<String>) -> Result<Self, CoreError> {
        let principal = principal.into();
        validate("principal", &principal)?;
        Ok(Self(principal))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
