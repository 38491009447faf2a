//! # Authorization Gate
//!
//! Policy hooks deciding who may create records, who may trigger a
//! reveal, and which encrypted fields are revealable at all. The state
//! machine contract never changes with the gate — a stricter gate only
//! narrows who gets to drive it.
//!
//! The baseline ([`OpenGate`]) permits any principal to create records
//! and to trigger reveal for any record. Any-caller reveal is a
//! deliberate, documented policy choice, not an oversight: reveal is
//! typically performed by a third-party investigator holding an
//! externally obtained authorization, which is modeled outside this core.
//! Deployments that want owner-restricted reveal use [`OwnerOnlyGate`] or
//! supply their own gate.

use sealrec_core::{ContentDigest, FieldName, PrincipalId};

use crate::record::Record;

/// Policy hooks consulted by the store.
///
/// Default methods implement the baseline permit-everything policy;
/// implementations override only what they tighten.
pub trait AuthorizationGate: Send + Sync {
    /// Whether `principal` may create a record it will own.
    fn can_create(&self, _principal: &PrincipalId) -> bool {
        true
    }

    /// Called once per encrypted field at ingestion: whether the field is
    /// eligible for reveal at all. Returning `false` permanently seals
    /// the field.
    fn mark_revealable(&self, _field: &FieldName, _digest: &ContentDigest) -> bool {
        true
    }

    /// Whether `principal` may trigger reveal for `record`.
    fn can_reveal(&self, _principal: &PrincipalId, _record: &Record) -> bool {
        true
    }
}

/// The baseline gate: every hook permits.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenGate;

impl AuthorizationGate for OpenGate {}

/// A stricter gate restricting reveal to the record's owner.
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnerOnlyGate;

impl AuthorizationGate for OwnerOnlyGate {
    fn can_reveal(&self, principal: &PrincipalId, record: &Record) -> bool {
        principal == record.owner()
    }
}
