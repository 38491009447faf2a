//! # Record Model and Reveal State Machine
//!
//! A record pairs immutable plaintext attributes with a sequence of
//! proof-checked ciphertext handles and drives those handles through the
//! one-way reveal lifecycle.
//!
//! ## States
//!
//! ```text
//! Encrypted ──▶ Revealed (terminal)
//! ```
//!
//! No other states, no rollback, no re-entry. A record resting
//! `Encrypted` forever is a valid terminal resting state, not an error.
//!
//! ## Design Decision
//!
//! With exactly two states and one transition, a typestate encoding would
//! buy nothing over an enum guarded by `commit_reveal()`. The enum keeps
//! `Record` a single storable type while the `Result`-returning commit
//! rejects re-entry at runtime, which is the core correctness property of
//! the whole system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sealrec_core::{ContentDigest, FieldName, PrincipalId, RecordId, Timestamp};

use crate::error::StoreError;
use crate::ingest::CiphertextHandle;

// ─── Reveal State ────────────────────────────────────────────────────

/// The reveal lifecycle state of a record's encrypted fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealState {
    /// Encrypted fields are sealed; cleartext is unknown to the store.
    Encrypted,
    /// Cleartext has been committed (terminal).
    Revealed,
}

impl RevealState {
    /// Whether this state is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Revealed)
    }
}

impl std::fmt::Display for RevealState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Encrypted => "ENCRYPTED",
            Self::Revealed => "REVEALED",
        };
        f.write_str(s)
    }
}

// ─── Plaintext Attributes ────────────────────────────────────────────

/// A plaintext attribute value: an integer measurement or free text.
///
/// Floats are excluded by construction — measurement values in this
/// system are integers, matching the canonicalization rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlainValue {
    /// A numeric measurement (odometer reading, fuel level, ...).
    Integer(i64),
    /// Free-text description.
    Text(String),
}

// ─── Revealed Values ─────────────────────────────────────────────────

/// The cleartext committed by a successful reveal.
///
/// Written exactly once, never mutated. Carries the revealing principal
/// and commit time for auditability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedValues {
    /// Revealed integer value per encrypted field.
    pub values: BTreeMap<FieldName, i64>,
    /// When the reveal was committed.
    pub revealed_at: Timestamp,
    /// The principal whose proof won the reveal.
    pub revealed_by: PrincipalId,
}

// ─── Record ──────────────────────────────────────────────────────────

/// A stored record: immutable identity and plaintext attributes, the
/// ordered proof-checked ciphertext handles, and the reveal state.
///
/// Every handle in `encrypted` passed ingestion validation before this
/// record became visible — the store never persists an unverified handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    owner: PrincipalId,
    created_at: Timestamp,
    plain: Vec<(FieldName, PlainValue)>,
    encrypted: Vec<CiphertextHandle>,
    reveal_state: RevealState,
    revealed: Option<RevealedValues>,
}

impl Record {
    /// Assemble a record from validated parts. Only the store's create
    /// path constructs records, after every handle has been ingested.
    pub(crate) fn new(
        id: RecordId,
        owner: PrincipalId,
        plain: Vec<(FieldName, PlainValue)>,
        encrypted: Vec<CiphertextHandle>,
    ) -> Self {
        Self {
            id,
            owner,
            created_at: Timestamp::now(),
            plain,
            encrypted,
            reveal_state: RevealState::Encrypted,
            revealed: None,
        }
    }

    /// The record's unique key.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// The creating principal.
    pub fn owner(&self) -> &PrincipalId {
        &self.owner
    }

    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// The plaintext attributes, in creation order.
    pub fn plain(&self) -> &[(FieldName, PlainValue)] {
        &self.plain
    }

    /// Look up a plaintext attribute by field name.
    pub fn plain_value(&self, field: &FieldName) -> Option<&PlainValue> {
        self.plain.iter().find(|(f, _)| f == field).map(|(_, v)| v)
    }

    /// The names of the encrypted fields, in ingestion order.
    ///
    /// Raw ciphertext handles are not exposed here; entitlement to handle
    /// contents is an authorization-gate policy decision.
    pub fn encrypted_fields(&self) -> impl Iterator<Item = &FieldName> {
        self.encrypted.iter().map(|h| h.field())
    }

    /// Current reveal state.
    pub fn reveal_state(&self) -> RevealState {
        self.reveal_state
    }

    /// The committed cleartext, present iff the record is `Revealed`.
    pub fn revealed(&self) -> Option<&RevealedValues> {
        self.revealed.as_ref()
    }

    /// The exact ordered handle sequence a decryption proof must bind to:
    /// field name and content digest of every *revealable* encrypted
    /// field, in ingestion order. Sealed fields are excluded and can
    /// never be subject to a reveal.
    pub(crate) fn revealable_handles(&self) -> Vec<(FieldName, ContentDigest)> {
        self.encrypted
            .iter()
            .filter(|h| h.revealable())
            .map(|h| (h.field().clone(), h.digest()))
            .collect()
    }

    /// The serializable read model for thin clients.
    ///
    /// Unlike the record itself (which is the store's persisted state,
    /// ciphertext handles included), the view carries only the plaintext
    /// surface: attributes, encrypted field *names*, reveal state, and
    /// the cleartext once revealed. Handles never leave the store this
    /// way; entitlement to them is an authorization-gate decision.
    pub fn view(&self) -> RecordView {
        RecordView {
            id: self.id.clone(),
            owner: self.owner.clone(),
            created_at: self.created_at,
            plain: self.plain.clone(),
            encrypted_fields: self.encrypted.iter().map(|h| h.field().clone()).collect(),
            reveal_state: self.reveal_state,
            revealed: self.revealed.clone(),
        }
    }

    /// Commit the one-time `Encrypted → Revealed` transition.
    ///
    /// # Errors
    ///
    /// `AlreadyRevealed` if the record is already terminal; the stored
    /// values are never overwritten.
    pub(crate) fn commit_reveal(
        &mut self,
        values: RevealedValues,
    ) -> Result<&RevealedValues, StoreError> {
        if self.reveal_state.is_terminal() {
            return Err(StoreError::AlreadyRevealed {
                id: self.id.clone(),
            });
        }
        self.reveal_state = RevealState::Revealed;
        Ok(self.revealed.insert(values))
    }
}

/// The plaintext-only read model exposed to thin clients: everything a
/// caller is entitled to without a policy decision — no ciphertext
/// handles, no content digests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordView {
    /// The record's unique key.
    pub id: RecordId,
    /// The creating principal.
    pub owner: PrincipalId,
    /// Creation time.
    pub created_at: Timestamp,
    /// Plaintext attributes in creation order.
    pub plain: Vec<(FieldName, PlainValue)>,
    /// Names of the encrypted fields, in ingestion order.
    pub encrypted_fields: Vec<FieldName>,
    /// Current reveal state.
    pub reveal_state: RevealState,
    /// The committed cleartext, present iff revealed.
    pub revealed: Option<RevealedValues>,
}
