//! # Record Store
//!
//! The owned, indexed collection behind the whole system: a record table
//! keyed by id plus an append-only id index preserving creation order.
//! No global mutable state — the store is passed explicitly to every
//! caller, and all mutation goes through `&mut self`.
//!
//! ## Atomicity
//!
//! `create` ingests every encrypted field before touching the table; any
//! failure leaves no trace of the record. `request_reveal` checks the
//! proof against the stored handle sequence before committing; a rejected
//! proof leaves the record `Encrypted` with no partial mutation.
//!
//! ## Substitution Resistance
//!
//! The handle sequence given to the verifier is always fetched from the
//! store itself, never accepted as caller input. A caller proving
//! knowledge of cleartext for *some other* ciphertext cannot substitute
//! its own handles into the check.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::{info, warn};

use sealrec_core::{FieldName, PrincipalId, RecordId, Timestamp};
use sealrec_verify::{DecryptionProof, IngestionContext, IngestionProof, ProofVerifier};

use crate::error::StoreError;
use crate::events::{EventLog, EventRecord, StoreEvent};
use crate::ingest::ingest_field;
use crate::policy::{AuthorizationGate, OpenGate};
use crate::record::{PlainValue, Record, RecordView, RevealedValues};

/// First field name that repeats within a creation request, if any.
fn first_duplicate<'a>(mut fields: impl Iterator<Item = &'a FieldName>) -> Option<&'a FieldName> {
    let mut seen = BTreeSet::new();
    fields.find(|f| !seen.insert(*f))
}

/// One encrypted field of a creation request: the external ciphertext
/// wire bytes and the proof that it was correctly formed.
#[derive(Debug, Clone)]
pub struct EncryptedFieldInput {
    /// Raw ciphertext in wire form.
    pub ciphertext: Vec<u8>,
    /// Ingestion proof for this ciphertext and context.
    pub proof: IngestionProof,
}

/// The encrypted-attribute record store.
///
/// Generic over the verifier capability and the authorization gate so
/// deployments can swap either without touching the store contract.
#[derive(Debug)]
pub struct RecordStore<V, G = OpenGate> {
    verifier: V,
    gate: G,
    records: HashMap<RecordId, Record>,
    index: Vec<RecordId>,
    events: EventLog,
}

impl<V: ProofVerifier> RecordStore<V, OpenGate> {
    /// Create an empty store with the baseline permit-all gate.
    pub fn new(verifier: V) -> Self {
        Self::with_gate(verifier, OpenGate)
    }
}

impl<V: ProofVerifier, G: AuthorizationGate> RecordStore<V, G> {
    /// Create an empty store with a custom authorization gate.
    pub fn with_gate(verifier: V, gate: G) -> Self {
        Self {
            verifier,
            gate,
            records: HashMap::new(),
            index: Vec::new(),
            events: EventLog::default(),
        }
    }

    /// Create a record: all fields supplied atomically, exactly once.
    ///
    /// Every encrypted field input is ingested (parsed and proof-checked)
    /// independently before the record becomes visible. On any failure
    /// the whole creation fails and the store is untouched.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the gate denies creation.
    /// - `DuplicateId` if the id is already taken (ids are never reused).
    /// - `MalformedCiphertext` / `InvalidProof` from ingestion.
    pub fn create(
        &mut self,
        id: RecordId,
        plain: Vec<(FieldName, PlainValue)>,
        encrypted: Vec<(FieldName, EncryptedFieldInput)>,
        owner: PrincipalId,
    ) -> Result<(), StoreError> {
        if !self.gate.can_create(&owner) {
            return Err(StoreError::Unauthorized {
                principal: owner,
                action: "create record",
            });
        }
        if self.records.contains_key(&id) {
            return Err(StoreError::DuplicateId { id });
        }
        // Records map each field name to exactly one value or handle; a
        // repeated name would leave the value-to-ciphertext binding
        // ambiguous at reveal.
        if let Some(field) = first_duplicate(plain.iter().map(|(f, _)| f)) {
            return Err(StoreError::DuplicateField {
                field: field.clone(),
            });
        }
        if let Some(field) = first_duplicate(encrypted.iter().map(|(f, _)| f)) {
            return Err(StoreError::DuplicateField {
                field: field.clone(),
            });
        }

        // Ingest every encrypted field before anything is persisted.
        let mut handles = Vec::with_capacity(encrypted.len());
        for (field, input) in &encrypted {
            let ctx = IngestionContext {
                record_id: id.clone(),
                field: field.clone(),
                principal: owner.clone(),
            };
            handles.push(ingest_field(
                &input.ciphertext,
                &input.proof,
                &ctx,
                &self.verifier,
                &self.gate,
            )?);
        }

        info!(record_id = %id, owner = %owner, encrypted_fields = handles.len(), "record created");
        let record = Record::new(id.clone(), owner.clone(), plain, handles);
        self.records.insert(id.clone(), record);
        self.index.push(id.clone());
        self.events.emit(StoreEvent::RecordCreated { id, owner });
        Ok(())
    }

    /// Read a record.
    ///
    /// # Errors
    ///
    /// `NotFound` if no record with this id exists.
    pub fn get(&self, id: &RecordId) -> Result<&Record, StoreError> {
        self.records
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    /// All record ids in creation order — a stable snapshot, not a live
    /// cursor. Reveal transitions never affect enumeration.
    pub fn list_ids(&self) -> Vec<RecordId> {
        self.index.clone()
    }

    /// Reveal a record's encrypted fields, at most once.
    ///
    /// Builds the exact ordered handle sequence from the stored record
    /// and asks the verifier whether `proof` binds `claimed` to it. On
    /// success the cleartext is committed permanently and
    /// `DataRevealed` is emitted.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id is unknown.
    /// - `Unauthorized` if the gate denies this principal.
    /// - `AlreadyRevealed` if the record is already terminal.
    /// - `InvalidProof` if the claimed fields do not match the revealable
    ///   handle set or the verifier rejects the proof; the record remains
    ///   `Encrypted`.
    pub fn request_reveal(
        &mut self,
        id: &RecordId,
        principal: &PrincipalId,
        claimed: BTreeMap<FieldName, i64>,
        proof: &DecryptionProof,
    ) -> Result<RevealedValues, StoreError> {
        let record = self
            .records
            .get(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;

        if !self.gate.can_reveal(principal, record) {
            return Err(StoreError::Unauthorized {
                principal: principal.clone(),
                action: "reveal record",
            });
        }
        if record.reveal_state().is_terminal() {
            return Err(StoreError::AlreadyRevealed { id: id.clone() });
        }

        // The proof binds to the stored handles, never caller input.
        let handles = record.revealable_handles();
        if handles.is_empty() {
            // Nothing to bind a proof to: a proof over an empty handle
            // sequence would be universally mintable.
            return Err(StoreError::InvalidProof {
                reason: "record has no revealable encrypted fields".to_string(),
            });
        }
        let handle_fields: BTreeSet<&FieldName> = handles.iter().map(|(f, _)| f).collect();
        let claimed_fields: BTreeSet<&FieldName> = claimed.keys().collect();
        if handle_fields != claimed_fields {
            return Err(StoreError::InvalidProof {
                reason: "claimed fields do not match the revealable encrypted fields".to_string(),
            });
        }

        let accepted = self
            .verifier
            .verify_decryption(&handles, &claimed, proof)
            .map_err(|e| StoreError::InvalidProof {
                reason: e.to_string(),
            })?;
        if !accepted {
            warn!(record_id = %id, principal = %principal, "decryption proof rejected");
            return Err(StoreError::InvalidProof {
                reason: "decryption proof rejected".to_string(),
            });
        }

        let values = RevealedValues {
            values: claimed,
            revealed_at: Timestamp::now(),
            revealed_by: principal.clone(),
        };
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })?;
        let committed = record.commit_reveal(values)?.clone();

        info!(record_id = %id, principal = %principal, "record revealed");
        self.events.emit(StoreEvent::DataRevealed {
            id: id.clone(),
            values: committed.values.clone(),
        });
        Ok(committed)
    }

    /// All emitted events, oldest first.
    pub fn events(&self) -> &[EventRecord] {
        self.events.entries()
    }

    /// Serializable read model for a record (see [`Record::view()`]).
    ///
    /// # Errors
    ///
    /// `NotFound` if no record with this id exists.
    pub fn view(&self, id: &RecordId) -> Result<RecordView, StoreError> {
        Ok(self.get(id)?.view())
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealrec_core::ContentDigest;
    use sealrec_verify::{MockVerifier, RawCiphertext, CIPHERTEXT_VERSION};

    use crate::policy::OwnerOnlyGate;
    use crate::record::RevealState;

    fn id(s: &str) -> RecordId {
        RecordId::new(s).unwrap()
    }

    fn field(s: &str) -> FieldName {
        FieldName::new(s).unwrap()
    }

    fn principal(s: &str) -> PrincipalId {
        PrincipalId::new(s).unwrap()
    }

    fn wire(fill: u8) -> Vec<u8> {
        let mut bytes = vec![CIPHERTEXT_VERSION];
        bytes.extend(std::iter::repeat(fill).take(32));
        bytes
    }

    /// Mint a valid encrypted field input for the mock verifier.
    fn encrypted_input(
        record_id: &RecordId,
        field_name: &str,
        owner: &PrincipalId,
        fill: u8,
    ) -> (FieldName, EncryptedFieldInput) {
        let bytes = wire(fill);
        let f = field(field_name);
        let ctx = IngestionContext {
            record_id: record_id.clone(),
            field: f.clone(),
            principal: owner.clone(),
        };
        let raw = RawCiphertext::parse(&bytes).unwrap();
        let proof = MockVerifier::prove_ingestion(&raw, &ctx).unwrap();
        (
            f,
            EncryptedFieldInput {
                ciphertext: bytes,
                proof,
            },
        )
    }

    fn handle_for(field_name: &str, fill: u8) -> (FieldName, ContentDigest) {
        (
            field(field_name),
            RawCiphertext::parse(&wire(fill)).unwrap().digest(),
        )
    }

    fn plain_attrs() -> Vec<(FieldName, PlainValue)> {
        vec![
            (field("odometer"), PlainValue::Integer(1000)),
            (field("fuel"), PlainValue::Integer(40)),
        ]
    }

    /// Store with one record "v1": plaintext odometer/fuel, encrypted
    /// speed (fill 0x11) and rpm (fill 0x22), owned by alice.
    fn store_with_v1() -> RecordStore<MockVerifier> {
        let mut store = RecordStore::new(MockVerifier);
        let owner = principal("did:example:alice");
        let rid = id("v1");
        store
            .create(
                rid.clone(),
                plain_attrs(),
                vec![
                    encrypted_input(&rid, "speed", &owner, 0x11),
                    encrypted_input(&rid, "rpm", &owner, 0x22),
                ],
                owner,
            )
            .unwrap();
        store
    }

    fn claimed() -> BTreeMap<FieldName, i64> {
        BTreeMap::from([(field("speed"), 60), (field("rpm"), 2200)])
    }

    fn valid_reveal_proof() -> DecryptionProof {
        let handles = vec![handle_for("speed", 0x11), handle_for("rpm", 0x22)];
        MockVerifier::prove_decryption(&handles, &claimed()).unwrap()
    }

    // ── Scenario (end to end) ────────────────────────────────────────

    #[test]
    fn test_create_reveal_scenario() {
        let mut store = store_with_v1();

        let record = store.get(&id("v1")).unwrap();
        assert_eq!(record.reveal_state(), RevealState::Encrypted);
        assert_eq!(
            record.plain_value(&field("odometer")),
            Some(&PlainValue::Integer(1000))
        );
        assert_eq!(
            record.encrypted_fields().cloned().collect::<Vec<_>>(),
            vec![field("speed"), field("rpm")]
        );

        let revealed = store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap();
        assert_eq!(revealed.values, claimed());

        let record = store.get(&id("v1")).unwrap();
        assert_eq!(record.reveal_state(), RevealState::Revealed);
        assert_eq!(record.revealed().unwrap().values, claimed());

        // Second reveal with any proof fails AlreadyRevealed.
        let err = store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyRevealed { .. }));
    }

    // ── Creation ─────────────────────────────────────────────────────

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = store_with_v1();
        let owner = principal("did:example:bob");
        let rid = id("v1");
        let err = store
            .create(
                rid.clone(),
                vec![(field("odometer"), PlainValue::Integer(9999))],
                vec![encrypted_input(&rid, "speed", &owner, 0x33)],
                owner,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));

        // The first record's data is retained.
        let record = store.get(&id("v1")).unwrap();
        assert_eq!(record.owner(), &principal("did:example:alice"));
        assert_eq!(
            record.plain_value(&field("odometer")),
            Some(&PlainValue::Integer(1000))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_creation_is_atomic_on_proof_failure() {
        let mut store = RecordStore::new(MockVerifier);
        let owner = principal("did:example:alice");
        let rid = id("v1");

        let good = encrypted_input(&rid, "speed", &owner, 0x11);
        // Second field carries a proof minted for the first field's bytes.
        let (_, bad_input) = encrypted_input(&rid, "speed", &owner, 0x11);
        let bad = (field("rpm"), bad_input);

        let err = store
            .create(rid.clone(), plain_attrs(), vec![good, bad], owner)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));

        // No partial record was persisted.
        assert!(matches!(
            store.get(&rid).unwrap_err(),
            StoreError::NotFound { .. }
        ));
        assert!(store.is_empty());
        assert!(store.list_ids().is_empty());
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_creation_is_atomic_on_malformed_ciphertext() {
        let mut store = RecordStore::new(MockVerifier);
        let owner = principal("did:example:alice");
        let rid = id("v1");

        let good = encrypted_input(&rid, "speed", &owner, 0x11);
        let bad = (
            field("rpm"),
            EncryptedFieldInput {
                ciphertext: vec![0xFF],
                proof: IngestionProof(vec![0; 32]),
            },
        );

        let err = store
            .create(rid.clone(), plain_attrs(), vec![good, bad], owner)
            .unwrap_err();
        match err {
            StoreError::MalformedCiphertext { field: f, .. } => {
                assert_eq!(f.as_str(), "rpm");
            }
            other => panic!("expected MalformedCiphertext, got: {other}"),
        }
        assert!(store.is_empty());
    }

    #[test]
    fn test_create_without_encrypted_fields() {
        let mut store = RecordStore::new(MockVerifier);
        store
            .create(
                id("plain-only"),
                plain_attrs(),
                vec![],
                principal("did:example:alice"),
            )
            .unwrap();
        let record = store.get(&id("plain-only")).unwrap();
        assert_eq!(record.encrypted_fields().count(), 0);
        assert_eq!(record.reveal_state(), RevealState::Encrypted);
    }

    #[test]
    fn test_duplicate_encrypted_field_rejected() {
        let mut store = RecordStore::new(MockVerifier);
        let owner = principal("did:example:alice");
        let rid = id("v1");

        // Two ciphertexts both submitted under the name "speed": with
        // both handles stored, a single claimed value would commit over
        // two distinct ciphertexts and leave the binding ambiguous.
        let err = store
            .create(
                rid.clone(),
                vec![],
                vec![
                    encrypted_input(&rid, "speed", &owner, 0x11),
                    encrypted_input(&rid, "speed", &owner, 0x22),
                ],
                owner,
            )
            .unwrap_err();
        match err {
            StoreError::DuplicateField { field: f } => assert_eq!(f.as_str(), "speed"),
            other => panic!("expected DuplicateField, got: {other}"),
        }
        assert!(store.is_empty());
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_duplicate_plain_field_rejected() {
        let mut store = RecordStore::new(MockVerifier);
        let err = store
            .create(
                id("v1"),
                vec![
                    (field("odometer"), PlainValue::Integer(1000)),
                    (field("odometer"), PlainValue::Integer(2000)),
                ],
                vec![],
                principal("did:example:alice"),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateField { .. }));
        assert!(store.is_empty());
    }

    // ── Read / enumeration ───────────────────────────────────────────

    #[test]
    fn test_get_unknown_id() {
        let store = RecordStore::new(MockVerifier);
        assert!(matches!(
            store.get(&id("missing")).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_view_omits_ciphertext_handles() {
        let mut store = store_with_v1();

        let view = store.view(&id("v1")).unwrap();
        assert_eq!(view.encrypted_fields, vec![field("speed"), field("rpm")]);
        assert!(view.revealed.is_none());

        // The serialized view carries field names only — no handle
        // digests or revealability flags.
        let json = serde_json::to_string(&view).unwrap();
        let stored_digest = handle_for("speed", 0x11).1.to_hex();
        assert!(!json.contains(&stored_digest));
        assert!(!json.contains("digest"));
        assert!(!json.contains("revealable"));

        store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap();
        let view = store.view(&id("v1")).unwrap();
        assert_eq!(view.reveal_state, RevealState::Revealed);
        assert_eq!(view.revealed.unwrap().values, claimed());
    }

    #[test]
    fn test_list_ids_creation_order() {
        let mut store = RecordStore::new(MockVerifier);
        let owner = principal("did:example:alice");
        for name in ["v3", "v1", "v2"] {
            store
                .create(id(name), vec![], vec![], owner.clone())
                .unwrap();
        }
        assert_eq!(store.list_ids(), vec![id("v3"), id("v1"), id("v2")]);
    }

    #[test]
    fn test_enumeration_stable_across_reveal() {
        let mut store = store_with_v1();
        store
            .create(id("v2"), vec![], vec![], principal("did:example:alice"))
            .unwrap();
        let before = store.list_ids();

        store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap();
        assert_eq!(store.list_ids(), before);
    }

    // ── Reveal protocol ──────────────────────────────────────────────

    #[test]
    fn test_reveal_unknown_id() {
        let mut store = RecordStore::new(MockVerifier);
        let err = store
            .request_reveal(
                &id("missing"),
                &principal("did:example:investigator"),
                claimed(),
                &DecryptionProof(vec![0; 32]),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn test_reveal_rejects_garbage_proof() {
        let mut store = store_with_v1();
        let err = store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &DecryptionProof(vec![0xAA; 32]),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));

        // No partial commit: record stays Encrypted.
        let record = store.get(&id("v1")).unwrap();
        assert_eq!(record.reveal_state(), RevealState::Encrypted);
        assert!(record.revealed().is_none());
    }

    #[test]
    fn test_reveal_is_order_bound() {
        let mut store = store_with_v1();
        // True cleartext, but the proof binds to a permuted handle order.
        let permuted = vec![handle_for("rpm", 0x22), handle_for("speed", 0x11)];
        let proof = MockVerifier::prove_decryption(&permuted, &claimed()).unwrap();

        let err = store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &proof,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));
    }

    #[test]
    fn test_reveal_rejects_substituted_handles() {
        let mut store = store_with_v1();
        // Proof over handles for different ciphertexts than the stored ones.
        let substituted = vec![handle_for("speed", 0x77), handle_for("rpm", 0x88)];
        let proof = MockVerifier::prove_decryption(&substituted, &claimed()).unwrap();

        let err = store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &proof,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));
    }

    #[test]
    fn test_reveal_rejects_mismatched_claim_shape() {
        let mut store = store_with_v1();
        let partial = BTreeMap::from([(field("speed"), 60)]);
        let handles = vec![handle_for("speed", 0x11), handle_for("rpm", 0x22)];
        let proof = MockVerifier::prove_decryption(&handles, &partial).unwrap();

        let err = store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                partial,
                &proof,
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));
    }

    #[test]
    fn test_reveal_rejected_without_revealable_fields() {
        // A proof over an empty handle sequence is universally mintable,
        // so records with nothing revealable must not be flippable.
        let empty_handles: Vec<(FieldName, ContentDigest)> = Vec::new();
        let empty_claim: BTreeMap<FieldName, i64> = BTreeMap::new();
        let proof = MockVerifier::prove_decryption(&empty_handles, &empty_claim).unwrap();
        let requester = principal("did:example:investigator");

        // Record with no encrypted fields at all.
        let mut store = RecordStore::new(MockVerifier);
        store
            .create(
                id("plain-only"),
                plain_attrs(),
                vec![],
                principal("did:example:alice"),
            )
            .unwrap();
        let err = store
            .request_reveal(&id("plain-only"), &requester, empty_claim.clone(), &proof)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));
        assert_eq!(
            store.get(&id("plain-only")).unwrap().reveal_state(),
            RevealState::Encrypted
        );

        // Record whose every encrypted field the gate sealed.
        struct SealAll;
        impl AuthorizationGate for SealAll {
            fn mark_revealable(&self, _field: &FieldName, _digest: &ContentDigest) -> bool {
                false
            }
        }
        let mut store = RecordStore::with_gate(MockVerifier, SealAll);
        let owner = principal("did:example:alice");
        let rid = id("sealed");
        store
            .create(
                rid.clone(),
                vec![],
                vec![encrypted_input(&rid, "gps", &owner, 0x44)],
                owner,
            )
            .unwrap();
        let err = store
            .request_reveal(&rid, &requester, empty_claim, &proof)
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidProof { .. }));
        assert_eq!(store.get(&rid).unwrap().reveal_state(), RevealState::Encrypted);
    }

    #[test]
    fn test_revealed_values_immutable_after_failed_retry() {
        let mut store = store_with_v1();
        store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap();

        let mut other = claimed();
        other.insert(field("speed"), 999);
        let handles = vec![handle_for("speed", 0x11), handle_for("rpm", 0x22)];
        let proof = MockVerifier::prove_decryption(&handles, &other).unwrap();
        assert!(store
            .request_reveal(
                &id("v1"),
                &principal("did:example:mallory"),
                other,
                &proof
            )
            .is_err());

        let record = store.get(&id("v1")).unwrap();
        assert_eq!(record.revealed().unwrap().values, claimed());
        assert_eq!(
            record.revealed().unwrap().revealed_by,
            principal("did:example:investigator")
        );
    }

    #[test]
    fn test_sealed_fields_never_revealed() {
        /// Seals any field named "gps".
        struct SealGps;
        impl AuthorizationGate for SealGps {
            fn mark_revealable(&self, field: &FieldName, _digest: &ContentDigest) -> bool {
                field.as_str() != "gps"
            }
        }

        let mut store = RecordStore::with_gate(MockVerifier, SealGps);
        let owner = principal("did:example:alice");
        let rid = id("v1");
        store
            .create(
                rid.clone(),
                vec![],
                vec![
                    encrypted_input(&rid, "speed", &owner, 0x11),
                    encrypted_input(&rid, "gps", &owner, 0x44),
                ],
                owner,
            )
            .unwrap();

        // Only the revealable handle participates in the proof.
        let speed_only = BTreeMap::from([(field("speed"), 60)]);
        let handles = vec![handle_for("speed", 0x11)];
        let proof = MockVerifier::prove_decryption(&handles, &speed_only).unwrap();
        let revealed = store
            .request_reveal(
                &rid,
                &principal("did:example:investigator"),
                speed_only.clone(),
                &proof,
            )
            .unwrap();
        assert_eq!(revealed.values, speed_only);
        assert!(!revealed.values.contains_key(&field("gps")));
    }

    // ── Authorization gate ───────────────────────────────────────────

    #[test]
    fn test_owner_only_gate() {
        let mut store = RecordStore::with_gate(MockVerifier, OwnerOnlyGate);
        let owner = principal("did:example:alice");
        let rid = id("v1");
        store
            .create(
                rid.clone(),
                plain_attrs(),
                vec![
                    encrypted_input(&rid, "speed", &owner, 0x11),
                    encrypted_input(&rid, "rpm", &owner, 0x22),
                ],
                owner.clone(),
            )
            .unwrap();

        let err = store
            .request_reveal(
                &rid,
                &principal("did:example:mallory"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized { .. }));

        // The owner gets through.
        store
            .request_reveal(&rid, &owner, claimed(), &valid_reveal_proof())
            .unwrap();
    }

    #[test]
    fn test_create_denied_by_gate() {
        struct NoCreate;
        impl AuthorizationGate for NoCreate {
            fn can_create(&self, _principal: &PrincipalId) -> bool {
                false
            }
        }

        let mut store = RecordStore::with_gate(MockVerifier, NoCreate);
        let err = store
            .create(id("v1"), vec![], vec![], principal("did:example:alice"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized { .. }));
        assert!(store.is_empty());
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn test_events_emitted_in_order() {
        let mut store = store_with_v1();
        store
            .request_reveal(
                &id("v1"),
                &principal("did:example:investigator"),
                claimed(),
                &valid_reveal_proof(),
            )
            .unwrap();

        let events = store.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].seq, 0);
        assert_eq!(
            events[0].event,
            StoreEvent::RecordCreated {
                id: id("v1"),
                owner: principal("did:example:alice"),
            }
        );
        assert_eq!(
            events[1].event,
            StoreEvent::DataRevealed {
                id: id("v1"),
                values: claimed(),
            }
        );
    }

    #[test]
    fn test_no_events_on_failed_operations() {
        let mut store = store_with_v1();
        let before = store.events().len();

        let _ = store.request_reveal(
            &id("v1"),
            &principal("did:example:investigator"),
            claimed(),
            &DecryptionProof(vec![0; 32]),
        );
        let _ = store.create(
            id("v1"),
            vec![],
            vec![],
            principal("did:example:bob"),
        );
        assert_eq!(store.events().len(), before);
    }
}
