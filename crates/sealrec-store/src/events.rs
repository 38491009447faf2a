//! # Observable Events
//!
//! Append-only notification points for external observers, decoupled from
//! storage mutation so tests (and embedding applications) can assert on
//! emissions independently of state. The log only ever grows; entries
//! carry a monotonic sequence number and emission timestamp.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sealrec_core::{FieldName, PrincipalId, RecordId, Timestamp};

/// An observable store event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A record was created and appended to the index.
    RecordCreated {
        /// The new record's id.
        id: RecordId,
        /// The creating principal.
        owner: PrincipalId,
    },
    /// A record's encrypted fields were revealed.
    DataRevealed {
        /// The revealed record's id.
        id: RecordId,
        /// The committed cleartext values.
        values: BTreeMap<FieldName, i64>,
    },
}

/// A logged event with its position and emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Monotonic position in the log, starting at 0.
    pub seq: u64,
    /// When the event was emitted.
    pub at: Timestamp,
    /// The event payload.
    pub event: StoreEvent,
}

/// The append-only event log owned by a store.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct EventLog {
    entries: Vec<EventRecord>,
}

impl EventLog {
    /// Append an event, assigning the next sequence number.
    pub(crate) fn emit(&mut self, event: StoreEvent) {
        self.entries.push(EventRecord {
            seq: self.entries.len() as u64,
            at: Timestamp::now(),
            event,
        });
    }

    /// All emitted events, oldest first.
    pub(crate) fn entries(&self) -> &[EventRecord] {
        &self.entries
    }
}
