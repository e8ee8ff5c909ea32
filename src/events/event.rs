use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;

/// Hash of the transaction that emitted an event
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TxHash(pub [u8; 32]);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self)
    }
}

/// A single serialized event and its position inside its ledger
///
/// The payload is opaque to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub payload: Bytes,
    pub tx_index: u32,
    pub event_index: u32,
}

impl Event {
    pub fn new(tx_index: u32, event_index: u32, payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            tx_index,
            event_index,
        }
    }

    pub(crate) fn position(&self) -> (u32, u32) {
        (self.tx_index, self.event_index)
    }
}

/// Content of one ledger bucket: its events plus the transaction hashes
/// they refer to, keyed by transaction index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerEvents {
    events: Vec<Event>,
    tx_hashes: BTreeMap<u32, TxHash>,
}

impl LedgerEvents {
    /// Events must already be sorted by (tx_index, event_index)
    pub fn new(events: Vec<Event>) -> Self {
        Self::with_tx_hashes(events, BTreeMap::new())
    }

    pub fn with_tx_hashes(events: Vec<Event>, tx_hashes: BTreeMap<u32, TxHash>) -> Self {
        debug_assert!(
            events.windows(2).all(|w| w[0].position() < w[1].position()),
            "ledger events must be strictly ordered by (tx_index, event_index)"
        );
        Self { events, tx_hashes }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn tx_hash(&self, tx_index: u32) -> Option<&TxHash> {
        self.tx_hashes.get(&tx_index)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
