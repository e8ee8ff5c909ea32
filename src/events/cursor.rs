use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Bits of the total-order id reserved for the transaction index
const TX_BITS: u32 = 20;
/// Bits of the total-order id reserved for the operation index
const OP_BITS: u32 = 12;
const TX_MASK: u64 = (1 << TX_BITS) - 1;
const OP_MASK: u64 = (1 << OP_BITS) - 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorParseError {
    #[error("invalid paging token {0:?}: expected <toid>-<event>")]
    Malformed(String),

    #[error("invalid toid in paging token: {0}")]
    InvalidToid(ParseIntError),

    #[error("invalid event index in paging token: {0}")]
    InvalidEvent(ParseIntError),

    #[error("paging token toid {0} does not point at a transaction boundary")]
    OperationNotSupported(u64),
}

/// Position of an event: (ledger, transaction index, event index)
///
/// Ordered lexicographically by field. Used both as a query bound and as the
/// position reported for every scanned event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
    pub ledger: u32,
    pub tx: u32,
    pub event: u32,
}

impl Cursor {
    pub const MIN: Cursor = Cursor::new(0, 0, 0);
    pub const MAX: Cursor = Cursor::new(u32::MAX, u32::MAX, u32::MAX);

    pub const fn new(ledger: u32, tx: u32, event: u32) -> Self {
        Self { ledger, tx, event }
    }

    /// First position of a ledger
    pub const fn ledger_start(ledger: u32) -> Self {
        Self::new(ledger, 0, 0)
    }

    /// Total-order id of the transaction this cursor points into
    ///
    /// Transaction indices wider than 20 bits saturate.
    pub fn toid(&self) -> u64 {
        let tx = u64::from(self.tx).min(TX_MASK);
        (u64::from(self.ledger) << 32) | (tx << OP_BITS)
    }
}

/// Paging token form: `{toid:019}-{event:010}`
impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:019}-{:010}", self.toid(), self.event)
    }
}

impl FromStr for Cursor {
    type Err = CursorParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (toid, event) = token
            .split_once('-')
            .ok_or_else(|| CursorParseError::Malformed(token.to_string()))?;

        let toid: u64 = toid.parse().map_err(CursorParseError::InvalidToid)?;
        let event: u32 = event.parse().map_err(CursorParseError::InvalidEvent)?;

        if toid & OP_MASK != 0 {
            return Err(CursorParseError::OperationNotSupported(toid));
        }

        Ok(Cursor {
            ledger: (toid >> 32) as u32,
            tx: ((toid >> OP_BITS) & TX_MASK) as u32,
            event,
        })
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
