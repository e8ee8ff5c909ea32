//! Transient per-ledger event history with cursor-addressed range scans
//!
//! [`MemoryStore`] keeps the events of the most recent ledgers in a
//! [`LedgerBucketWindow`](crate::window::LedgerBucketWindow) and serves
//! ordered scans over `[start, end)` cursor ranges. Nothing is persisted;
//! the history is lost on restart.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use eventbox::events::{Cursor, Event, MemoryStore, Range};
//! use eventbox::observability::NoopMetrics;
//!
//! let store = MemoryStore::new("events", 16, Arc::new(NoopMetrics)).unwrap();
//! store.append(5, 1_700_000_000, vec![Event::new(1, 0, &b"payload"[..])]).unwrap();
//!
//! let mut seen = Vec::new();
//! let latest = store
//!     .scan(Range::all(), |_payload, cursor, _close_time, _tx_hash| {
//!         seen.push(cursor);
//!         true
//!     })
//!     .unwrap();
//!
//! assert_eq!(latest, 5);
//! assert_eq!(seen, vec![Cursor::new(5, 1, 0)]);
//! ```

pub mod cursor;
pub mod error;
pub mod event;
pub mod range;
pub mod store;

pub use cursor::{Cursor, CursorParseError};
pub use error::{EventStoreError, Result};
pub use event::{Event, LedgerEvents, TxHash};
pub use range::Range;
pub use store::{LedgerInfo, LedgerRange, MemoryStore};
