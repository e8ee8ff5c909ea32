//! Bounded, contiguous history of per-ledger buckets
//!
//! The window keeps the most recent `capacity` ledgers in ascending
//! sequence order with no gaps. Appending a ledger past the capacity evicts
//! the oldest one (strict FIFO by sequence, not an LRU).
//!
//! The window is generic over the bucket payload so the same eviction and
//! indexing logic serves any per-ledger history (events, transactions, ...).
//!
//! ## Usage
//!
//! ```rust
//! use eventbox::window::{LedgerBucket, LedgerBucketWindow};
//!
//! let mut window = LedgerBucketWindow::new(2).unwrap();
//! window.append(LedgerBucket::new(10, 1_700_000_000, "a")).unwrap();
//! window.append(LedgerBucket::new(11, 1_700_000_005, "b")).unwrap();
//! let evicted = window.append(LedgerBucket::new(12, 1_700_000_010, "c")).unwrap();
//!
//! assert_eq!(evicted.map(|b| b.ledger_seq), Some(10));
//! assert_eq!(window.oldest_ledger(), Some(11));
//! ```

pub mod bucket;
pub mod error;

pub use bucket::{LedgerBucket, LedgerBucketWindow};
pub use error::{Result, WindowError};
