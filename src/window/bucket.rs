use std::collections::VecDeque;

use super::error::{Result, WindowError};

/// A single ledger's worth of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerBucket<T> {
    pub ledger_seq: u32,
    /// Close time of the ledger, unix seconds
    pub ledger_close_timestamp: i64,
    pub content: T,
}

impl<T> LedgerBucket<T> {
    pub fn new(ledger_seq: u32, ledger_close_timestamp: i64, content: T) -> Self {
        Self {
            ledger_seq,
            ledger_close_timestamp,
            content,
        }
    }
}

/// Fixed-capacity ring of contiguous ledger buckets
///
/// Invariant: bucket `i + 1` holds ledger `seq(i) + 1`.
#[derive(Debug, Clone)]
pub struct LedgerBucketWindow<T> {
    buckets: VecDeque<LedgerBucket<T>>,
    capacity: u32,
}

impl<T> LedgerBucketWindow<T> {
    /// Create an empty window retaining at most `capacity` ledgers
    pub fn new(capacity: u32) -> Result<Self> {
        if capacity == 0 {
            return Err(WindowError::ZeroCapacity);
        }

        Ok(Self {
            buckets: VecDeque::new(),
            capacity,
        })
    }

    /// Append a bucket at the tail, returning the evicted head on overflow
    ///
    /// The first bucket may carry any sequence; every later one must be
    /// exactly one past the current newest ledger. A rejected bucket leaves
    /// the window unchanged.
    pub fn append(&mut self, bucket: LedgerBucket<T>) -> Result<Option<LedgerBucket<T>>> {
        if let Some(newest) = self.newest_ledger() {
            if newest.checked_add(1) != Some(bucket.ledger_seq) {
                return Err(WindowError::NonContiguous {
                    newest,
                    received: bucket.ledger_seq,
                });
            }
        }

        self.buckets.push_back(bucket);

        if self.buckets.len() > self.capacity as usize {
            return Ok(self.buckets.pop_front());
        }

        Ok(None)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn oldest(&self) -> Option<&LedgerBucket<T>> {
        self.buckets.front()
    }

    pub fn newest(&self) -> Option<&LedgerBucket<T>> {
        self.buckets.back()
    }

    pub fn oldest_ledger(&self) -> Option<u32> {
        self.oldest().map(|bucket| bucket.ledger_seq)
    }

    pub fn newest_ledger(&self) -> Option<u32> {
        self.newest().map(|bucket| bucket.ledger_seq)
    }

    /// Positional access, 0 being the oldest retained ledger
    pub fn get(&self, index: usize) -> Option<&LedgerBucket<T>> {
        self.buckets.get(index)
    }

    /// Look up the bucket holding ledger `seq` in O(1)
    pub fn bucket_at(&self, seq: u32) -> Option<&LedgerBucket<T>> {
        let offset = self.offset_of(seq)?;
        self.buckets.get(offset)
    }

    /// Iterate all retained buckets, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &LedgerBucket<T>> {
        self.buckets.iter()
    }

    /// Iterate buckets starting at ledger `seq` (inclusive), oldest first
    ///
    /// Yields nothing when `seq` is outside the window.
    pub fn iter_from(&self, seq: u32) -> impl Iterator<Item = &LedgerBucket<T>> {
        let start = self.offset_of(seq).unwrap_or(self.buckets.len());
        self.buckets.range(start..)
    }

    fn offset_of(&self, seq: u32) -> Option<usize> {
        let oldest = self.oldest_ledger()?;
        let offset = seq.checked_sub(oldest)? as usize;
        (offset < self.buckets.len()).then_some(offset)
    }
}
