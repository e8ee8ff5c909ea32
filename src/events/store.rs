use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::observability::{MetricsSink, Operation};
use crate::window::{LedgerBucket, LedgerBucketWindow};

use super::cursor::Cursor;
use super::error::{EventStoreError, Result};
use super::event::{Event, LedgerEvents, TxHash};
use super::range::Range;

/// Sequence and close time of a retained ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerInfo {
    pub sequence: u32,
    pub close_time: i64,
}

/// Oldest and newest ledgers currently retained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRange {
    pub first: LedgerInfo,
    pub last: LedgerInfo,
}

/// In-memory event history over the most recent ledgers
///
/// One ingestion path appends ledgers while any number of readers scan
/// concurrently. `append` holds the write lock for the mutation; `scan`
/// holds the read lock for the whole traversal, callbacks included, so each
/// scan sees a single snapshot of the window.
pub struct MemoryStore {
    label: String,
    events_by_ledger: RwLock<LedgerBucketWindow<LedgerEvents>>,
    metrics: Arc<dyn MetricsSink>,
}

impl MemoryStore {
    /// Create an empty store retaining `retention_window` ledgers
    pub fn new(
        label: impl Into<String>,
        retention_window: u32,
        metrics: Arc<dyn MetricsSink>,
    ) -> Result<Self> {
        let label = label.into();
        let window = LedgerBucketWindow::new(retention_window)?;
        info!(label = %label, retention_window, "Event store created");

        Ok(Self {
            label,
            events_by_ledger: RwLock::new(window),
            metrics,
        })
    }

    pub fn from_config(config: &StoreConfig, metrics: Arc<dyn MetricsSink>) -> Result<Self> {
        Self::new(config.label.clone(), config.retention_window, metrics)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn retention_window(&self) -> u32 {
        self.events_by_ledger.read().capacity()
    }

    /// Number of ledgers currently retained
    pub fn len(&self) -> usize {
        self.events_by_ledger.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events_by_ledger.read().is_empty()
    }

    /// Append the events of the next ledger
    ///
    /// `events` must be sorted by (tx_index, event_index) and `ledger_seq`
    /// must follow the newest retained ledger.
    pub fn append(&self, ledger_seq: u32, ledger_close_timestamp: i64, events: Vec<Event>) -> Result<()> {
        self.append_with_tx_hashes(ledger_seq, ledger_close_timestamp, events, BTreeMap::new())
    }

    /// Append the events of the next ledger along with the hashes of the
    /// transactions that emitted them, keyed by transaction index
    pub fn append_with_tx_hashes(
        &self,
        ledger_seq: u32,
        ledger_close_timestamp: i64,
        events: Vec<Event>,
        tx_hashes: BTreeMap<u32, TxHash>,
    ) -> Result<()> {
        let started = Instant::now();
        let content = LedgerEvents::with_tx_hashes(events, tx_hashes);
        let event_count = content.len();
        let bucket = LedgerBucket::new(ledger_seq, ledger_close_timestamp, content);

        let evicted = {
            let mut window = self.events_by_ledger.write();
            window.append(bucket)
        };

        match evicted {
            Ok(evicted) => {
                self.metrics.observe_duration(Operation::Ingest, started.elapsed());
                self.metrics.observe_event_count(event_count);
                debug!(
                    label = %self.label,
                    ledger = ledger_seq,
                    events = event_count,
                    evicted = ?evicted.map(|b| b.ledger_seq),
                    "Appended ledger"
                );
                Ok(())
            }
            Err(err) => {
                warn!(label = %self.label, ledger = ledger_seq, error = %err, "Rejected ledger");
                Err(err.into())
            }
        }
    }

    /// Newest retained ledger sequence
    pub fn latest_ledger(&self) -> Result<u32> {
        self.events_by_ledger
            .read()
            .newest_ledger()
            .ok_or(EventStoreError::EmptyStore)
    }

    /// Oldest and newest retained ledgers with their close times
    pub fn ledger_range(&self) -> Result<LedgerRange> {
        let window = self.events_by_ledger.read();
        match (window.oldest(), window.newest()) {
            (Some(first), Some(last)) => Ok(LedgerRange {
                first: ledger_info(first),
                last: ledger_info(last),
            }),
            _ => Err(EventStoreError::EmptyStore),
        }
    }

    /// Visit the events inside `range` in cursor order
    ///
    /// `on_event` receives the payload, the event's cursor, its ledger's
    /// close timestamp and the emitting transaction's hash when known.
    /// Returning `false` stops the scan immediately. The result is the
    /// newest ledger retained when the scan ran, whether or not it was cut
    /// short. Range errors are returned before any callback runs.
    pub fn scan<F>(&self, range: Range, mut on_event: F) -> Result<u32>
    where
        F: FnMut(&Bytes, Cursor, i64, Option<&TxHash>) -> bool,
    {
        let started = Instant::now();
        let window = self.events_by_ledger.read();

        let bounds = window.oldest_ledger().zip(window.newest_ledger());
        let range = range.validate(bounds)?;
        let latest = window.newest_ledger().ok_or(EventStoreError::EmptyStore)?;

        let emitted = scan_window(&window, &range, &mut on_event);
        drop(window);

        self.metrics.observe_duration(Operation::Scan, started.elapsed());
        debug!(
            label = %self.label,
            start = ?range.start,
            end = ?range.end,
            emitted,
            latest,
            "Scan completed"
        );

        Ok(latest)
    }
}

fn ledger_info(bucket: &LedgerBucket<LedgerEvents>) -> LedgerInfo {
    LedgerInfo {
        sequence: bucket.ledger_seq,
        close_time: bucket.ledger_close_timestamp,
    }
}

/// Walk a validated range bucket by bucket, returning how many events were
/// handed to the callback
fn scan_window<F>(window: &LedgerBucketWindow<LedgerEvents>, range: &Range, on_event: &mut F) -> usize
where
    F: FnMut(&Bytes, Cursor, i64, Option<&TxHash>) -> bool,
{
    let start = range.start;
    let end = range.end;
    let mut emitted = 0;

    for bucket in window.iter_from(start.ledger) {
        if Cursor::ledger_start(bucket.ledger_seq) >= end {
            break;
        }

        let events = bucket.content.events();
        let first = if bucket.ledger_seq == start.ledger {
            events.partition_point(|e| e.position() < (start.tx, start.event))
        } else {
            0
        };

        for event in &events[first..] {
            let cursor = Cursor::new(bucket.ledger_seq, event.tx_index, event.event_index);
            if cursor >= end {
                return emitted;
            }

            let tx_hash = bucket.content.tx_hash(event.tx_index);
            if !on_event(&event.payload, cursor, bucket.ledger_close_timestamp, tx_hash) {
                return emitted + 1;
            }
            emitted += 1;
        }
    }

    emitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{NoopMetrics, StoreMetrics};

    fn payload(value: u32) -> Vec<u8> {
        value.to_be_bytes().to_vec()
    }

    fn create_test_store(capacity: u32) -> MemoryStore {
        MemoryStore::new("unit-tests", capacity, Arc::new(NoopMetrics)).unwrap()
    }

    fn collect(store: &MemoryStore, range: Range) -> Result<(u32, Vec<Cursor>)> {
        let mut cursors = Vec::new();
        let latest = store.scan(range, |_, cursor, _, _| {
            cursors.push(cursor);
            true
        })?;
        Ok((latest, cursors))
    }

    #[test]
    fn test_zero_retention_rejected() {
        let result = MemoryStore::new("unit-tests", 0, Arc::new(NoopMetrics));
        assert!(matches!(result, Err(EventStoreError::Window(_))));
    }

    #[test]
    fn test_empty_store() {
        let store = create_test_store(4);
        assert!(store.is_empty());
        assert_eq!(store.latest_ledger(), Err(EventStoreError::EmptyStore));
        assert_eq!(store.ledger_range(), Err(EventStoreError::EmptyStore));
        assert_eq!(
            store.scan(Range::all(), |_, _, _, _| panic!("unexpected call")),
            Err(EventStoreError::EmptyStore)
        );
    }

    #[test]
    fn test_append_and_latest() {
        let store = create_test_store(4);
        store.append(10, 1000, vec![Event::new(1, 0, payload(1))]).unwrap();
        store.append(11, 1005, Vec::new()).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.latest_ledger(), Ok(11));
        assert_eq!(
            store.ledger_range(),
            Ok(LedgerRange {
                first: LedgerInfo { sequence: 10, close_time: 1000 },
                last: LedgerInfo { sequence: 11, close_time: 1005 },
            })
        );
    }

    #[test]
    fn test_non_contiguous_append_rejected() {
        let store = create_test_store(4);
        store.append(10, 1000, Vec::new()).unwrap();

        let result = store.append(12, 1010, Vec::new());
        assert!(matches!(result, Err(EventStoreError::Window(_))));
        assert_eq!(store.latest_ledger(), Ok(10));
    }

    #[test]
    fn test_tx_hash_passed_to_callback() {
        let store = create_test_store(2);
        let hash = TxHash([7; 32]);
        store
            .append_with_tx_hashes(
                3,
                30,
                vec![Event::new(1, 0, payload(1)), Event::new(2, 0, payload(2))],
                BTreeMap::from([(2, hash)]),
            )
            .unwrap();

        let mut seen = Vec::new();
        store
            .scan(Range::all(), |_, cursor, _, tx_hash| {
                seen.push((cursor.tx, tx_hash.copied()));
                true
            })
            .unwrap();

        assert_eq!(seen, vec![(1, None), (2, Some(hash))]);
    }

    #[test]
    fn test_scan_spans_eviction() {
        let store = create_test_store(2);
        for seq in 1..=5 {
            store.append(seq, i64::from(seq), vec![Event::new(1, 0, payload(seq))]).unwrap();
        }

        let (latest, cursors) = collect(&store, Range::all()).unwrap();
        assert_eq!(latest, 5);
        assert_eq!(cursors, vec![Cursor::new(4, 1, 0), Cursor::new(5, 1, 0)]);

        let evicted = Range::new(Cursor::ledger_start(3), Cursor::ledger_start(6));
        assert_eq!(collect(&store, evicted), Err(EventStoreError::StartBeforeOldest));
        let (_, cursors) = collect(&store, evicted.clamped(true, false)).unwrap();
        assert_eq!(cursors.len(), 2);
    }

    #[test]
    fn test_end_inside_ledger_is_exclusive() {
        let store = create_test_store(2);
        store
            .append(
                1,
                10,
                vec![
                    Event::new(1, 0, payload(1)),
                    Event::new(1, 1, payload(2)),
                    Event::new(2, 0, payload(3)),
                ],
            )
            .unwrap();

        let range = Range::new(Cursor::new(1, 1, 0), Cursor::new(1, 2, 0));
        let (_, cursors) = collect(&store, range).unwrap();
        assert_eq!(cursors, vec![Cursor::new(1, 1, 0), Cursor::new(1, 1, 1)]);

        // Start landing on an event includes it, end landing on one excludes it
        let range = Range::new(Cursor::new(1, 1, 1), Cursor::new(1, 2, 0));
        let (_, cursors) = collect(&store, range).unwrap();
        assert_eq!(cursors, vec![Cursor::new(1, 1, 1)]);
    }

    #[test]
    fn test_scan_metrics_only_on_success() {
        let metrics = Arc::new(StoreMetrics::new("unit-tests"));
        let store = MemoryStore::new("unit-tests", 2, metrics.clone()).unwrap();

        let _ = store.scan(Range::all(), |_, _, _, _| true);
        assert_eq!(metrics.snapshot().scan_count, 0);

        store.append(1, 10, vec![Event::new(1, 0, payload(1))]).unwrap();
        store.scan(Range::all(), |_, _, _, _| true).unwrap();
        store.scan(Range::all(), |_, _, _, _| false).unwrap();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.scan_count, 2);
        assert_eq!(snapshot.ingest_count, 1);
        assert_eq!(snapshot.events_ingested, 1);
    }

    #[test]
    fn test_from_config() {
        let config = StoreConfig {
            retention_window: 3,
            label: "configured".to_string(),
        };
        let store = MemoryStore::from_config(&config, Arc::new(NoopMetrics)).unwrap();
        assert_eq!(store.label(), "configured");
        assert_eq!(store.retention_window(), 3);
    }
}
