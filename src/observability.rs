//! Instrumentation sink and tracing setup

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Logical operation a duration observation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ingest,
    Scan,
}

impl Operation {
    /// Label value exported to metrics registries
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Ingest => "ingest",
            Operation::Scan => "scan",
        }
    }
}

/// Receiver of store instrumentation
///
/// The store only reports observations; registering and exporting them is
/// up to the implementation.
pub trait MetricsSink: Send + Sync {
    fn observe_duration(&self, operation: Operation, elapsed: Duration);

    /// Number of events carried by one ingested ledger
    fn observe_event_count(&self, _count: usize) {}
}

/// Sink that discards every observation
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn observe_duration(&self, _operation: Operation, _elapsed: Duration) {}
}

/// Running sample count and sum, the two values of a summary metric
#[derive(Debug, Default)]
struct DurationSummary {
    count: AtomicU64,
    total_nanos: AtomicU64,
}

impl DurationSummary {
    fn observe(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.total_nanos.fetch_add(nanos, Ordering::Relaxed);
    }

    fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn seconds(&self) -> f64 {
        self.total_nanos.load(Ordering::Relaxed) as f64 / 1e9
    }
}

/// In-process metrics for one labelled store
#[derive(Debug, Default)]
pub struct StoreMetrics {
    label: String,
    ingest: DurationSummary,
    scan: DurationSummary,
    events_ingested: AtomicU64,
}

impl StoreMetrics {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn summary(&self, operation: Operation) -> &DurationSummary {
        match operation {
            Operation::Ingest => &self.ingest,
            Operation::Scan => &self.scan,
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            ingest_count: self.ingest.count(),
            ingest_seconds: self.ingest.seconds(),
            scan_count: self.scan.count(),
            scan_seconds: self.scan.seconds(),
            events_ingested: self.events_ingested.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSink for StoreMetrics {
    fn observe_duration(&self, operation: Operation, elapsed: Duration) {
        self.summary(operation).observe(elapsed);
        tracing::trace!(
            store = %self.label,
            operation = operation.as_str(),
            elapsed_us = elapsed.as_micros() as u64,
            "Duration observed"
        );
    }

    fn observe_event_count(&self, count: usize) {
        self.events_ingested.fetch_add(count as u64, Ordering::Relaxed);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub ingest_count: u64,
    pub ingest_seconds: f64,
    pub scan_count: u64,
    pub scan_seconds: f64,
    pub events_ingested: u64,
}

/// Install the global fmt subscriber
///
/// `RUST_LOG` wins over `default_filter` when set. Repeated calls are
/// ignored.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
