use serde::{Deserialize, Serialize};

use crate::events::LedgerRange;

/// Response body of `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub label: String,
    pub retention_window: u32,
    pub retained_ledgers: usize,
    /// Absent while no ledger has been ingested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledgers: Option<LedgerRange>,
    pub scans: u64,
    pub events_ingested: u64,
}
