use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use super::{models::StatusResponse, state::AppState};

/// Liveness probe (GET /health)
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Retention window and instrumentation summary (GET /status)
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let metrics = state.metrics.snapshot();

    Json(StatusResponse {
        label: state.store.label().to_string(),
        retention_window: state.store.retention_window(),
        retained_ledgers: state.store.len(),
        ledgers: state.store.ledger_range().ok(),
        scans: metrics.scan_count,
        events_ingested: metrics.events_ingested,
    })
}
