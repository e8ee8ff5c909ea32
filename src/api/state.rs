use std::sync::Arc;

use crate::config::Config;
use crate::events::MemoryStore;
use crate::observability::StoreMetrics;

/// Handles shared by the HTTP handlers and by the external ingestion and
/// query collaborators
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MemoryStore>,
    pub metrics: Arc<StoreMetrics>,
}

impl AppState {
    pub fn new(store: Arc<MemoryStore>, metrics: Arc<StoreMetrics>) -> Self {
        Self { store, metrics }
    }

    /// Build the store described by `config.store` with in-process metrics
    pub fn from_config(config: &Config) -> crate::events::Result<Self> {
        let metrics = Arc::new(StoreMetrics::new(config.store.label.clone()));
        let store = Arc::new(MemoryStore::from_config(&config.store, metrics.clone())?);
        Ok(Self::new(store, metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_builds_store() {
        let config: Config = toml::from_str("[store]\nretention_window = 3\nlabel = \"state-tests\"\n").unwrap();
        let state = AppState::from_config(&config).unwrap();

        assert_eq!(state.store.label(), "state-tests");
        assert_eq!(state.store.retention_window(), 3);
        assert_eq!(state.metrics.label(), "state-tests");
    }
}
