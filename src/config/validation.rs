use super::models::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Retention window must hold at least one ledger")]
    ZeroRetentionWindow,

    #[error("Store label must not be empty")]
    EmptyStoreLabel,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_store(config)?;
    Ok(())
}

fn validate_store(config: &Config) -> Result<(), ValidationError> {
    if config.store.retention_window == 0 {
        return Err(ValidationError::ZeroRetentionWindow);
    }

    if config.store.label.trim().is_empty() {
        return Err(ValidationError::EmptyStoreLabel);
    }

    Ok(())
}
