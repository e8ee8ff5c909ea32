use thiserror::Error;

use crate::window::WindowError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventStoreError {
    #[error("event store is empty")]
    EmptyStore,

    #[error("start is before oldest ledger")]
    StartBeforeOldest,

    #[error("start is after newest ledger")]
    StartAfterNewest,

    #[error("end is after latest ledger")]
    EndAfterLatest,

    #[error("start is not before end")]
    InvalidRange,

    #[error(transparent)]
    Window(#[from] WindowError),
}

pub type Result<T> = std::result::Result<T, EventStoreError>;
