use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("retention window must hold at least one ledger")]
    ZeroCapacity,

    #[error("ledgers not contiguous: expected ledger sequence after {newest} but received {received}")]
    NonContiguous { newest: u32, received: u32 },
}

pub type Result<T> = std::result::Result<T, WindowError>;
