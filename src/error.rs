//! Error type shared by the cost loaders, scenario validation and the engine

use thiserror::Error;

/// Errors produced while loading reference data or evaluating a scenario
#[derive(Debug, Error)]
pub enum Error {
    /// Inputs that would make a price or break-even figure undefined
    /// (non-positive divisor, non-positive sell price, missing margin)
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown bag size: {0}")]
    UnknownBagSize(String),

    #[error("run size {run_size} is not offered for bag size {bag_size}")]
    UnknownRunSize { bag_size: String, run_size: u32 },

    #[error("unsupported campaign duration: {0} month(s), expected 1, 3 or 6")]
    UnsupportedDuration(u32),

    /// A malformed row in a cost table or scenario file
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Decimal(#[from] rust_decimal::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }
}
