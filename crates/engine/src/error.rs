// In crates/engine/src/error.rs

use thiserror::Error;

/// Why a single decision cycle ended early.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Market data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Insufficient data: need at least {required} klines, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Market data request failed: {0}")]
    MarketData(api_client::Error),

    #[error("Indicator error: {0}")]
    Indicator(strategies::Error),

    #[error("Risk error: {0}")]
    Risk(#[from] risk::Error),

    #[error("Execution error: {0}")]
    Execution(#[from] execution::Error),
}

impl Error {
    /// Missing or short data that the next cycle may well resolve on its own.
    pub fn is_data_gap(&self) -> bool {
        matches!(self, Error::DataUnavailable(_) | Error::InsufficientData { .. })
    }
}

impl From<api_client::Error> for Error {
    fn from(e: api_client::Error) -> Self {
        match e {
            api_client::Error::DataUnavailable(msg) => Error::DataUnavailable(msg),
            other => Error::MarketData(other),
        }
    }
}

impl From<strategies::Error> for Error {
    fn from(e: strategies::Error) -> Self {
        match e {
            strategies::Error::InsufficientData { required, actual } => {
                Error::InsufficientData { required, actual }
            }
            other => Error::Indicator(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
