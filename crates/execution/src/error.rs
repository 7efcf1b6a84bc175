// In crates/execution/src/error.rs

use thiserror::Error;

/// Failures that leave the outcome of a submission unknown.
///
/// A definite "no" from the venue is not an error: it is an `OrderAck` with
/// `accepted == false`.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Execution failed: {reason}")]
    ExecutionFailed { reason: String },

    #[error("API client error: {0}")]
    ApiClientError(#[from] api_client::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
