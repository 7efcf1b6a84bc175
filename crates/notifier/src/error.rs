// In crates/notifier/src/error.rs

use thiserror::Error;

/// Delivery failures. These never leave a `Notifier`; they are logged.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to build the notification client: {0}")]
    ClientBuildError(String),

    #[error("Notification request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Notification rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, Error>;
