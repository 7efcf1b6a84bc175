// In crates/risk/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid risk parameters: {0}")]
    InvalidParameters(String),

    #[error("Cannot derive protective levels: {0}")]
    InvalidLevels(String),
}

pub type Result<T> = std::result::Result<T, Error>;
