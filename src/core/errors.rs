use std::result::Result as StdResult;

use thiserror::Error;

use super::input::InputError;

/// Unified error type for core, storage and configuration layers.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("State not loaded")]
    NotLoaded,
    #[error("State already loaded")]
    AlreadyLoaded,
}

pub type Result<T> = StdResult<T, TrackerError>;

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serde(err.to_string())
    }
}
