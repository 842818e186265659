use std::io;
use std::time::Duration;

use thiserror::Error;

/// The content provider could not supply words. Never reaches callers of the sourcing pipeline.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("content provider timed out after {0:?}")]
    Timeout(Duration),
    #[error("content provider quota exhausted: {0}")]
    Quota(String),
    #[error("malformed content provider response: {0}")]
    Malformed(String),
    #[error("content provider unavailable: {0}")]
    Unavailable(String),
    #[error("error communicating with content provider")]
    Transport(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("error accessing word store")]
    Io(#[from] io::Error),
    #[error("corrupt word store data")]
    Json(#[from] serde_json::Error),
    #[error("error saving word store")]
    Persist(#[from] tempfile::PersistError),
}
