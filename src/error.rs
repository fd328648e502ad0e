//! Error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, downloading or extracting the engine.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to read the Flutter engine version: {reason}")]
    VersionNotFound { reason: String },

    #[error("cannot determine target: {0}")]
    UnknownTarget(String),

    #[error("failed to download the Flutter engine from {url} (status {status})")]
    Download { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("cannot extract {}: {message}", .path.display())]
    Archive { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    pub(crate) fn version_not_found(reason: impl Into<String>) -> Self {
        Self::VersionNotFound {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
