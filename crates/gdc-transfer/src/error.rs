//! Error types for gdc-transfer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("remote resource not found: {url}")]
    NotFound { url: String },

    #[error("server ignored range request at offset {offset} (status {status})")]
    RangeNotSupported { offset: u64, status: u16 },

    #[error("server returned range starting at {received}, requested {requested}")]
    RangeMismatch { requested: u64, received: u64 },

    #[error("unexpected HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("transfer would grow file to {actual} bytes, resource has {limit}")]
    SizeExceeded { limit: u64, actual: u64 },

    #[error("transfer cancelled")]
    Cancelled,
}

impl TransferError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TransferError::Filesystem { path: path.into(), source }
    }

    /// Returns `true` if a fresh `plan` + `execute` pair may make progress.
    ///
    /// Interrupted transfers and 5xx replies qualify. A missing resource or a
    /// server that ignores ranges will fail the same way again.
    #[must_use]
    pub fn is_resumable(&self) -> bool {
        match self {
            TransferError::Transport(_) | TransferError::Cancelled => true,
            TransferError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransferError>;
