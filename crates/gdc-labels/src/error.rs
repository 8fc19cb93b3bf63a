use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed object listing: {0}")]
    Listing(#[from] serde_json::Error),

    #[error("unknown subtype: {0}")]
    UnknownSubtype(String),
}

impl LabelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LabelError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, LabelError>;
