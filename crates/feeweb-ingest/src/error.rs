//! Error types for feeweb-ingest

use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Malformed record at row {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("IO error")]
    IoError(#[from] io::Error),

    #[error("Internal error")]
    InternalError,
}
