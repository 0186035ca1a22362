//! Raw record ingestion for feeweb
//!
//! Reads seed files and bulk upload payloads into wire-shape rows
//! (`RawBatch`). Normalization into domain records happens in
//! feeweb-core; file- and payload-level failures surface here as
//! `IngestError`.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod types;

pub use error::IngestError;

// Re-export commonly used types
pub use types::{
    parse_timestamp, value_to_decimal, value_to_u8, RawBatch, RawDemandRow, RawFeeHeadRow,
    RawStudentRow, RawTransactionRow,
};

// ==================== Source Trait ====================

/// Source reference type
pub type SourceRef = Arc<dyn RecordSource>;

/// Trait for record sources
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Read a raw batch from payload content
    async fn read(&self, content: &str) -> Result<RawBatch, IngestError>;

    /// Read a raw batch from a file path
    async fn read_file(&self, path: PathBuf) -> Result<RawBatch, IngestError>;
}

/// Default JSON source implementation
#[derive(Debug, Default)]
pub struct JsonRecordSource;

#[async_trait]
impl RecordSource for JsonRecordSource {
    async fn read(&self, content: &str) -> Result<RawBatch, IngestError> {
        serde_json::from_str(content).map_err(|e| IngestError::InvalidFormat {
            message: e.to_string(),
        })
    }

    async fn read_file(&self, path: PathBuf) -> Result<RawBatch, IngestError> {
        let content = tokio::fs::read_to_string(&path).await?;
        self.read(&content).await
    }
}

// ==================== Tests ====================
