//! Top-level ingest error aggregating every subsystem.

use super::error_code::FsEventsErrorCode;
use super::{
    CatalogError, ConfigError, DecodeError, EvidenceError, ExportError, LocateError, MapError,
};

/// Errors that can occur during an ingest run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Locate error: {0}")]
    Locate(#[from] LocateError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Mapping error: {0}")]
    Map(#[from] MapError),

    #[error("Evidence error: {0}")]
    Evidence(#[from] EvidenceError),
}

impl FsEventsErrorCode for IngestError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Locate(e) => e.error_code(),
            Self::Export(e) => e.error_code(),
            Self::Decode(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Map(e) => e.error_code(),
            Self::Evidence(e) => e.error_code(),
        }
    }
}
