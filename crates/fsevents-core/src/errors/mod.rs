//! Error handling for the ingest pipeline.
//! One error enum per subsystem, `thiserror` only.

pub mod catalog_error;
pub mod chain;
pub mod config_error;
pub mod context;
pub mod decode_error;
pub mod error_code;
pub mod evidence_error;
pub mod export_error;
pub mod ingest_error;
pub mod locate_error;
pub mod map_error;

pub use catalog_error::CatalogError;
pub use chain::{ChainedError, ErrorChain};
pub use config_error::ConfigError;
pub use context::ErrorContext;
pub use decode_error::DecodeError;
pub use error_code::FsEventsErrorCode;
pub use evidence_error::EvidenceError;
pub use export_error::ExportError;
pub use ingest_error::IngestError;
pub use locate_error::LocateError;
pub use map_error::MapError;
