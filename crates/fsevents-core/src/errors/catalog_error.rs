//! Catalog database errors.

use super::error_code::{self, FsEventsErrorCode};

/// Errors raised while opening or reading the catalog database.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Cannot open catalog {path}: {message}")]
    Open { path: String, message: String },

    #[error("Catalog query failed: {message}")]
    Query { message: String },

    #[error("Catalog entry {row} is missing a value for {column}")]
    MissingValue { row: usize, column: &'static str },
}

impl FsEventsErrorCode for CatalogError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Open { .. } => error_code::DB_OPEN_FAILED,
            _ => error_code::CATALOG_ERROR,
        }
    }
}
