//! Record mapper errors.

use super::error_code::{self, FsEventsErrorCode};
use super::EvidenceError;

/// Errors raised while mapping decoded rows into evidence records.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Could not open database file (not SQLite) {path}: {message}")]
    DatabaseOpen { path: String, message: String },

    #[error("Evidence type '{name}' is not registered")]
    TypeNotRegistered { name: String },

    #[error("Attribute type '{name}' is not registered")]
    AttributeNotRegistered { name: String },

    #[error("Query for '{entry}' on {file} failed: {message}")]
    Query {
        entry: String,
        file: String,
        message: String,
    },

    #[error("Evidence error: {0}")]
    Evidence(#[from] EvidenceError),
}

impl FsEventsErrorCode for MapError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::DatabaseOpen { .. } => error_code::DB_OPEN_FAILED,
            Self::TypeNotRegistered { .. } | Self::AttributeNotRegistered { .. } => {
                error_code::TYPE_NOT_REGISTERED
            }
            Self::Query { .. } => error_code::QUERY_FAILED,
            Self::Evidence(e) => e.error_code(),
        }
    }
}
