//! File locator errors.

use std::path::PathBuf;

use super::error_code::{self, FsEventsErrorCode};

/// Errors raised while enumerating a data source.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Data source root not readable: {root}")]
    RootUnreadable { root: PathBuf },

    #[error("Data source enumeration failed: {message}")]
    Enumeration { message: String },
}

impl FsEventsErrorCode for LocateError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPattern { .. } => error_code::INVALID_PATTERN,
            _ => error_code::LOCATE_ERROR,
        }
    }
}
