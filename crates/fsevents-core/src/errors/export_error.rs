//! Exporter errors.

use std::path::PathBuf;

use super::error_code::{self, FsEventsErrorCode};

/// Errors raised while staging data-source files on local disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Cannot create scratch directory {path}: {source}")]
    ScratchDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot export {file} to {path}: {source}")]
    Write {
        file: String,
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FsEventsErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ScratchDir { .. } => error_code::SCRATCH_DIR_FAILED,
            Self::Write { .. } => error_code::EXPORT_FAILED,
        }
    }
}
