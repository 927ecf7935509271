//! Decoder invocation errors.
//!
//! These are process-level failures only. An output file that exists but is
//! not a usable database is reported later as `MapError::DatabaseOpen`.

use std::path::PathBuf;

use super::error_code::{self, FsEventsErrorCode};

/// Errors raised by a `Decoder` implementation.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Decoder executable not found: {path}")]
    ExecutableNotFound { path: PathBuf },

    #[error("Failed to run decoder {path}: {source}")]
    Spawn {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Decoder exited with {status} and wrote no output at {output}")]
    ProcessFailed { status: String, output: PathBuf },
}

impl FsEventsErrorCode for DecodeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ExecutableNotFound { .. } => error_code::EXECUTABLE_NOT_FOUND,
            _ => error_code::DECODE_FAILED,
        }
    }
}
