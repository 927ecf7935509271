//! Evidence store errors.

use super::error_code::{self, FsEventsErrorCode};

/// Errors raised by an `EvidenceStore`.
///
/// "Already exists" is deliberately absent: registration reports it through
/// `Registration::AlreadyExists`.
#[derive(Debug, thiserror::Error)]
pub enum EvidenceError {
    #[error("Evidence storage error: {message}")]
    Storage { message: String },

    #[error("Evidence schema migration to v{version} failed: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("Unknown artifact type id {id}")]
    UnknownArtifactType { id: i64 },

    #[error("Unknown artifact id {id}")]
    UnknownArtifact { id: i64 },

    #[error("Unknown attribute type id {id}")]
    UnknownAttributeType { id: i64 },
}

impl FsEventsErrorCode for EvidenceError {
    fn error_code(&self) -> &'static str {
        error_code::EVIDENCE_ERROR
    }
}
