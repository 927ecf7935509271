//! Parameterized reads and writes against the evidence database.

pub mod artifact_types;
pub mod artifacts;
pub mod attribute_types;
pub mod summary;

fn storage_err(e: rusqlite::Error) -> fsevents_core::errors::EvidenceError {
    fsevents_core::errors::EvidenceError::Storage {
        message: e.to_string(),
    }
}
