//! Error chain for the non-fatal failures of one ingest run.
//!
//! Per-file export failures and per-(file, catalog entry) query failures are
//! recorded here instead of aborting the run.

use super::context::ErrorContext;
use super::error_code::FsEventsErrorCode;
use super::IngestError;
use crate::types::report::ReportedError;

/// A single recorded failure.
#[derive(Debug)]
pub struct ChainedError {
    pub error: IngestError,
    pub context: Option<ErrorContext>,
}

/// Accumulates non-fatal errors from one run.
#[derive(Debug, Default)]
pub struct ErrorChain {
    errors: Vec<ChainedError>,
}

impl ErrorChain {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record an error without context.
    pub fn push(&mut self, error: impl Into<IngestError>) {
        self.errors.push(ChainedError {
            error: error.into(),
            context: None,
        });
    }

    /// Record an error with context.
    pub fn push_with_context(&mut self, error: impl Into<IngestError>, context: ErrorContext) {
        self.errors.push(ChainedError {
            error: error.into(),
            context: Some(context),
        });
    }

    /// Move every error of `other` to the end of this chain.
    pub fn extend(&mut self, other: ErrorChain) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainedError> {
        self.errors.iter()
    }

    /// Number of recorded errors carrying the given error code.
    pub fn count_code(&self, code: &str) -> usize {
        self.errors
            .iter()
            .filter(|e| e.error.error_code() == code)
            .count()
    }

    /// Flatten into serializable report entries.
    pub fn to_reported(&self) -> Vec<ReportedError> {
        self.errors
            .iter()
            .map(|e| ReportedError {
                code: e.error.error_code().to_string(),
                message: e.error.to_string(),
                context: e.context.as_ref().map(|c| c.to_string()),
            })
            .collect()
    }
}
