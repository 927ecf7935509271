//! Event payload types.

use serde::{Deserialize, Serialize};

use crate::types::IngestStatus;

/// Payload for `on_ingest_started`.
#[derive(Debug, Clone)]
pub struct IngestStartedEvent {
    pub run_id: String,
    pub data_source: String,
    pub file_count: usize,
}

/// Payload for `on_file_exported`.
#[derive(Debug, Clone)]
pub struct FileExportedEvent {
    pub name: String,
    pub processed: usize,
    pub total: usize,
}

/// Payload for `on_module_data`: new artifacts of one type are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDataEvent {
    pub module_name: String,
    pub artifact_type: String,
    pub record_count: usize,
}

/// Severity of an inbox message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    Data,
    Info,
    Warning,
    Error,
}

/// Payload for `on_ingest_message`: a message for the investigator's inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestMessage {
    pub kind: MessageKind,
    pub module_name: String,
    pub subject: String,
    pub detail: Option<String>,
}

impl IngestMessage {
    pub fn new(kind: MessageKind, module_name: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            kind,
            module_name: module_name.into(),
            subject: subject.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Payload for `on_ingest_complete`.
#[derive(Debug, Clone)]
pub struct IngestCompleteEvent {
    pub run_id: String,
    pub status: IngestStatus,
    pub records: usize,
    pub duration_ms: u64,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
