//! Summary of one ingest run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an ingest run ended. None of these is a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStatus {
    /// Every stage ran.
    Completed,
    /// The decoder output could not be opened as a database.
    NoFindings,
    /// The job was cancelled during export or mapping. Records mapped before
    /// the cancellation stay in the store.
    Cancelled,
}

impl IngestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::NoFindings => "no_findings",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A non-fatal error flattened for the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedError {
    pub code: String,
    pub message: String,
    pub context: Option<String>,
}

/// Result of one pass over one data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub run_id: String,
    pub data_source: String,
    pub status: IngestStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub files_located: usize,
    pub files_exported: usize,
    /// Evidence records created, keyed by evidence type name.
    pub records_by_type: BTreeMap<String, usize>,
    pub errors: Vec<ReportedError>,
}

impl IngestReport {
    pub fn new(run_id: impl Into<String>, data_source: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            data_source: data_source.into(),
            status: IngestStatus::Completed,
            started_at: Utc::now(),
            finished_at: None,
            files_located: 0,
            files_exported: 0,
            records_by_type: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// Total evidence records created across all types.
    pub fn total_records(&self) -> usize {
        self.records_by_type.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Stamp the finish time and final status.
    pub fn finish(&mut self, status: IngestStatus) {
        self.status = status;
        self.finished_at = Some(Utc::now());
    }

    /// Milliseconds between start and finish, if finished.
    pub fn duration_ms(&self) -> Option<u64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds().max(0) as u64)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
