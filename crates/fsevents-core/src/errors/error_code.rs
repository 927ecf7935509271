//! FsEventsErrorCode trait: stable machine-readable codes for every error.

/// Every error enum implements this to expose a structured code string that
/// hosts and the CLI report alongside the human-readable message.
pub trait FsEventsErrorCode {
    /// Returns the error code string (e.g., "DECODE_FAILED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const LOCATE_ERROR: &str = "LOCATE_ERROR";
pub const INVALID_PATTERN: &str = "INVALID_PATTERN";
pub const SCRATCH_DIR_FAILED: &str = "SCRATCH_DIR_FAILED";
pub const EXPORT_FAILED: &str = "EXPORT_FAILED";
pub const EXECUTABLE_NOT_FOUND: &str = "EXECUTABLE_NOT_FOUND";
pub const DECODE_FAILED: &str = "DECODE_FAILED";
pub const CATALOG_ERROR: &str = "CATALOG_ERROR";
pub const DB_OPEN_FAILED: &str = "DB_OPEN_FAILED";
pub const QUERY_FAILED: &str = "QUERY_FAILED";
pub const TYPE_NOT_REGISTERED: &str = "TYPE_NOT_REGISTERED";
pub const EVIDENCE_ERROR: &str = "EVIDENCE_ERROR";
