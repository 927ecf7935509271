//! PRAGMA configuration for the evidence database.

use fsevents_core::errors::EvidenceError;
use rusqlite::Connection;

/// Apply write pragmas to the evidence database connection.
pub fn apply_pragmas(conn: &Connection) -> Result<(), EvidenceError> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| EvidenceError::Storage {
        message: format!("failed to apply pragmas: {e}"),
    })
}
