//! Evidence schema migrations using PRAGMA user_version.

pub mod v001_initial;

use fsevents_core::errors::EvidenceError;
use rusqlite::Connection;

/// Run all pending migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), EvidenceError> {
    let current = current_version(conn)?;

    let migrations: &[(&str, u32)] = &[(v001_initial::MIGRATION_SQL, 1)];

    for (sql, version) in migrations {
        if current < *version {
            conn.execute_batch(sql)
                .map_err(|e| EvidenceError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            conn.pragma_update(None, "user_version", version)
                .map_err(|e| EvidenceError::MigrationFailed {
                    version: *version,
                    message: e.to_string(),
                })?;
            tracing::info!(version = version, "applied evidence migration");
        }
    }

    Ok(())
}

/// Get the current schema version.
pub fn current_version(conn: &Connection) -> Result<u32, EvidenceError> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|e| EvidenceError::Storage {
            message: e.to_string(),
        })
}
