//! Aggregate reads over the evidence database.

use fsevents_core::errors::EvidenceError;
use rusqlite::Connection;

use super::storage_err;

/// Record count for one artifact type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub name: String,
    pub display_name: String,
    pub count: i64,
}

/// Artifact counts per registered type, including types with no artifacts.
pub fn counts_by_type(conn: &Connection) -> Result<Vec<TypeCount>, EvidenceError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT t.name, t.display_name, COUNT(a.id)
             FROM artifact_types t LEFT JOIN artifacts a ON a.artifact_type_id = t.id
             GROUP BY t.id ORDER BY t.name",
        )
        .map_err(storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TypeCount {
                name: row.get(0)?,
                display_name: row.get(1)?,
                count: row.get(2)?,
            })
        })
        .map_err(storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(storage_err)
}

pub fn total_artifacts(conn: &Connection) -> Result<i64, EvidenceError> {
    conn.query_row("SELECT COUNT(*) FROM artifacts", [], |row| row.get(0))
        .map_err(storage_err)
}
