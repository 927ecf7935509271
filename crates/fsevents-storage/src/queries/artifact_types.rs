//! Queries for the artifact_types table.

use fsevents_core::errors::EvidenceError;
use fsevents_core::types::ArtifactTypeHandle;
use rusqlite::{params, Connection, OptionalExtension};

use super::storage_err;

/// Insert the type unless the name is taken. Returns the stored handle and
/// whether this call created it. An existing row keeps its display name.
pub fn upsert(
    conn: &Connection,
    name: &str,
    display_name: &str,
) -> Result<(ArtifactTypeHandle, bool), EvidenceError> {
    let inserted = conn
        .execute(
            "INSERT INTO artifact_types (name, display_name) VALUES (?1, ?2)
             ON CONFLICT(name) DO NOTHING",
            params![name, display_name],
        )
        .map_err(storage_err)?;

    let handle = by_name(conn, name)?.ok_or_else(|| EvidenceError::Storage {
        message: format!("artifact type '{name}' vanished after upsert"),
    })?;
    Ok((handle, inserted == 1))
}

pub fn by_name(conn: &Connection, name: &str) -> Result<Option<ArtifactTypeHandle>, EvidenceError> {
    conn.prepare_cached("SELECT id, name, display_name FROM artifact_types WHERE name = ?1")
        .map_err(storage_err)?
        .query_row(params![name], |row| {
            Ok(ArtifactTypeHandle {
                id: row.get(0)?,
                name: row.get(1)?,
                display_name: row.get(2)?,
            })
        })
        .optional()
        .map_err(storage_err)
}

pub fn exists_id(conn: &Connection, id: i64) -> Result<bool, EvidenceError> {
    conn.prepare_cached("SELECT 1 FROM artifact_types WHERE id = ?1")
        .map_err(storage_err)?
        .exists(params![id])
        .map_err(storage_err)
}

/// All registered artifact types ordered by id.
pub fn list(conn: &Connection) -> Result<Vec<ArtifactTypeHandle>, EvidenceError> {
    let mut stmt = conn
        .prepare_cached("SELECT id, name, display_name FROM artifact_types ORDER BY id")
        .map_err(storage_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ArtifactTypeHandle {
                id: row.get(0)?,
                name: row.get(1)?,
                display_name: row.get(2)?,
            })
        })
        .map_err(storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(storage_err)
}
