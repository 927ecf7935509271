//! Queries for the artifacts and attributes tables.

use fsevents_core::errors::EvidenceError;
use fsevents_core::types::{ArtifactId, Attribute, DataSourceFile};
use rusqlite::{params, Connection};

use super::storage_err;

/// A stored attribute, joined with its type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub type_name: String,
    pub source: String,
    pub value: String,
}

/// A stored artifact with its type name and source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRow {
    pub id: i64,
    pub type_name: String,
    pub source_file_id: i64,
    pub source_file_name: String,
}

pub fn insert(
    conn: &Connection,
    artifact_type_id: i64,
    source: &DataSourceFile,
) -> Result<ArtifactId, EvidenceError> {
    conn.execute(
        "INSERT INTO artifacts (artifact_type_id, source_file_id, source_file_name, source_file_path)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            artifact_type_id,
            source.id as i64,
            source.name,
            source.origin_path()
        ],
    )
    .map_err(storage_err)?;
    Ok(ArtifactId(conn.last_insert_rowid()))
}

pub fn exists(conn: &Connection, id: ArtifactId) -> Result<bool, EvidenceError> {
    conn.prepare_cached("SELECT 1 FROM artifacts WHERE id = ?1")
        .map_err(storage_err)?
        .exists(params![id.0])
        .map_err(storage_err)
}

/// Append attributes after any the artifact already has.
pub fn insert_attributes(
    conn: &Connection,
    artifact: ArtifactId,
    attributes: &[Attribute],
) -> Result<(), EvidenceError> {
    let next: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(ordinal) + 1, 0) FROM attributes WHERE artifact_id = ?1",
            params![artifact.0],
            |row| row.get(0),
        )
        .map_err(storage_err)?;

    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO attributes (artifact_id, attribute_type_id, ordinal, source, value)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(storage_err)?;
    for (i, attr) in attributes.iter().enumerate() {
        stmt.execute(params![
            artifact.0,
            attr.attribute_type.id,
            next + i as i64,
            attr.source,
            attr.value
        ])
        .map_err(storage_err)?;
    }
    Ok(())
}

/// Attributes of one artifact in insertion order.
pub fn attributes_of(conn: &Connection, artifact: ArtifactId) -> Result<Vec<AttributeRow>, EvidenceError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT t.name, a.source, a.value
             FROM attributes a JOIN attribute_types t ON t.id = a.attribute_type_id
             WHERE a.artifact_id = ?1 ORDER BY a.ordinal",
        )
        .map_err(storage_err)?;
    let rows = stmt
        .query_map(params![artifact.0], |row| {
            Ok(AttributeRow {
                type_name: row.get(0)?,
                source: row.get(1)?,
                value: row.get(2)?,
            })
        })
        .map_err(storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(storage_err)
}

/// Artifacts of one type, ordered by id.
pub fn by_type(conn: &Connection, type_name: &str) -> Result<Vec<ArtifactRow>, EvidenceError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT a.id, t.name, a.source_file_id, a.source_file_name
             FROM artifacts a JOIN artifact_types t ON t.id = a.artifact_type_id
             WHERE t.name = ?1 ORDER BY a.id",
        )
        .map_err(storage_err)?;
    let rows = stmt
        .query_map(params![type_name], |row| {
            Ok(ArtifactRow {
                id: row.get(0)?,
                type_name: row.get(1)?,
                source_file_id: row.get(2)?,
                source_file_name: row.get(3)?,
            })
        })
        .map_err(storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(storage_err)
}
