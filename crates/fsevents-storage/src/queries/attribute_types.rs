//! Queries for the attribute_types table.

use fsevents_core::errors::EvidenceError;
use fsevents_core::types::{AttributeTypeHandle, AttributeValueType};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::storage_err;

/// Insert the attribute type unless the name is taken. Returns the stored
/// handle and whether this call created it.
pub fn upsert(
    conn: &Connection,
    name: &str,
    value_type: AttributeValueType,
    display_name: &str,
) -> Result<(AttributeTypeHandle, bool), EvidenceError> {
    let inserted = conn
        .execute(
            "INSERT INTO attribute_types (name, display_name, value_type) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO NOTHING",
            params![name, display_name, value_type.as_str()],
        )
        .map_err(storage_err)?;

    let handle = by_name(conn, name)?.ok_or_else(|| EvidenceError::Storage {
        message: format!("attribute type '{name}' vanished after upsert"),
    })?;
    Ok((handle, inserted == 1))
}

pub fn by_name(conn: &Connection, name: &str) -> Result<Option<AttributeTypeHandle>, EvidenceError> {
    conn.prepare_cached(
        "SELECT id, name, display_name, value_type FROM attribute_types WHERE name = ?1",
    )
    .map_err(storage_err)?
    .query_row(params![name], map_row)
    .optional()
    .map_err(storage_err)
}

pub fn exists_id(conn: &Connection, id: i64) -> Result<bool, EvidenceError> {
    conn.prepare_cached("SELECT 1 FROM attribute_types WHERE id = ?1")
        .map_err(storage_err)?
        .exists(params![id])
        .map_err(storage_err)
}

pub fn list(conn: &Connection) -> Result<Vec<AttributeTypeHandle>, EvidenceError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, name, display_name, value_type FROM attribute_types ORDER BY id",
        )
        .map_err(storage_err)?;
    let rows = stmt.query_map([], map_row).map_err(storage_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(storage_err)
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<AttributeTypeHandle> {
    let value_type: String = row.get(3)?;
    Ok(AttributeTypeHandle {
        id: row.get(0)?,
        name: row.get(1)?,
        display_name: row.get(2)?,
        // Unknown codes can only come from a foreign writer; read them as text.
        value_type: AttributeValueType::parse(&value_type).unwrap_or(AttributeValueType::String),
    })
}
