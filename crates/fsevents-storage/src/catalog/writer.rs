//! Creating a catalog database.

use std::path::Path;

use fsevents_core::constants::{
    CATALOG_TABLE, COLUMN_DATES, COLUMN_FILENAME, COLUMN_MASK, COLUMN_SOURCE,
    DECODER_EVENTS_TABLE, FSEVENT_CATEGORIES,
};
use fsevents_core::errors::CatalogError;
use fsevents_core::types::CatalogEntry;
use rusqlite::{params, Connection};

/// One entry per FSEvents category, named `TSK_FSEVENTS_<CATEGORY>`, each
/// selecting the rows whose mask lists the category.
///
/// The decoder writes the mask as `;`-separated flag names, and some names
/// contain others (`Mount` / `Unmount`, `Created` / `FolderCreated`), so the
/// match is on whole `;`-delimited tokens.
pub fn default_entries() -> Vec<CatalogEntry> {
    FSEVENT_CATEGORIES
        .iter()
        .map(|category| {
            CatalogEntry::new(
                format!("TSK_FSEVENTS_{}", category.to_ascii_uppercase()),
                format!("FSEvents {category}"),
                format!(
                    "SELECT {COLUMN_FILENAME}, {COLUMN_MASK}, {COLUMN_SOURCE}, {COLUMN_DATES} \
                     FROM {DECODER_EVENTS_TABLE} \
                     WHERE ';' || replace({COLUMN_MASK}, ' ', '') || ';' LIKE '%;{category};%'"
                ),
            )
        })
        .collect()
}

/// Write `entries` into a catalog at `path`, creating the table if needed.
/// Existing rows are kept; the new entries are appended.
pub fn create_catalog(path: &Path, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    let mut conn = Connection::open(path).map_err(|e| CatalogError::Open {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    write_entries(&mut conn, entries)?;
    tracing::info!(
        path = %path.display(),
        entries = entries.len(),
        "wrote catalog"
    );
    Ok(())
}

/// Create the catalog table on `conn` and insert `entries` in one transaction.
pub fn write_entries(conn: &mut Connection, entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    let query_err = |e: rusqlite::Error| CatalogError::Query {
        message: e.to_string(),
    };
    let tx = conn.transaction().map_err(query_err)?;
    tx.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {CATALOG_TABLE} (
            artifact_name TEXT NOT NULL,
            artifact_title TEXT NOT NULL,
            sql_statement TEXT NOT NULL
        );"
    ))
    .map_err(query_err)?;
    {
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {CATALOG_TABLE} (artifact_name, artifact_title, sql_statement)
                 VALUES (?1, ?2, ?3)"
            ))
            .map_err(query_err)?;
        for entry in entries {
            stmt.execute(params![entry.type_name, entry.type_title, entry.query_template])
                .map_err(query_err)?;
        }
    }
    tx.commit().map_err(query_err)
}
