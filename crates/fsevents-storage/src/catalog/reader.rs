//! Loading the catalog into a typed list.

use std::path::Path;

use fsevents_core::constants::CATALOG_TABLE;
use fsevents_core::errors::CatalogError;
use fsevents_core::types::CatalogEntry;
use rusqlite::Connection;

use crate::connection::{close_logged, open_verified};

/// Catalog entries in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Open the catalog read-only, load every entry, close it.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let conn = open_verified(path).map_err(|e| CatalogError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let result = Self::load_from(&conn);
        close_logged(conn, "catalog");
        result
    }

    /// Load every entry from an open connection.
    pub fn load_from(conn: &Connection) -> Result<Self, CatalogError> {
        let sql = format!(
            "SELECT artifact_name, artifact_title, sql_statement FROM {CATALOG_TABLE} ORDER BY rowid"
        );
        let mut stmt = conn.prepare(&sql).map_err(|e| CatalogError::Query {
            message: e.to_string(),
        })?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(|e| CatalogError::Query {
                message: e.to_string(),
            })?;

        let mut entries = Vec::new();
        for (i, row) in rows.enumerate() {
            let (name, title, query) = row.map_err(|e| CatalogError::Query {
                message: e.to_string(),
            })?;
            let name = name.ok_or(CatalogError::MissingValue {
                row: i,
                column: "artifact_name",
            })?;
            let title = title.ok_or(CatalogError::MissingValue {
                row: i,
                column: "artifact_title",
            })?;
            let query = query.ok_or(CatalogError::MissingValue {
                row: i,
                column: "sql_statement",
            })?;
            entries.push(CatalogEntry::new(name, title, query));
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct `(type_name, type_title)` pairs in first-seen order.
    pub fn distinct_types(&self) -> Vec<(&str, &str)> {
        let mut seen: Vec<(&str, &str)> = Vec::new();
        for entry in &self.entries {
            let pair = (entry.type_name.as_str(), entry.type_title.as_str());
            if !seen.contains(&pair) {
                seen.push(pair);
            }
        }
        seen
    }

    /// Distinct type names in first-seen order.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !names.contains(&entry.type_name.as_str()) {
                names.push(&entry.type_name);
            }
        }
        names
    }
}
