//! Record mapper: turn decoded rows into evidence records.
//!
//! For every exported file and every catalog entry, the entry's query is run
//! against the decoder output restricted to rows whose `source` names the
//! exported file. Each row becomes one artifact stored atomically with its
//! four attributes.

use std::collections::BTreeMap;

use fsevents_core::constants::{COLUMN_DATES, COLUMN_FILENAME, COLUMN_MASK, COLUMN_SOURCE};
use fsevents_core::errors::{ErrorChain, MapError};
use fsevents_core::traits::{Cancellable, EvidenceStore};
use fsevents_core::types::{
    ArtifactTypeHandle, Attribute, AttributeTypeHandle, CatalogEntry, DecodedRecord, SourceFile,
    FSEVENTS_ATTRIBUTES,
};
use fsevents_storage::catalog::Catalog;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, Row};

/// Result of one mapping pass.
#[derive(Debug, Default)]
pub struct MapOutcome {
    /// Records created per evidence type. Every catalog type is present,
    /// including types that produced nothing.
    pub records_by_type: BTreeMap<String, usize>,
    /// Files skipped because they hold carved slack.
    pub skipped_files: usize,
    /// Set when cancellation stopped the pass between files.
    pub cancelled: bool,
    /// Per-(file, entry) failures.
    pub errors: ErrorChain,
}

impl MapOutcome {
    pub fn total_records(&self) -> usize {
        self.records_by_type.values().sum()
    }
}

/// Handles one catalog entry needs, resolved from the store by name.
struct EntryHandles {
    artifact_type: ArtifactTypeHandle,
    attributes: Vec<AttributeTypeHandle>,
}

/// Maps decoded rows into the evidence store.
pub struct RecordMapper<'a> {
    decoded: &'a Connection,
    store: &'a dyn EvidenceStore,
    module_name: &'a str,
}

impl<'a> RecordMapper<'a> {
    pub fn new(decoded: &'a Connection, store: &'a dyn EvidenceStore, module_name: &'a str) -> Self {
        Self {
            decoded,
            store,
            module_name,
        }
    }

    /// Map every (file, entry) pair. Failures are recorded per pair and the
    /// pass moves on.
    pub fn map_all(
        &self,
        files: &[SourceFile],
        catalog: &Catalog,
        cancel: &dyn Cancellable,
    ) -> MapOutcome {
        let mut outcome = MapOutcome::default();
        for name in catalog.type_names() {
            outcome.records_by_type.insert(name.to_string(), 0);
        }

        for file in files {
            if cancel.is_cancelled() {
                tracing::info!("mapping cancelled");
                outcome.cancelled = true;
                break;
            }
            if should_skip(file) {
                tracing::debug!(file = file.name(), "skipping slack or structural file");
                outcome.skipped_files += 1;
                continue;
            }

            for entry in catalog.entries() {
                let mut created = 0;
                let result = self.map_rows(file, entry, &mut created);
                *outcome
                    .records_by_type
                    .entry(entry.type_name.clone())
                    .or_insert(0) += created;
                if let Err(e) = result {
                    tracing::warn!(
                        file = file.name(),
                        entry = %entry.type_name,
                        written = created,
                        error = %e,
                        "catalog entry failed for file"
                    );
                    let context = fsevents_core::error_context!(
                        "map",
                        "file" => file.name(),
                        "entry" => entry.type_name.as_str(),
                    );
                    outcome.errors.push_with_context(e, context);
                }
            }
        }

        tracing::info!(
            records = outcome.total_records(),
            skipped = outcome.skipped_files,
            errors = outcome.errors.len(),
            "mapped decoded records"
        );
        outcome
    }

    /// Run one entry's query for one file and write the resulting records.
    /// Returns how many artifacts were created.
    pub fn map_entry(&self, file: &SourceFile, entry: &CatalogEntry) -> Result<usize, MapError> {
        let mut created = 0;
        self.map_rows(file, entry, &mut created)?;
        Ok(created)
    }

    /// `created` counts records already stored when an error cuts the
    /// entry short.
    fn map_rows(
        &self,
        file: &SourceFile,
        entry: &CatalogEntry,
        created: &mut usize,
    ) -> Result<(), MapError> {
        let handles = self.resolve(entry)?;
        let sql = filtered_query(&entry.query_template);
        let query_err = |e: rusqlite::Error| MapError::Query {
            entry: entry.type_name.clone(),
            file: file.name().to_string(),
            message: e.to_string(),
        };

        let [exact, unix, windows] = source_patterns(&file.local_name());
        let mut stmt = self.decoded.prepare(&sql).map_err(query_err)?;
        let mut rows = stmt.query([exact, unix, windows]).map_err(query_err)?;

        while let Some(row) = rows.next().map_err(query_err)? {
            let record = read_record(row).map_err(query_err)?;
            self.write_record(file, &handles, &record)?;
            *created += 1;
        }
        Ok(())
    }

    /// Handles are looked up per entry so types registered by another job
    /// in the meantime are picked up.
    fn resolve(&self, entry: &CatalogEntry) -> Result<EntryHandles, MapError> {
        let artifact_type = self.store.artifact_type(&entry.type_name)?.ok_or_else(|| {
            MapError::TypeNotRegistered {
                name: entry.type_name.clone(),
            }
        })?;
        let mut attributes = Vec::with_capacity(FSEVENTS_ATTRIBUTES.len());
        for kind in FSEVENTS_ATTRIBUTES.iter() {
            let handle = self.store.attribute_type(kind.name)?.ok_or_else(|| {
                MapError::AttributeNotRegistered {
                    name: kind.name.to_string(),
                }
            })?;
            attributes.push(handle);
        }
        Ok(EntryHandles {
            artifact_type,
            attributes,
        })
    }

    fn write_record(
        &self,
        file: &SourceFile,
        handles: &EntryHandles,
        record: &DecodedRecord,
    ) -> Result<(), MapError> {
        let attributes: Vec<Attribute> = handles
            .attributes
            .iter()
            .zip(record.values())
            .map(|(handle, value)| Attribute::new(handle, self.module_name, value))
            .collect();
        self.store
            .new_artifact_with_attributes(&file.file, &handles.artifact_type, &attributes)?;
        Ok(())
    }
}

/// Slack files and directory entries never produce records.
fn should_skip(file: &SourceFile) -> bool {
    file.file.is_slack() || matches!(file.name(), "." | "..")
}

/// Wrap a catalog query so it only returns rows whose `source` is the bound
/// file name or a path ending in it. Works whether or not the template has
/// its own WHERE.
pub fn filtered_query(template: &str) -> String {
    let inner = template.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace());
    format!(
        "SELECT * FROM ({inner}) \
         WHERE {COLUMN_SOURCE} = ?1 \
         OR {COLUMN_SOURCE} LIKE ?2 ESCAPE '\\' \
         OR {COLUMN_SOURCE} LIKE ?3 ESCAPE '\\'"
    )
}

/// Parameters for [`filtered_query`]: the exact name, then LIKE patterns for
/// the name as the last component of a `/` or `\` path. LIKE
/// metacharacters in the name are escaped.
pub fn source_patterns(name: &str) -> [String; 3] {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    [
        name.to_string(),
        format!("%/{escaped}"),
        format!("%\\\\{escaped}"),
    ]
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<DecodedRecord> {
    Ok(DecodedRecord {
        filename: column_text(row, COLUMN_FILENAME)?,
        mask: column_text(row, COLUMN_MASK)?,
        source: column_text(row, COLUMN_SOURCE)?,
        dates: column_text(row, COLUMN_DATES)?,
    })
}

/// Any column value as text. NULL becomes the empty string.
fn column_text(row: &Row<'_>, column: &str) -> rusqlite::Result<String> {
    Ok(match row.get_ref(column)? {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) | ValueRef::Blob(t) => String::from_utf8_lossy(t).into_owned(),
    })
}
