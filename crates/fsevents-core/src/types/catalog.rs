//! Catalog entries: one evidence category and the query that extracts it.

use serde::{Deserialize, Serialize};

/// A row of the catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Registration key for the evidence type (`artifact_name`).
    pub type_name: String,
    /// Display title for the evidence type (`artifact_title`).
    pub type_title: String,
    /// SELECT against the decoder output, without the source-file filter.
    pub query_template: String,
}

impl CatalogEntry {
    pub fn new(
        type_name: impl Into<String>,
        type_title: impl Into<String>,
        query_template: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            type_title: type_title.into(),
            query_template: query_template.into(),
        }
    }
}
