//! Schema importer: register the catalog's evidence types and the fixed
//! FSEvents attributes with the evidence store.

use fsevents_core::errors::EvidenceError;
use fsevents_core::traits::EvidenceStore;
use fsevents_core::types::{Registration, FSEVENTS_ATTRIBUTES};
use fsevents_storage::catalog::Catalog;

/// Per-name outcome of one registration pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub created: Vec<String>,
    pub existing: Vec<String>,
    /// Names whose registration failed, with the store's message.
    pub failed: Vec<(String, String)>,
}

impl SchemaReport {
    fn record<T>(&mut self, name: &str, result: Result<Registration<T>, EvidenceError>) {
        match result {
            Ok(Registration::Created(_)) => {
                tracing::debug!(name, "registered");
                self.created.push(name.to_string());
            }
            Ok(Registration::AlreadyExists(_)) => {
                tracing::debug!(name, "already registered");
                self.existing.push(name.to_string());
            }
            Err(e) => {
                tracing::warn!(name, error = %e, "registration failed");
                self.failed.push((name.to_string(), e.to_string()));
            }
        }
    }
}

/// Register each distinct catalog type once, then the four attributes.
///
/// Re-running against the same store creates nothing new. A failed name is
/// reported and the rest are still attempted; the mapper later skips entries
/// whose types cannot be resolved.
pub fn register_schema(store: &dyn EvidenceStore, catalog: &Catalog) -> SchemaReport {
    let mut report = SchemaReport::default();

    for (name, title) in catalog.distinct_types() {
        report.record(name, store.register_artifact_type(name, title));
    }
    for kind in FSEVENTS_ATTRIBUTES.iter() {
        report.record(
            kind.name,
            store.register_attribute_type(kind.name, kind.value_type, kind.display_name),
        );
    }

    tracing::info!(
        created = report.created.len(),
        existing = report.existing.len(),
        failed = report.failed.len(),
        "evidence schema registered"
    );
    report
}
