//! IngestEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Observer of an ingest run. Handlers override only what they need.
pub trait IngestEventHandler: Send + Sync {
    fn on_ingest_started(&self, _event: &IngestStartedEvent) {}
    fn on_file_exported(&self, _event: &FileExportedEvent) {}
    fn on_module_data(&self, _event: &ModuleDataEvent) {}
    fn on_ingest_message(&self, _event: &IngestMessage) {}
    fn on_ingest_complete(&self, _event: &IngestCompleteEvent) {}
    fn on_error(&self, _event: &ErrorEvent) {}
}
