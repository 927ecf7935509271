//! EventDispatcher: synchronous delivery to every registered handler.

use std::sync::Arc;

use super::handler::IngestEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn IngestEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn IngestEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Deliver to every handler. A panicking handler is logged and does not
    /// stop delivery to the rest.
    fn emit<F: Fn(&dyn IngestEventHandler)>(&self, event_name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!(event = event_name, "event handler panicked");
            }
        }
    }

    pub fn emit_ingest_started(&self, event: &IngestStartedEvent) {
        self.emit("ingest_started", |h| h.on_ingest_started(event));
    }

    pub fn emit_file_exported(&self, event: &FileExportedEvent) {
        self.emit("file_exported", |h| h.on_file_exported(event));
    }

    pub fn emit_module_data(&self, event: &ModuleDataEvent) {
        self.emit("module_data", |h| h.on_module_data(event));
    }

    pub fn emit_ingest_message(&self, event: &IngestMessage) {
        self.emit("ingest_message", |h| h.on_ingest_message(event));
    }

    pub fn emit_ingest_complete(&self, event: &IngestCompleteEvent) {
        self.emit("ingest_complete", |h| h.on_ingest_complete(event));
    }

    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit("error", |h| h.on_error(event));
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
