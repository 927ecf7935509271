//! Ingest lifecycle events and the dispatcher that delivers them.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::IngestEventHandler;
pub use types::*;
