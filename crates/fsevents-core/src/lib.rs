//! Core types, ports, errors, config, events and tracing for the FSEvents
//! ingest pipeline.
//!
//! Every other crate in the workspace depends on this one. It holds no SQLite
//! or process logic of its own: the host-facing seams (`DataSource`,
//! `EvidenceStore`, `Decoder`, `Cancellable`) live in [`traits`] and are
//! implemented by `fsevents-storage` and `fsevents-ingest`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use config::FsEventsConfig;
pub use errors::{ErrorChain, ErrorContext, IngestError};
pub use events::dispatcher::EventDispatcher;
pub use traits::{Cancellable, CancellationToken, DataSource, Decoder, EvidenceStore};
