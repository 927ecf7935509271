//! Ports between the pipeline and its host.

pub mod cancellation;
pub mod data_source;
pub mod decoder;
pub mod evidence_store;

pub use cancellation::{Cancellable, CancellationToken};
pub use data_source::DataSource;
pub use decoder::Decoder;
pub use evidence_store::EvidenceStore;
