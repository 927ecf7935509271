//! The FSEvents ingest pipeline.
//!
//! [`FsEventsModule::process`] drives one data source through the stages:
//! [`locator`] finds the `.fseventsd` logs, [`exporter`] stages them in a
//! [`scratch`] directory, a [`Decoder`](fsevents_core::Decoder) turns them into
//! a SQLite database, [`schema`] registers the evidence types and
//! [`mapper`] converts decoded rows into evidence records.

pub mod decoder;
pub mod exporter;
pub mod locator;
pub mod mapper;
pub mod pipeline;
pub mod schema;
pub mod scratch;
pub mod source;

pub use decoder::ProcessDecoder;
pub use pipeline::{FsEventsModule, ANALYZED_SUBJECT};
pub use source::{LocalDataSource, MemoryDataSource};
