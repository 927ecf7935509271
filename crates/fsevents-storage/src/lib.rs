//! SQLite persistence for the FSEvents ingest pipeline.
//!
//! - [`SqliteEvidenceStore`]: the `EvidenceStore` port backed by an evidence
//!   database (artifact types, attribute types, artifacts, attributes).
//! - [`catalog`]: reading and creating the catalog database that drives
//!   type registration and row extraction.

pub mod catalog;
pub mod connection;
pub mod evidence_store;
pub mod migrations;
pub mod queries;

pub use evidence_store::SqliteEvidenceStore;
