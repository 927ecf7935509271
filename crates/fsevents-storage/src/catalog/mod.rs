//! The catalog database: evidence categories and their extraction queries.
//!
//! Table `extracted_content_sql(artifact_name, artifact_title, sql_statement)`.
//! New categories are added by inserting rows; no code change is needed.

pub mod reader;
pub mod writer;

pub use reader::Catalog;
pub use writer::{create_catalog, default_entries};
