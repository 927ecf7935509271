//! Data model shared by the pipeline stages and the host ports.

pub mod catalog;
pub mod evidence;
pub mod report;
pub mod source_file;

pub use catalog::CatalogEntry;
pub use evidence::{
    ArtifactId, ArtifactTypeHandle, Attribute, AttributeKind, AttributeTypeHandle,
    AttributeValueType, DecodedRecord, Registration, FSEVENTS_ATTRIBUTES,
};
pub use report::{IngestReport, IngestStatus, ReportedError};
pub use source_file::{DataSourceFile, FilePattern, SourceFile};
