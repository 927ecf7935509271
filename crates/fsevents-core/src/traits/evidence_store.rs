//! Host evidence API: type registration and artifact creation.

use crate::errors::EvidenceError;
use crate::types::{
    ArtifactId, ArtifactTypeHandle, Attribute, AttributeTypeHandle, AttributeValueType,
    DataSourceFile, Registration,
};

/// The host's artifact/attribute store.
///
/// Registration is an upsert keyed by name: registering an existing name
/// returns `Registration::AlreadyExists` with the existing handle and never
/// creates a duplicate.
pub trait EvidenceStore {
    fn register_artifact_type(
        &self,
        name: &str,
        display_name: &str,
    ) -> Result<Registration<ArtifactTypeHandle>, EvidenceError>;

    fn register_attribute_type(
        &self,
        name: &str,
        value_type: AttributeValueType,
        display_name: &str,
    ) -> Result<Registration<AttributeTypeHandle>, EvidenceError>;

    /// Resolve a registered artifact type by name.
    fn artifact_type(&self, name: &str) -> Result<Option<ArtifactTypeHandle>, EvidenceError>;

    /// Resolve a registered attribute type by name.
    fn attribute_type(&self, name: &str) -> Result<Option<AttributeTypeHandle>, EvidenceError>;

    /// Create an artifact of `artifact_type` attached to `source`.
    fn new_artifact(
        &self,
        source: &DataSourceFile,
        artifact_type: &ArtifactTypeHandle,
    ) -> Result<ArtifactId, EvidenceError>;

    fn add_attributes(
        &self,
        artifact: ArtifactId,
        attributes: &[Attribute],
    ) -> Result<(), EvidenceError>;

    /// Create an artifact together with its attributes. Either both are
    /// stored or neither is.
    fn new_artifact_with_attributes(
        &self,
        source: &DataSourceFile,
        artifact_type: &ArtifactTypeHandle,
        attributes: &[Attribute],
    ) -> Result<ArtifactId, EvidenceError>;
}
