//! SqliteEvidenceStore: the `EvidenceStore` port over an evidence database.

use std::path::{Path, PathBuf};

use fsevents_core::errors::EvidenceError;
use fsevents_core::traits::EvidenceStore;
use fsevents_core::types::{
    ArtifactId, ArtifactTypeHandle, Attribute, AttributeTypeHandle, AttributeValueType,
    DataSourceFile, Registration,
};
use rusqlite::Connection;

use crate::connection::pragmas::apply_pragmas;
use crate::migrations;
use crate::queries::{artifact_types, artifacts, attribute_types, summary};

/// Evidence database opened for writing, with migrations applied.
pub struct SqliteEvidenceStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteEvidenceStore {
    /// Open (or create) an evidence database at `path`.
    pub fn open(path: &Path) -> Result<Self, EvidenceError> {
        let conn = Connection::open(path).map_err(|e| EvidenceError::Storage {
            message: format!("open {}: {e}", path.display()),
        })?;
        apply_pragmas(&conn)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory evidence database (for testing).
    pub fn open_in_memory() -> Result<Self, EvidenceError> {
        let conn = Connection::open_in_memory().map_err(|e| EvidenceError::Storage {
            message: e.to_string(),
        })?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| EvidenceError::Storage {
                message: e.to_string(),
            })?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn, path: None })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw connection for read queries in `crate::queries`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn artifact_types(&self) -> Result<Vec<ArtifactTypeHandle>, EvidenceError> {
        artifact_types::list(&self.conn)
    }

    pub fn attribute_types(&self) -> Result<Vec<AttributeTypeHandle>, EvidenceError> {
        attribute_types::list(&self.conn)
    }

    pub fn counts_by_type(&self) -> Result<Vec<summary::TypeCount>, EvidenceError> {
        summary::counts_by_type(&self.conn)
    }

    pub fn total_artifacts(&self) -> Result<i64, EvidenceError> {
        summary::total_artifacts(&self.conn)
    }

    pub fn artifacts_of_type(&self, name: &str) -> Result<Vec<artifacts::ArtifactRow>, EvidenceError> {
        artifacts::by_type(&self.conn, name)
    }

    pub fn attributes_of(&self, artifact: ArtifactId) -> Result<Vec<artifacts::AttributeRow>, EvidenceError> {
        artifacts::attributes_of(&self.conn, artifact)
    }

    fn check_artifact_type(&self, artifact_type: &ArtifactTypeHandle) -> Result<(), EvidenceError> {
        if artifact_types::exists_id(&self.conn, artifact_type.id)? {
            Ok(())
        } else {
            Err(EvidenceError::UnknownArtifactType {
                id: artifact_type.id,
            })
        }
    }

    fn check_attribute_types(&self, attributes: &[Attribute]) -> Result<(), EvidenceError> {
        for attr in attributes {
            if !attribute_types::exists_id(&self.conn, attr.attribute_type.id)? {
                return Err(EvidenceError::UnknownAttributeType {
                    id: attr.attribute_type.id,
                });
            }
        }
        Ok(())
    }
}

impl EvidenceStore for SqliteEvidenceStore {
    fn register_artifact_type(
        &self,
        name: &str,
        display_name: &str,
    ) -> Result<Registration<ArtifactTypeHandle>, EvidenceError> {
        let (handle, created) = artifact_types::upsert(&self.conn, name, display_name)?;
        Ok(if created {
            Registration::Created(handle)
        } else {
            Registration::AlreadyExists(handle)
        })
    }

    fn register_attribute_type(
        &self,
        name: &str,
        value_type: AttributeValueType,
        display_name: &str,
    ) -> Result<Registration<AttributeTypeHandle>, EvidenceError> {
        let (handle, created) = attribute_types::upsert(&self.conn, name, value_type, display_name)?;
        Ok(if created {
            Registration::Created(handle)
        } else {
            Registration::AlreadyExists(handle)
        })
    }

    fn artifact_type(&self, name: &str) -> Result<Option<ArtifactTypeHandle>, EvidenceError> {
        artifact_types::by_name(&self.conn, name)
    }

    fn attribute_type(&self, name: &str) -> Result<Option<AttributeTypeHandle>, EvidenceError> {
        attribute_types::by_name(&self.conn, name)
    }

    fn new_artifact(
        &self,
        source: &DataSourceFile,
        artifact_type: &ArtifactTypeHandle,
    ) -> Result<ArtifactId, EvidenceError> {
        self.check_artifact_type(artifact_type)?;
        artifacts::insert(&self.conn, artifact_type.id, source)
    }

    fn new_artifact_with_attributes(
        &self,
        source: &DataSourceFile,
        artifact_type: &ArtifactTypeHandle,
        attributes: &[Attribute],
    ) -> Result<ArtifactId, EvidenceError> {
        self.check_artifact_type(artifact_type)?;
        self.check_attribute_types(attributes)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| EvidenceError::Storage {
                message: e.to_string(),
            })?;
        // Dropping `tx` on an early return rolls back the artifact row.
        let artifact = artifacts::insert(&tx, artifact_type.id, source)?;
        artifacts::insert_attributes(&tx, artifact, attributes)?;
        tx.commit().map_err(|e| EvidenceError::Storage {
            message: e.to_string(),
        })?;
        Ok(artifact)
    }

    fn add_attributes(
        &self,
        artifact: ArtifactId,
        attributes: &[Attribute],
    ) -> Result<(), EvidenceError> {
        if !artifacts::exists(&self.conn, artifact)? {
            return Err(EvidenceError::UnknownArtifact { id: artifact.0 });
        }
        self.check_attribute_types(attributes)?;
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|e| EvidenceError::Storage {
                message: e.to_string(),
            })?;
        artifacts::insert_attributes(&tx, artifact, attributes)?;
        tx.commit().map_err(|e| EvidenceError::Storage {
            message: e.to_string(),
        })
    }
}
