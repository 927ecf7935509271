//! Evidence model: artifact and attribute types, artifacts, attributes,
//! and the decoded rows they are built from.

use serde::{Deserialize, Serialize};

/// Value type of an attribute. Only strings are produced by this module; the
/// other variants exist so stores can hold types registered by others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeValueType {
    String,
    Integer,
    Long,
    Double,
    DateTime,
}

impl AttributeValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Double => "double",
            Self::DateTime => "datetime",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "long" => Some(Self::Long),
            "double" => Some(Self::Double),
            "datetime" => Some(Self::DateTime),
            _ => None,
        }
    }
}

/// A fixed attribute kind this module registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeKind {
    pub name: &'static str,
    pub display_name: &'static str,
    pub value_type: AttributeValueType,
}

/// The four attributes every FSEvents record carries, in record order:
/// file name, mask, source, dates.
pub const FSEVENTS_ATTRIBUTES: [AttributeKind; 4] = [
    AttributeKind {
        name: "TSK_FSEVENTS_FILE_NAME",
        display_name: "File Name",
        value_type: AttributeValueType::String,
    },
    AttributeKind {
        name: "TSK_FSEVENTS_FILE_MASK",
        display_name: "Mask",
        value_type: AttributeValueType::String,
    },
    AttributeKind {
        name: "TSK_FSEVENTS_SOURCE",
        display_name: "Source File",
        value_type: AttributeValueType::String,
    },
    AttributeKind {
        name: "TSK_FSEVENTS_DATES",
        display_name: "Date(s)",
        value_type: AttributeValueType::String,
    },
];

/// A registered artifact (evidence) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactTypeHandle {
    pub id: i64,
    pub name: String,
    pub display_name: String,
}

/// A registered attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeTypeHandle {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    pub value_type: AttributeValueType,
}

/// Outcome of an idempotent registration. Both variants are success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration<T> {
    Created(T),
    AlreadyExists(T),
}

impl<T> Registration<T> {
    pub fn handle(&self) -> &T {
        match self {
            Self::Created(h) | Self::AlreadyExists(h) => h,
        }
    }

    pub fn into_handle(self) -> T {
        match self {
            Self::Created(h) | Self::AlreadyExists(h) => h,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Identifier of a created artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId(pub i64);

/// One attribute value attached to an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub attribute_type: AttributeTypeHandle,
    /// Attribution: the module that produced the value.
    pub source: String,
    pub value: String,
}

impl Attribute {
    pub fn new(
        attribute_type: &AttributeTypeHandle,
        source: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute_type: attribute_type.clone(),
            source: source.into(),
            value: value.into(),
        }
    }
}

/// A row of the decoder output as returned by a catalog query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecodedRecord {
    pub filename: String,
    pub mask: String,
    pub source: String,
    pub dates: String,
}

impl DecodedRecord {
    /// Values in the order of [`FSEVENTS_ATTRIBUTES`].
    pub fn values(&self) -> [&str; 4] {
        [&self.filename, &self.mask, &self.source, &self.dates]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_type_string_roundtrip() {
        for t in [
            AttributeValueType::String,
            AttributeValueType::Integer,
            AttributeValueType::Long,
            AttributeValueType::Double,
            AttributeValueType::DateTime,
        ] {
            assert_eq!(AttributeValueType::parse(t.as_str()), Some(t));
        }
        assert_eq!(AttributeValueType::parse("blob"), None);
    }

    #[test]
    fn registration_handle_is_shared_by_both_outcomes() {
        let created = Registration::Created(5);
        let existing = Registration::AlreadyExists(5);
        assert!(created.was_created());
        assert!(!existing.was_created());
        assert_eq!(created.handle(), existing.handle());
        assert_eq!(existing.into_handle(), 5);
    }

    #[test]
    fn attribute_names_are_unique() {
        let mut names: Vec<_> = FSEVENTS_ATTRIBUTES.iter().map(|a| a.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
