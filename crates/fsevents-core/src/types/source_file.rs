//! File handles from the data source and their exported local copies.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// A file inside the data source (the mounted image), as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSourceFile {
    /// Host-assigned identifier, unique within the data source.
    pub id: u64,
    /// File name without directories.
    pub name: String,
    /// Parent path inside the data source, `/`-separated.
    pub parent_path: String,
}

impl DataSourceFile {
    pub fn new(id: u64, name: impl Into<String>, parent_path: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_path: parent_path.into(),
        }
    }

    /// Full path inside the data source.
    pub fn origin_path(&self) -> String {
        if self.parent_path.ends_with('/') {
            format!("{}{}", self.parent_path, self.name)
        } else {
            format!("{}/{}", self.parent_path, self.name)
        }
    }

    /// `.`, `..` and `fseventsd-uuid` are directory bookkeeping, not logs.
    pub fn is_structural(&self) -> bool {
        constants::STRUCTURAL_NAMES.contains(&self.name.as_str())
    }

    /// Slack space carved by the host; mapped rows would be duplicates.
    pub fn is_slack(&self) -> bool {
        self.name.contains(constants::SLACK_MARKER)
    }
}

/// What the locator asks the data source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePattern {
    /// Case-insensitive glob matched against the file name.
    pub name_glob: String,
    /// Case-insensitive fragment the parent path must contain, if any.
    pub parent_contains: Option<String>,
}

impl FilePattern {
    pub fn new(name_glob: impl Into<String>) -> Self {
        Self {
            name_glob: name_glob.into(),
            parent_contains: None,
        }
    }

    pub fn in_parent(mut self, fragment: impl Into<String>) -> Self {
        self.parent_contains = Some(fragment.into());
        self
    }
}

impl Default for FilePattern {
    fn default() -> Self {
        Self::new(constants::DEFAULT_NAME_PATTERN).in_parent(constants::DEFAULT_PARENT_PATTERN)
    }
}

/// A data-source file staged on local disk for the decoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub file: DataSourceFile,
    /// Where the exporter wrote the content.
    pub local_path: PathBuf,
    /// Bytes written.
    pub size: u64,
    /// BLAKE3 of the exported content, hex encoded.
    pub digest: String,
}

impl SourceFile {
    pub fn name(&self) -> &str {
        &self.file.name
    }

    /// File name of the exported copy. Differs from `name()` when another
    /// file of the same name was exported first.
    pub fn local_name(&self) -> String {
        self.local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.name.clone())
    }
}
