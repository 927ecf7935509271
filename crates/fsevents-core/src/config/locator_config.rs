//! File locator configuration.

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::types::FilePattern;

/// Which data-source files are treated as FSEvents logs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocatorConfig {
    /// Case-insensitive filename glob. Default: "*".
    pub name_pattern: Option<String>,
    /// Parent-path fragment. Default: ".fseventsd".
    pub parent_pattern: Option<String>,
    /// Names excluded in addition to ".", ".." and "fseventsd-uuid".
    pub extra_excluded_names: Vec<String>,
}

impl LocatorConfig {
    pub fn effective_pattern(&self) -> FilePattern {
        let name = self
            .name_pattern
            .as_deref()
            .unwrap_or(constants::DEFAULT_NAME_PATTERN);
        let parent = self
            .parent_pattern
            .as_deref()
            .unwrap_or(constants::DEFAULT_PARENT_PATTERN);
        let pattern = FilePattern::new(name);
        if parent.is_empty() {
            pattern
        } else {
            pattern.in_parent(parent)
        }
    }

    /// Structural names plus the configured extras.
    pub fn excluded_names(&self) -> Vec<String> {
        constants::STRUCTURAL_NAMES
            .iter()
            .map(|s| s.to_string())
            .chain(self.extra_excluded_names.iter().cloned())
            .collect()
    }
}
