//! `DataSource` implementations.

pub mod local;
pub mod memory;

pub use local::LocalDataSource;
pub use memory::MemoryDataSource;

use fsevents_core::errors::LocateError;
use fsevents_core::types::FilePattern;
use glob::{MatchOptions, Pattern};

/// Compiled form of a `FilePattern`, matched case-insensitively.
pub(crate) struct PatternMatcher {
    name: Pattern,
    parent_lower: Option<String>,
}

impl PatternMatcher {
    pub(crate) fn new(pattern: &FilePattern) -> Result<Self, LocateError> {
        let name = Pattern::new(&pattern.name_glob).map_err(|e| LocateError::InvalidPattern {
            pattern: pattern.name_glob.clone(),
            message: e.to_string(),
        })?;
        Ok(Self {
            name,
            parent_lower: pattern.parent_contains.as_ref().map(|p| p.to_lowercase()),
        })
    }

    pub(crate) fn matches(&self, name: &str, parent_path: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        if !self.name.matches_with(name, options) {
            return false;
        }
        match &self.parent_lower {
            Some(fragment) => parent_path.to_lowercase().contains(fragment.as_str()),
            None => true,
        }
    }
}
