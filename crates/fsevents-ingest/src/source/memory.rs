//! MemoryDataSource: files held in memory. Used by embedders that already
//! have content in hand, and by tests.

use std::io::{Cursor, Read};

use fsevents_core::errors::LocateError;
use fsevents_core::traits::DataSource;
use fsevents_core::types::{DataSourceFile, FilePattern};

use super::PatternMatcher;

pub struct MemoryDataSource {
    key: String,
    files: Vec<(DataSourceFile, Vec<u8>)>,
}

impl MemoryDataSource {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            files: Vec::new(),
        }
    }

    /// Add a file; its id is its 1-based insertion index.
    pub fn with_file(
        mut self,
        parent_path: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        let id = self.files.len() as u64 + 1;
        self.files
            .push((DataSourceFile::new(id, name, parent_path), content.into()));
        self
    }

    pub fn files(&self) -> impl Iterator<Item = &DataSourceFile> {
        self.files.iter().map(|(f, _)| f)
    }
}

impl DataSource for MemoryDataSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn find_files(&self, pattern: &FilePattern) -> Result<Vec<DataSourceFile>, LocateError> {
        let matcher = PatternMatcher::new(pattern)?;
        Ok(self
            .files
            .iter()
            .filter(|(f, _)| matcher.matches(&f.name, &f.parent_path))
            .map(|(f, _)| f.clone())
            .collect())
    }

    fn open(&self, file: &DataSourceFile) -> std::io::Result<Box<dyn Read + '_>> {
        self.files
            .iter()
            .find(|(f, _)| f.id == file.id)
            .map(|(_, content)| Box::new(Cursor::new(content.as_slice())) as Box<dyn Read + '_>)
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no file with id {} in data source", file.id),
                )
            })
    }
}
