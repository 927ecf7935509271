//! Host file API: enumerate a data source and stream file content.

use std::io::Read;

use crate::errors::LocateError;
use crate::types::{DataSourceFile, FilePattern};

/// A case data source (typically a mounted disk image).
pub trait DataSource {
    /// Stable key for this data source. Used to name the run's scratch
    /// directory, so two data sources must never share a key.
    fn key(&self) -> &str;

    /// All files matching `pattern`, in any order. The locator filters and
    /// orders the result.
    fn find_files(&self, pattern: &FilePattern) -> Result<Vec<DataSourceFile>, LocateError>;

    /// Open a file's full content for streaming.
    fn open(&self, file: &DataSourceFile) -> std::io::Result<Box<dyn Read + '_>>;
}
