//! LocalDataSource: a disk image mounted as a directory tree.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use fsevents_core::errors::LocateError;
use fsevents_core::traits::DataSource;
use fsevents_core::types::{DataSourceFile, FilePattern};
use walkdir::WalkDir;

use super::PatternMatcher;

/// A mounted image. File ids are assigned in sorted walk order, so the same
/// tree always yields the same ids.
pub struct LocalDataSource {
    root: PathBuf,
    key: String,
}

impl LocalDataSource {
    /// Use `root` as the image; the key defaults to the root's directory name.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, LocateError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(LocateError::RootUnreadable { root });
        }
        let key = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self { root, key })
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn local_path(&self, file: &DataSourceFile) -> PathBuf {
        let mut path = self.root.clone();
        for part in file.parent_path.split('/').filter(|p| !p.is_empty()) {
            path.push(part);
        }
        path.push(&file.name);
        path
    }
}

impl DataSource for LocalDataSource {
    fn key(&self) -> &str {
        &self.key
    }

    fn find_files(&self, pattern: &FilePattern) -> Result<Vec<DataSourceFile>, LocateError> {
        let matcher = PatternMatcher::new(pattern)?;
        let mut found = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .min_depth(1);
        for (index, entry) in walker.into_iter().enumerate() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable entry in data source");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let parent_path = parent_path_of(&self.root, entry.path());
            if matcher.matches(&name, &parent_path) {
                found.push(DataSourceFile::new(index as u64 + 1, name, parent_path));
            }
        }

        tracing::debug!(root = %self.root.display(), matches = found.len(), "enumerated data source");
        Ok(found)
    }

    fn open(&self, file: &DataSourceFile) -> std::io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(self.local_path(file))?))
    }
}

/// `/`-separated parent of `path` relative to `root`, always starting with `/`.
fn parent_path_of(root: &Path, path: &Path) -> String {
    let relative = path
        .parent()
        .and_then(|p| p.strip_prefix(root).ok())
        .unwrap_or_else(|| Path::new(""));
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    format!("/{}", parts.join("/"))
}
