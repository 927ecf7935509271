//! Locator: find the FSEvents logs inside a data source.

use std::collections::HashSet;

use fsevents_core::config::LocatorConfig;
use fsevents_core::errors::LocateError;
use fsevents_core::traits::DataSource;
use fsevents_core::types::{DataSourceFile, FilePattern};

/// Query `source` for files matching `pattern`, then drop every name in
/// `excluded`. The result is sorted by (parent path, name) and holds each
/// file id once. No matches is an empty list, not an error.
pub fn locate(
    source: &dyn DataSource,
    pattern: &FilePattern,
    excluded: &[String],
) -> Result<Vec<DataSourceFile>, LocateError> {
    let mut files = source.find_files(pattern)?;
    let found = files.len();

    files.retain(|f| !f.is_structural() && !excluded.iter().any(|name| name == &f.name));
    files.sort_by(|a, b| {
        (a.parent_path.as_str(), a.name.as_str(), a.id)
            .cmp(&(b.parent_path.as_str(), b.name.as_str(), b.id))
    });
    let mut seen = HashSet::new();
    files.retain(|f| seen.insert(f.id));

    tracing::info!(
        data_source = source.key(),
        found,
        kept = files.len(),
        "located FSEvents files"
    );
    Ok(files)
}

/// `locate` with the pattern and exclusions from the locator config.
pub fn locate_with(
    source: &dyn DataSource,
    config: &LocatorConfig,
) -> Result<Vec<DataSourceFile>, LocateError> {
    locate(source, &config.effective_pattern(), &config.excluded_names())
}
