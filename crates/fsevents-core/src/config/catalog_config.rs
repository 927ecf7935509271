//! Catalog database configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog. Default: `<module_dir>/fsevents_sql.db3`.
    pub path: Option<PathBuf>,
}

impl CatalogConfig {
    pub fn effective_path(&self, module_dir: &Path) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| module_dir.join(constants::CATALOG_FILE_NAME))
    }
}
