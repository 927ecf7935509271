//! Scratch directory configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where exported files and decoder output are staged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScratchConfig {
    /// Case temp root. Default: the system temp directory.
    pub temp_root: Option<PathBuf>,
    /// Keep the scratch tree after the run. Default: false.
    pub keep_scratch: Option<bool>,
}

impl ScratchConfig {
    pub fn effective_temp_root(&self) -> PathBuf {
        self.temp_root.clone().unwrap_or_else(std::env::temp_dir)
    }

    pub fn effective_keep_scratch(&self) -> bool {
        self.keep_scratch.unwrap_or(false)
    }
}
