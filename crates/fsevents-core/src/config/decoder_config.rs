//! Decoder executable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;

/// Where the decoder lives and how it is called.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DecoderConfig {
    /// Explicit path to the decoder. Overrides the module-directory lookup.
    pub executable: Option<PathBuf>,
    /// Directory shipped with the module (decoder and catalog live here).
    pub module_dir: Option<PathBuf>,
    /// Case label passed with `-c`. Default: "Autopsy".
    pub case_label: Option<String>,
}

impl DecoderConfig {
    pub fn effective_case_label(&self) -> &str {
        self.case_label
            .as_deref()
            .unwrap_or(constants::DEFAULT_CASE_LABEL)
    }

    /// Module directory, defaulting to the current directory.
    pub fn effective_module_dir(&self) -> PathBuf {
        self.module_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// The configured executable, or the platform's decoder name inside the
    /// module directory.
    pub fn effective_executable(&self) -> PathBuf {
        match &self.executable {
            Some(path) => path.clone(),
            None => default_executable_in(&self.effective_module_dir()),
        }
    }
}

/// Platform decoder name joined onto `dir`.
pub fn default_executable_in(dir: &Path) -> PathBuf {
    if cfg!(windows) {
        dir.join(constants::WINDOWS_DECODER_EXECUTABLE)
    } else {
        dir.join(constants::UNIX_DECODER_EXECUTABLE)
    }
}
