//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{CatalogConfig, DecoderConfig, LocatorConfig, ScratchConfig};
use crate::errors::ConfigError;

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "fsevents.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`FSEVENTS_*`)
/// 3. Project config (`fsevents.toml` in the working root)
/// 4. User config (`~/.fsevents/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FsEventsConfig {
    pub decoder: DecoderConfig,
    pub locator: LocatorConfig,
    pub scratch: ScratchConfig,
    pub catalog: CatalogConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub decoder_executable: Option<PathBuf>,
    pub module_dir: Option<PathBuf>,
    pub case_label: Option<String>,
    pub temp_root: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub keep_scratch: Option<bool>,
}

impl FsEventsConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &FsEventsConfig) -> Result<(), ConfigError> {
        if let Some(ref label) = config.decoder.case_label {
            if label.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "decoder.case_label".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
            // The label becomes part of the decoder's output file name.
            if label.contains('/') || label.contains('\\') {
                return Err(ConfigError::ValidationFailed {
                    field: "decoder.case_label".to_string(),
                    message: "must not contain path separators".to_string(),
                });
            }
        }
        if let Some(ref pattern) = config.locator.name_pattern {
            if pattern.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "locator.name_pattern".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Catalog path resolved against the module directory.
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog
            .effective_path(&self.decoder.effective_module_dir())
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".fsevents").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut FsEventsConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: FsEventsConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut FsEventsConfig, other: &FsEventsConfig) {
        // Decoder
        if other.decoder.executable.is_some() {
            base.decoder.executable = other.decoder.executable.clone();
        }
        if other.decoder.module_dir.is_some() {
            base.decoder.module_dir = other.decoder.module_dir.clone();
        }
        if other.decoder.case_label.is_some() {
            base.decoder.case_label = other.decoder.case_label.clone();
        }

        // Locator
        if other.locator.name_pattern.is_some() {
            base.locator.name_pattern = other.locator.name_pattern.clone();
        }
        if other.locator.parent_pattern.is_some() {
            base.locator.parent_pattern = other.locator.parent_pattern.clone();
        }
        if !other.locator.extra_excluded_names.is_empty() {
            base.locator.extra_excluded_names = other.locator.extra_excluded_names.clone();
        }

        // Scratch
        if other.scratch.temp_root.is_some() {
            base.scratch.temp_root = other.scratch.temp_root.clone();
        }
        if other.scratch.keep_scratch.is_some() {
            base.scratch.keep_scratch = other.scratch.keep_scratch;
        }

        // Catalog
        if other.catalog.path.is_some() {
            base.catalog.path = other.catalog.path.clone();
        }
    }

    /// Pattern: `FSEVENTS_DECODER`, `FSEVENTS_CASE_LABEL`, etc.
    fn apply_env_overrides(config: &mut FsEventsConfig) {
        if let Ok(val) = std::env::var("FSEVENTS_DECODER") {
            config.decoder.executable = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FSEVENTS_MODULE_DIR") {
            config.decoder.module_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FSEVENTS_CASE_LABEL") {
            config.decoder.case_label = Some(val);
        }
        if let Ok(val) = std::env::var("FSEVENTS_TEMP_ROOT") {
            config.scratch.temp_root = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("FSEVENTS_KEEP_SCRATCH") {
            if let Ok(v) = val.parse::<bool>() {
                config.scratch.keep_scratch = Some(v);
            }
        }
        if let Ok(val) = std::env::var("FSEVENTS_CATALOG") {
            config.catalog.path = Some(PathBuf::from(val));
        }
    }

    fn apply_cli_overrides(config: &mut FsEventsConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.decoder_executable {
            config.decoder.executable = Some(v.clone());
        }
        if let Some(ref v) = cli.module_dir {
            config.decoder.module_dir = Some(v.clone());
        }
        if let Some(ref v) = cli.case_label {
            config.decoder.case_label = Some(v.clone());
        }
        if let Some(ref v) = cli.temp_root {
            config.scratch.temp_root = Some(v.clone());
        }
        if let Some(ref v) = cli.catalog_path {
            config.catalog.path = Some(v.clone());
        }
        if let Some(v) = cli.keep_scratch {
            config.scratch.keep_scratch = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
