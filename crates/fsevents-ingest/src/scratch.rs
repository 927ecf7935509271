//! Per-data-source scratch directory with cleanup on drop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fsevents_core::constants::SCRATCH_DIR_NAME;
use fsevents_core::errors::ExportError;

const EXPORT_SUBDIR: &str = "export";
const DECODED_SUBDIR: &str = "decoded";

/// RAII guard over `<temp_root>/MacFSEvents/<data source key>-<run id>`.
///
/// Exported logs go to `export/`, decoder output to `decoded/`. The tree is
/// removed on `cleanup` or drop unless the guard was told to keep it.
pub struct ScratchDir {
    root: PathBuf,
    keep: bool,
    removed: bool,
}

impl ScratchDir {
    /// Create the scratch tree for one run over one data source. Keys that
    /// sanitize to the same name stay apart through the run id. A directory
    /// left over under the same name is reused after its contents are
    /// cleared.
    pub fn prepare(
        temp_root: &Path,
        data_source_key: &str,
        run_id: &str,
        keep: bool,
    ) -> Result<Self, ExportError> {
        let parent = temp_root.join(SCRATCH_DIR_NAME);
        let dir_name = format!("{}-{}", sanitize_key(data_source_key), sanitize_key(run_id));
        let root = parent.join(dir_name);
        let scratch_err = |path: &Path, source: io::Error| ExportError::ScratchDir {
            path: path.to_path_buf(),
            source,
        };

        fs::create_dir_all(&parent).map_err(|e| scratch_err(&parent, e))?;
        match fs::create_dir(&root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::info!(path = %root.display(), "scratch directory already exists, reusing it");
                for sub in [EXPORT_SUBDIR, DECODED_SUBDIR] {
                    let stale = root.join(sub);
                    if stale.exists() {
                        fs::remove_dir_all(&stale).map_err(|e| scratch_err(&stale, e))?;
                    }
                }
            }
            Err(e) => return Err(scratch_err(&root, e)),
        }
        for sub in [EXPORT_SUBDIR, DECODED_SUBDIR] {
            let dir = root.join(sub);
            fs::create_dir_all(&dir).map_err(|e| scratch_err(&dir, e))?;
        }

        tracing::debug!(path = %root.display(), "prepared scratch directory");
        Ok(Self {
            root,
            keep,
            removed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Where exported logs are written; the decoder's input directory.
    pub fn export_dir(&self) -> PathBuf {
        self.root.join(EXPORT_SUBDIR)
    }

    /// The decoder's output directory.
    pub fn decoded_dir(&self) -> PathBuf {
        self.root.join(DECODED_SUBDIR)
    }

    /// Remove the tree now. Failures are logged, never returned.
    pub fn cleanup(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if self.keep {
            tracing::info!(path = %self.root.display(), "keeping scratch directory");
            return;
        }
        if let Err(e) = fs::remove_dir_all(&self.root) {
            tracing::warn!(
                path = %self.root.display(),
                error = %e,
                "failed to remove scratch directory"
            );
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Keep the key usable as a single path component.
fn sanitize_key(key: &str) -> String {
    let cleaned: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    match cleaned.as_str() {
        "" | "." | ".." => "data_source".to_string(),
        _ => cleaned,
    }
}
