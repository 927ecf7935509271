//! Exporter: copy located files out of the data source into scratch.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use fsevents_core::errors::{ErrorChain, ExportError};
use fsevents_core::events::types::FileExportedEvent;
use fsevents_core::traits::{Cancellable, DataSource};
use fsevents_core::types::{DataSourceFile, SourceFile};
use fsevents_core::EventDispatcher;

const COPY_BUFFER: usize = 64 * 1024;

/// What the export stage produced.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    /// Files written to scratch, in input order.
    pub exported: Vec<SourceFile>,
    /// Cancellation was observed before every file was attempted.
    pub cancelled: bool,
    /// Per-file failures; the files involved were skipped.
    pub errors: ErrorChain,
}

/// Copy each file's content into `dest_dir`.
///
/// Cancellation is polled before every file. A file that cannot be read or
/// written is recorded and skipped.
pub fn export_files(
    source: &dyn DataSource,
    files: &[DataSourceFile],
    dest_dir: &Path,
    cancel: &dyn Cancellable,
    events: &EventDispatcher,
) -> ExportOutcome {
    let mut outcome = ExportOutcome::default();
    let mut used_names = HashSet::new();
    let total = files.len();

    for (index, file) in files.iter().enumerate() {
        if cancel.is_cancelled() {
            tracing::info!(processed = index, total, "export cancelled");
            outcome.cancelled = true;
            return outcome;
        }

        let local_name = local_name_for(file, &mut used_names);
        let dest = dest_dir.join(&local_name);
        match export_one(source, file, &dest) {
            Ok((size, digest)) => {
                tracing::debug!(file = %file.origin_path(), size, digest = %digest, "exported");
                outcome.exported.push(SourceFile {
                    file: file.clone(),
                    local_path: dest,
                    size,
                    digest,
                });
            }
            Err(e) => {
                tracing::warn!(file = %file.origin_path(), error = %e, "export failed, skipping file");
                let context = fsevents_core::error_context!(
                    "export",
                    "file" => file.origin_path(),
                    "id" => file.id.to_string(),
                );
                outcome.errors.push_with_context(e, context);
            }
        }

        events.emit_file_exported(&FileExportedEvent {
            name: file.name.clone(),
            processed: index + 1,
            total,
        });
    }

    outcome
}

/// The file's own name, or `<id>-<name>` when the name is already taken in
/// this run. Either way the original name stays a suffix, which is what the
/// mapper's source filter relies on.
fn local_name_for(file: &DataSourceFile, used: &mut HashSet<String>) -> String {
    let base = file.name.replace(['/', '\\'], "_");
    let name = if used.contains(&base.to_lowercase()) {
        format!("{}-{}", file.id, base)
    } else {
        base
    };
    used.insert(name.to_lowercase());
    name
}

/// Stream one file to `dest`, hashing as it goes.
fn export_one(
    source: &dyn DataSource,
    file: &DataSourceFile,
    dest: &Path,
) -> Result<(u64, String), ExportError> {
    let write_err = |source: io::Error| ExportError::Write {
        file: file.origin_path(),
        path: dest.to_path_buf(),
        source,
    };

    let mut reader = source.open(file).map_err(write_err)?;
    let mut out = File::create(dest).map_err(write_err)?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; COPY_BUFFER];
    let mut size = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(write_err(e)),
        };
        hasher.update(&buf[..n]);
        out.write_all(&buf[..n]).map_err(write_err)?;
        size += n as u64;
    }
    out.flush().map_err(write_err)?;

    Ok((size, hasher.finalize().to_hex().to_string()))
}
