//! ProcessDecoder: runs the external FSEvents parser as a child process.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use fsevents_core::config::DecoderConfig;
use fsevents_core::constants::DECODER_OUTPUT_SUFFIX;
use fsevents_core::errors::DecodeError;
use fsevents_core::traits::Decoder;

/// Where the decoder writes its database for a given case label.
pub fn expected_output_path(output_dir: &Path, case_label: &str) -> PathBuf {
    output_dir.join(format!("{case_label}{DECODER_OUTPUT_SUFFIX}"))
}

/// The external decoder, invoked as `<exe> -c <label> -o <out> -s <in>`.
#[derive(Debug, Clone)]
pub struct ProcessDecoder {
    executable: PathBuf,
}

impl ProcessDecoder {
    /// Fails with `ExecutableNotFound` if `executable` is not a file.
    pub fn new(executable: impl Into<PathBuf>) -> Result<Self, DecodeError> {
        let executable = executable.into();
        if !executable.is_file() {
            return Err(DecodeError::ExecutableNotFound { path: executable });
        }
        Ok(Self { executable })
    }

    /// Resolve the executable from config: the explicit path if set, else
    /// the platform decoder inside the module directory.
    pub fn from_config(config: &DecoderConfig) -> Result<Self, DecodeError> {
        Self::new(config.effective_executable())
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Decoder for ProcessDecoder {
    fn decode(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        case_label: &str,
    ) -> Result<PathBuf, DecodeError> {
        tracing::info!(
            executable = %self.executable.display(),
            input = %input_dir.display(),
            output = %output_dir.display(),
            "running FSEvents decoder"
        );

        // Blocks until the child exits.
        let output = Command::new(&self.executable)
            .arg("-c")
            .arg(case_label)
            .arg("-o")
            .arg(output_dir)
            .arg("-s")
            .arg(input_dir)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => DecodeError::ExecutableNotFound {
                    path: self.executable.clone(),
                },
                _ => DecodeError::Spawn {
                    path: self.executable.clone(),
                    source: e,
                },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stdout.trim().is_empty() {
            tracing::debug!(stdout = %stdout.trim_end(), "decoder output");
        }
        if !stderr.trim().is_empty() {
            tracing::debug!(stderr = %stderr.trim_end(), "decoder diagnostics");
        }

        let db_path = expected_output_path(output_dir, case_label);
        if !output.status.success() {
            tracing::warn!(status = %output.status, "decoder exited unsuccessfully");
            if !db_path.exists() {
                return Err(DecodeError::ProcessFailed {
                    status: output.status.to_string(),
                    output: db_path,
                });
            }
        }

        tracing::info!(database = %db_path.display(), "decoder finished");
        Ok(db_path)
    }
}
