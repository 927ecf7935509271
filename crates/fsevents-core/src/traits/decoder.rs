//! The external FSEvents decoder as a black-box batch transform.

use std::path::{Path, PathBuf};

use crate::errors::DecodeError;

/// Turns a directory of exported FSEvents logs into a SQLite database.
///
/// Implementations return the path where the database is expected. Whether
/// that file exists and is a database is checked by the caller when it opens
/// it; only process-level failures are reported here.
pub trait Decoder {
    fn decode(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        case_label: &str,
    ) -> Result<PathBuf, DecodeError>;
}
