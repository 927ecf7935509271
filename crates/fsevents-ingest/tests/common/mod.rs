//! Shared fixtures for the ingest integration tests.

#![allow(dead_code)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fsevents_core::errors::{DecodeError, LocateError};
use fsevents_core::events::handler::IngestEventHandler;
use fsevents_core::events::types::{IngestMessage, ModuleDataEvent};
use fsevents_core::traits::{Cancellable, DataSource, Decoder};
use fsevents_core::types::{CatalogEntry, DataSourceFile, FilePattern};
use fsevents_core::{CancellationToken, FsEventsConfig};
use fsevents_ingest::decoder::expected_output_path;
use fsevents_ingest::MemoryDataSource;
use fsevents_storage::catalog::Catalog;
use rusqlite::Connection;

/// One decoded row. `source_name` is joined onto the decoder's input
/// directory, like the real decoder records the path it parsed.
#[derive(Debug, Clone)]
pub struct Row {
    pub filename: &'static str,
    pub mask: &'static str,
    pub source_name: &'static str,
    pub dates: Option<&'static str>,
}

pub fn row(
    filename: &'static str,
    mask: &'static str,
    source_name: &'static str,
    dates: Option<&'static str>,
) -> Row {
    Row {
        filename,
        mask,
        source_name,
        dates,
    }
}

/// What the fake decoder leaves in its output directory.
#[derive(Debug, Clone)]
pub enum Output {
    Database(Vec<Row>),
    /// Table `events`, `source` stored as given rather than as a path.
    EventsTable(Vec<Row>),
    Nothing,
    NotADatabase,
    ProcessFailure,
}

/// Stand-in for the external decoder.
pub struct FixtureDecoder {
    output: Output,
    calls: AtomicUsize,
    pub last_input: Mutex<Option<PathBuf>>,
}

impl FixtureDecoder {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Decoder for FixtureDecoder {
    fn decode(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        case_label: &str,
    ) -> Result<PathBuf, DecodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input_dir.to_path_buf());
        let db_path = expected_output_path(output_dir, case_label);

        match &self.output {
            Output::Database(rows) => write_decoded_db(&db_path, "fsevents", Some(input_dir), rows),
            Output::EventsTable(rows) => write_decoded_db(&db_path, "events", None, rows),
            Output::Nothing => {}
            Output::NotADatabase => {
                std::fs::write(&db_path, b"this is not a sqlite file at all, just text").unwrap()
            }
            Output::ProcessFailure => {
                return Err(DecodeError::ProcessFailed {
                    status: "exit status: 1".to_string(),
                    output: db_path,
                })
            }
        }
        Ok(db_path)
    }
}

fn write_decoded_db(path: &Path, table: &str, input_dir: Option<&Path>, rows: &[Row]) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE {table} (
            filename TEXT, mask TEXT, source TEXT, OTHER_DATES TEXT, node_id INTEGER
        );"
    ))
    .unwrap();
    for (i, r) in rows.iter().enumerate() {
        let source = match input_dir {
            Some(dir) => dir.join(r.source_name).display().to_string(),
            None => r.source_name.to_string(),
        };
        conn.execute(
            &format!(
                "INSERT INTO {table} (filename, mask, source, OTHER_DATES, node_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)"
            ),
            rusqlite::params![r.filename, r.mask, source, r.dates, i as i64],
        )
        .unwrap();
    }
}

/// Collects notifications and inbox messages.
#[derive(Default)]
pub struct Recorder {
    pub module_data: Mutex<Vec<ModuleDataEvent>>,
    pub messages: Mutex<Vec<IngestMessage>>,
    pub exported: AtomicUsize,
    pub errors: AtomicUsize,
}

impl IngestEventHandler for Recorder {
    fn on_file_exported(&self, _event: &fsevents_core::events::types::FileExportedEvent) {
        self.exported.fetch_add(1, Ordering::SeqCst);
    }

    fn on_module_data(&self, event: &ModuleDataEvent) {
        self.module_data.lock().unwrap().push(event.clone());
    }

    fn on_ingest_message(&self, event: &IngestMessage) {
        self.messages.lock().unwrap().push(event.clone());
    }

    fn on_error(&self, _event: &fsevents_core::events::types::ErrorEvent) {
        self.errors.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn recorder() -> Arc<Recorder> {
    Arc::new(Recorder::default())
}

/// A data source that cancels the job once `after` files have been opened.
pub struct CancellingSource {
    inner: MemoryDataSource,
    token: CancellationToken,
    after: usize,
    opened: AtomicUsize,
}

impl CancellingSource {
    pub fn new(inner: MemoryDataSource, token: CancellationToken, after: usize) -> Self {
        Self {
            inner,
            token,
            after,
            opened: AtomicUsize::new(0),
        }
    }
}

impl DataSource for CancellingSource {
    fn key(&self) -> &str {
        self.inner.key()
    }

    fn find_files(&self, pattern: &FilePattern) -> Result<Vec<DataSourceFile>, LocateError> {
        self.inner.find_files(pattern)
    }

    fn open(&self, file: &DataSourceFile) -> std::io::Result<Box<dyn Read + '_>> {
        let opened = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        if opened >= self.after {
            self.token.cancel();
        }
        self.inner.open(file)
    }
}

pub const CREATED_QUERY: &str =
    "SELECT filename, mask, source, OTHER_DATES FROM fsevents WHERE mask LIKE '%Created%';";
pub const MODIFIED_QUERY: &str =
    "SELECT filename, mask, source, OTHER_DATES FROM fsevents WHERE mask LIKE '%Modified%'";

pub fn created_entry() -> CatalogEntry {
    CatalogEntry::new("TSK_FSEVENTS_CREATED", "FSEvents Created", CREATED_QUERY)
}

pub fn modified_entry() -> CatalogEntry {
    CatalogEntry::new("TSK_FSEVENTS_MODIFIED", "FSEvents Modified", MODIFIED_QUERY)
}

pub fn catalog(entries: Vec<CatalogEntry>) -> Catalog {
    Catalog::from_entries(entries)
}

/// Config whose scratch tree lives under `temp_root`.
pub fn config_in(temp_root: &Path) -> FsEventsConfig {
    let mut config = FsEventsConfig::default();
    config.scratch.temp_root = Some(temp_root.to_path_buf());
    config.decoder.case_label = Some("Case1".to_string());
    config
}

/// Where the scratch tree for one run over `key` would be.
pub fn scratch_path(temp_root: &Path, key: &str, run_id: &str) -> PathBuf {
    temp_root.join("MacFSEvents").join(format!("{key}-{run_id}"))
}

/// Scratch trees still present under `temp_root`.
pub fn scratch_dirs(temp_root: &Path) -> Vec<PathBuf> {
    match std::fs::read_dir(temp_root.join("MacFSEvents")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

/// An image with two logs and the usual bookkeeping entries.
pub fn two_log_image() -> MemoryDataSource {
    MemoryDataSource::new("image1")
        .with_file("/.fseventsd", "0000000000a1b2c3", b"log one".to_vec())
        .with_file("/.fseventsd", "0000000000a1b2d4", b"log two".to_vec())
        .with_file("/.fseventsd", "fseventsd-uuid", b"uuid".to_vec())
        .with_file("/Users/alice", "notes.txt", b"unrelated".to_vec())
}
