//! FsEventsModule: the ingest job for one data source.
//!
//! Stages run in order: locate, export, decode, open output, register
//! schema, map, clean up. Each stage's output is the next one's input.

use std::path::PathBuf;
use std::time::Instant;

use fsevents_core::config::FsEventsConfig;
use fsevents_core::constants::MODULE_NAME;
use fsevents_core::errors::{ErrorChain, FsEventsErrorCode, IngestError, MapError};
use fsevents_core::events::types::{
    ErrorEvent, IngestCompleteEvent, IngestMessage, IngestStartedEvent, MessageKind,
    ModuleDataEvent,
};
use fsevents_core::traits::{Cancellable, DataSource, Decoder, EvidenceStore};
use fsevents_core::types::{IngestReport, IngestStatus};
use fsevents_core::EventDispatcher;
use fsevents_storage::catalog::Catalog;
use fsevents_storage::connection::{close_logged, open_verified};

use crate::decoder::ProcessDecoder;
use crate::exporter::export_files;
use crate::locator::locate_with;
use crate::mapper::RecordMapper;
use crate::schema::register_schema;
use crate::scratch::ScratchDir;

/// Subject of the inbox message posted when a run finishes.
pub const ANALYZED_SUBJECT: &str = "MacFSEvents Has Been Analyzed";

/// One configured ingest module. `startup` resolves everything the host
/// environment must provide; `process` may then run once per data source.
pub struct FsEventsModule<D: Decoder = ProcessDecoder> {
    config: FsEventsConfig,
    decoder: D,
    catalog: Catalog,
    events: EventDispatcher,
}

impl FsEventsModule<ProcessDecoder> {
    /// Resolve the decoder executable and load the catalog. Either one
    /// missing is fatal: the module cannot run in this environment.
    pub fn startup(config: FsEventsConfig) -> Result<Self, IngestError> {
        let decoder = ProcessDecoder::from_config(&config.decoder)?;
        let catalog_path = config.catalog_path();
        let catalog = Catalog::load(&catalog_path)?;
        tracing::info!(
            decoder = %decoder.executable().display(),
            catalog = %catalog_path.display(),
            entries = catalog.len(),
            "FSEvents module started"
        );
        Ok(Self::with_decoder(config, decoder, catalog))
    }
}

impl<D: Decoder> FsEventsModule<D> {
    pub fn with_decoder(config: FsEventsConfig, decoder: D, catalog: Catalog) -> Self {
        Self {
            config,
            decoder,
            catalog,
            events: EventDispatcher::new(),
        }
    }

    pub fn config(&self) -> &FsEventsConfig {
        &self.config
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventDispatcher {
        &mut self.events
    }

    /// Run the whole pipeline against one data source.
    ///
    /// Cancellation and an unreadable decoder output end the run early with
    /// `Cancelled` / `NoFindings`; only environment and process failures are
    /// returned as errors. The scratch tree is removed on every path.
    pub fn process(
        &self,
        source: &dyn DataSource,
        store: &dyn EvidenceStore,
        cancel: &dyn Cancellable,
    ) -> Result<IngestReport, IngestError> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("ingest", run_id = %run_id, data_source = source.key());
        let _enter = span.enter();
        let start = Instant::now();

        let mut report = IngestReport::new(&run_id, source.key());
        let mut errors = ErrorChain::new();

        let result = self.run_stages(source, store, cancel, &mut report, &mut errors);
        report.errors = errors.to_reported();

        match result {
            Ok(status) => {
                report.finish(status);
                self.events.emit_ingest_message(&IngestMessage::new(
                    MessageKind::Data,
                    MODULE_NAME,
                    ANALYZED_SUBJECT,
                ));
                self.events.emit_ingest_complete(&IngestCompleteEvent {
                    run_id,
                    status,
                    records: report.total_records(),
                    duration_ms: start.elapsed().as_millis() as u64,
                });
                tracing::info!(
                    status = status.as_str(),
                    records = report.total_records(),
                    errors = report.errors.len(),
                    "ingest finished"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "ingest failed");
                self.events.emit_error(&ErrorEvent {
                    message: e.to_string(),
                    error_code: e.error_code().to_string(),
                });
                Err(e)
            }
        }
    }

    fn run_stages(
        &self,
        source: &dyn DataSource,
        store: &dyn EvidenceStore,
        cancel: &dyn Cancellable,
        report: &mut IngestReport,
        errors: &mut ErrorChain,
    ) -> Result<IngestStatus, IngestError> {
        let files = locate_with(source, &self.config.locator)?;
        report.files_located = files.len();
        self.events.emit_ingest_started(&IngestStartedEvent {
            run_id: report.run_id.clone(),
            data_source: source.key().to_string(),
            file_count: files.len(),
        });

        if files.is_empty() {
            tracing::info!("no FSEvents logs in data source");
            self.notify_module_data(report);
            return Ok(IngestStatus::Completed);
        }

        let scratch = ScratchDir::prepare(
            &self.config.scratch.effective_temp_root(),
            source.key(),
            &report.run_id,
            self.config.scratch.effective_keep_scratch(),
        )?;

        let export = export_files(source, &files, &scratch.export_dir(), cancel, &self.events);
        report.files_exported = export.exported.len();
        errors.extend(export.errors);
        if export.cancelled {
            scratch.cleanup();
            return Ok(IngestStatus::Cancelled);
        }

        let label = self.config.decoder.effective_case_label();
        let db_path = match self
            .decoder
            .decode(&scratch.export_dir(), &scratch.decoded_dir(), label)
        {
            Ok(path) => path,
            Err(e) => {
                scratch.cleanup();
                return Err(e.into());
            }
        };

        let decoded = match open_verified(&db_path) {
            Ok(conn) => conn,
            Err(e) => {
                let err = database_open_error(db_path, e);
                tracing::warn!(error = %err, "decoder output unusable, nothing to map");
                errors.push_with_context(
                    err,
                    fsevents_core::error_context!("open_decoded", "label" => label),
                );
                scratch.cleanup();
                return Ok(IngestStatus::NoFindings);
            }
        };

        let schema = register_schema(store, &self.catalog);
        if !schema.failed.is_empty() {
            tracing::warn!(failed = schema.failed.len(), "some evidence types were not registered");
        }

        let mapped = RecordMapper::new(&decoded, store, MODULE_NAME).map_all(
            &export.exported,
            &self.catalog,
            cancel,
        );
        close_logged(decoded, "decoder output");
        scratch.cleanup();

        report.records_by_type = mapped.records_by_type;
        errors.extend(mapped.errors);
        self.notify_module_data(report);

        Ok(if mapped.cancelled {
            IngestStatus::Cancelled
        } else {
            IngestStatus::Completed
        })
    }

    /// One notification per catalog evidence type, zero counts included.
    fn notify_module_data(&self, report: &IngestReport) {
        for name in self.catalog.type_names() {
            self.events.emit_module_data(&ModuleDataEvent {
                module_name: MODULE_NAME.to_string(),
                artifact_type: name.to_string(),
                record_count: report.records_by_type.get(name).copied().unwrap_or(0),
            });
        }
    }
}

fn database_open_error(path: PathBuf, e: rusqlite::Error) -> MapError {
    MapError::DatabaseOpen {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
