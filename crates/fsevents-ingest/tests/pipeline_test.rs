//! End-to-end runs of FsEventsModule with a fixture decoder.

mod common;

use common::*;
use fsevents_core::constants::MODULE_NAME;
use fsevents_core::errors::{error_code, IngestError};
use fsevents_core::events::types::MessageKind;
use fsevents_core::traits::Cancellable;
use fsevents_core::types::{IngestStatus, FSEVENTS_ATTRIBUTES};
use fsevents_core::CancellationToken;
use fsevents_ingest::{FsEventsModule, MemoryDataSource, ANALYZED_SUBJECT};
use fsevents_storage::SqliteEvidenceStore;

fn two_file_rows() -> Vec<Row> {
    vec![
        row("/Users/alice/report.docx", "Created; Modified", "0000000000a1b2c3", Some("2019-03-01")),
        row("/Users/alice/tmp", "Created", "0000000000a1b2d4", None),
        row("/Users/alice/old.txt", "Removed", "0000000000a1b2d4", None),
    ]
}

#[test]
fn end_to_end_creates_one_record_per_matching_row() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let decoder = FixtureDecoder::new(Output::Database(two_file_rows()));
    let rec = recorder();
    let mut module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        decoder,
        catalog(vec![created_entry(), modified_entry()]),
    );
    module.events_mut().register(rec.clone());

    let report = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::Completed);
    assert_eq!(report.files_located, 2);
    assert_eq!(report.files_exported, 2);
    assert_eq!(report.records_by_type["TSK_FSEVENTS_CREATED"], 2);
    assert_eq!(report.records_by_type["TSK_FSEVENTS_MODIFIED"], 1);
    assert!(report.is_clean(), "unexpected errors: {:?}", report.errors);

    let created = store.artifacts_of_type("TSK_FSEVENTS_CREATED").unwrap();
    assert_eq!(created.len(), 2);
    let mut names: Vec<_> = created.iter().map(|a| a.source_file_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["0000000000a1b2c3", "0000000000a1b2d4"]);

    assert_eq!(rec.exported.load(std::sync::atomic::Ordering::SeqCst), 2);
    assert!(scratch_dirs(temp.path()).is_empty());
}

#[test]
fn single_created_row_becomes_one_record_and_one_notification() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let image = MemoryDataSource::new("diskA")
        .with_file("/.fseventsd", "diskA.fseventsd", b"log".to_vec());
    let entry = fsevents_core::types::CatalogEntry::new(
        "Created",
        "Created",
        "select filename, mask, source, OTHER_DATES from events where mask='Created'",
    );
    let rec = recorder();
    let mut module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::EventsTable(vec![row(
            "/Users/a/file.txt",
            "Created",
            "diskA.fseventsd",
            Some("2018-05-01"),
        )])),
        catalog(vec![entry]),
    );
    module.events_mut().register(rec.clone());

    let report = module
        .process(&image, &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::Completed);
    let created = store.artifacts_of_type("Created").unwrap();
    assert_eq!(created.len(), 1);
    let values: Vec<_> = store
        .attributes_of(fsevents_core::types::ArtifactId(created[0].id))
        .unwrap()
        .into_iter()
        .map(|a| a.value)
        .collect();
    assert_eq!(
        values,
        vec!["/Users/a/file.txt", "Created", "diskA.fseventsd", "2018-05-01"]
    );

    let data = rec.module_data.lock().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].artifact_type, "Created");
    assert_eq!(data[0].record_count, 1);
}

#[test]
fn attributes_carry_row_values_in_order() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(two_file_rows())),
        catalog(vec![created_entry()]),
    );

    module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    let artifacts = store.artifacts_of_type("TSK_FSEVENTS_CREATED").unwrap();
    let first = artifacts
        .iter()
        .find(|a| a.source_file_name == "0000000000a1b2c3")
        .unwrap();
    let attrs = store
        .attributes_of(fsevents_core::types::ArtifactId(first.id))
        .unwrap();

    let type_names: Vec<_> = attrs.iter().map(|a| a.type_name.as_str()).collect();
    let expected: Vec<_> = FSEVENTS_ATTRIBUTES.iter().map(|k| k.name).collect();
    assert_eq!(type_names, expected);
    assert_eq!(attrs[0].value, "/Users/alice/report.docx");
    assert_eq!(attrs[1].value, "Created; Modified");
    assert!(attrs[2].value.ends_with("0000000000a1b2c3"));
    assert_eq!(attrs[3].value, "2019-03-01");
    assert!(attrs.iter().all(|a| a.source == MODULE_NAME));

    let second = artifacts
        .iter()
        .find(|a| a.source_file_name == "0000000000a1b2d4")
        .unwrap();
    let attrs = store
        .attributes_of(fsevents_core::types::ArtifactId(second.id))
        .unwrap();
    assert_eq!(attrs[3].value, "", "NULL dates map to empty text");
}

#[test]
fn one_notification_per_type_and_analyzed_message() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let rec = recorder();
    let removed = fsevents_core::types::CatalogEntry::new(
        "TSK_FSEVENTS_RENAMED",
        "FSEvents Renamed",
        "SELECT filename, mask, source, OTHER_DATES FROM fsevents WHERE mask LIKE '%Renamed%'",
    );
    let mut module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(two_file_rows())),
        catalog(vec![created_entry(), modified_entry(), removed]),
    );
    module.events_mut().register(rec.clone());

    module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    let data = rec.module_data.lock().unwrap();
    assert_eq!(data.len(), 3);
    let renamed = data
        .iter()
        .find(|e| e.artifact_type == "TSK_FSEVENTS_RENAMED")
        .unwrap();
    assert_eq!(renamed.record_count, 0);
    assert!(data.iter().all(|e| e.module_name == MODULE_NAME));

    let messages = rec.messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind, MessageKind::Data);
    assert_eq!(messages[0].subject, ANALYZED_SUBJECT);
}

#[test]
fn missing_decoder_output_finishes_with_no_findings() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let rec = recorder();
    let mut module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Nothing),
        catalog(vec![created_entry()]),
    );
    module.events_mut().register(rec.clone());

    let report = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::NoFindings);
    assert_eq!(module.decoder().calls(), 1);
    assert_eq!(report.total_records(), 0);
    assert_eq!(store.total_artifacts().unwrap(), 0);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].code, error_code::DB_OPEN_FAILED);
    assert!(report.errors[0].message.contains("Could not open database file (not SQLite)"));
    assert_eq!(rec.messages.lock().unwrap().len(), 1);
    assert!(scratch_dirs(temp.path()).is_empty());
}

#[test]
fn garbage_decoder_output_finishes_with_no_findings() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::NotADatabase),
        catalog(vec![created_entry()]),
    );

    let report = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::NoFindings);
    assert!(store.artifact_types().unwrap().is_empty());
}

#[test]
fn cancellation_during_export_skips_decoder() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let token = CancellationToken::new();
    let mut image = MemoryDataSource::new("image5");
    for name in ["01", "02", "03", "04", "05"] {
        image = image.with_file("/.fseventsd", name, name.as_bytes().to_vec());
    }
    let source = CancellingSource::new(image, token.clone(), 2);
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(Vec::new())),
        catalog(vec![created_entry()]),
    );

    let report = module.process(&source, &store, &token).unwrap();

    assert_eq!(report.status, IngestStatus::Cancelled);
    assert_eq!(report.files_exported, 2);
    assert_eq!(report.total_records(), 0);
    assert_eq!(module.decoder().calls(), 0);
    assert!(token.is_cancelled());
    assert!(scratch_dirs(temp.path()).is_empty());
}

#[test]
fn cancelled_run_never_invokes_decoder() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let token = CancellationToken::new();
    token.cancel();
    let decoder = FixtureDecoder::new(Output::Database(Vec::new()));
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        decoder,
        catalog(vec![created_entry()]),
    );

    let report = module.process(&two_log_image(), &store, &token).unwrap();
    assert_eq!(report.status, IngestStatus::Cancelled);
    assert_eq!(report.files_exported, 0);
    assert_eq!(module.decoder().calls(), 0);
    assert_eq!(store.total_artifacts().unwrap(), 0);
}

#[test]
fn slack_files_produce_no_records() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let image = MemoryDataSource::new("slack")
        .with_file("/.fseventsd", "0000000000a1b2c3-slack", b"carved".to_vec());
    let rows = vec![row("/x", "Created", "0000000000a1b2c3-slack", None)];
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(rows)),
        catalog(vec![created_entry()]),
    );

    let report = module
        .process(&image, &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::Completed);
    assert_eq!(report.files_exported, 1);
    assert_eq!(report.records_by_type["TSK_FSEVENTS_CREATED"], 0);
    assert_eq!(store.total_artifacts().unwrap(), 0);
}

#[test]
fn broken_catalog_entry_does_not_stop_the_rest() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let broken = fsevents_core::types::CatalogEntry::new(
        "TSK_FSEVENTS_BROKEN",
        "Broken",
        "SELECT filename, mask, source, OTHER_DATES FROM no_such_table",
    );
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(two_file_rows())),
        catalog(vec![broken, created_entry()]),
    );

    let report = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::Completed);
    assert_eq!(report.records_by_type["TSK_FSEVENTS_CREATED"], 2);
    assert_eq!(report.records_by_type["TSK_FSEVENTS_BROKEN"], 0);
    // One failure per exported file.
    assert_eq!(report.errors.len(), 2);
    assert!(report.errors.iter().all(|e| e.code == error_code::QUERY_FAILED));
    assert!(report.errors[0]
        .context
        .as_deref()
        .unwrap()
        .contains("entry=TSK_FSEVENTS_BROKEN"));
}

#[test]
fn second_run_reuses_registered_types() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(two_file_rows())),
        catalog(vec![created_entry(), modified_entry()]),
    );

    let first = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();
    let second = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(first.status, IngestStatus::Completed);
    assert_eq!(second.status, IngestStatus::Completed);
    assert_ne!(first.run_id, second.run_id);
    assert_eq!(store.artifact_types().unwrap().len(), 2);
    assert_eq!(store.attribute_types().unwrap().len(), FSEVENTS_ATTRIBUTES.len());
}

#[test]
fn decoder_process_failure_is_an_error_and_cleans_up() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let rec = recorder();
    let mut module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::ProcessFailure),
        catalog(vec![created_entry()]),
    );
    module.events_mut().register(rec.clone());

    let err = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap_err();

    assert!(matches!(err, IngestError::Decode(_)));
    assert_eq!(rec.errors.load(std::sync::atomic::Ordering::SeqCst), 1);
    assert!(scratch_dirs(temp.path()).is_empty());
}

#[test]
fn image_without_fseventsd_completes_without_decoding() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let image = MemoryDataSource::new("empty").with_file("/Users", "a.txt", b"a".to_vec());
    let module = FsEventsModule::with_decoder(
        config_in(temp.path()),
        FixtureDecoder::new(Output::Database(Vec::new())),
        catalog(vec![created_entry()]),
    );

    let report = module
        .process(&image, &store, &CancellationToken::new())
        .unwrap();

    assert_eq!(report.status, IngestStatus::Completed);
    assert_eq!(report.files_located, 0);
    assert_eq!(report.total_records(), 0);
    assert_eq!(module.decoder().calls(), 0);
}

#[test]
fn keep_scratch_leaves_exported_files() {
    let temp = tempfile::TempDir::new().unwrap();
    let store = SqliteEvidenceStore::open_in_memory().unwrap();
    let mut config = config_in(temp.path());
    config.scratch.keep_scratch = Some(true);
    let module = FsEventsModule::with_decoder(
        config,
        FixtureDecoder::new(Output::Database(two_file_rows())),
        catalog(vec![created_entry()]),
    );

    let report = module
        .process(&two_log_image(), &store, &CancellationToken::new())
        .unwrap();

    let export = scratch_path(temp.path(), "image1", &report.run_id).join("export");
    assert_eq!(
        std::fs::read(export.join("0000000000a1b2c3")).unwrap(),
        b"log one"
    );
}
