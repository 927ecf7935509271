//! Tests for the layered configuration.

use std::path::PathBuf;
use std::sync::Mutex;

use fsevents_core::config::{CliOverrides, FsEventsConfig};
use fsevents_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear FSEVENTS_ vars and point HOME at an empty directory so a developer's
/// own user config never leaks into a test.
fn isolate_env(home: &std::path::Path) {
    for key in [
        "FSEVENTS_DECODER",
        "FSEVENTS_MODULE_DIR",
        "FSEVENTS_CASE_LABEL",
        "FSEVENTS_TEMP_ROOT",
        "FSEVENTS_KEEP_SCRATCH",
        "FSEVENTS_CATALOG",
    ] {
        std::env::remove_var(key);
    }
    std::env::set_var("HOME", home);
    std::env::remove_var("USERPROFILE");
}

#[test]
fn defaults_without_any_layer() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let root = tempdir();
    let config = FsEventsConfig::load(root.path(), None).unwrap();
    assert_eq!(config.decoder.effective_case_label(), "Autopsy");
    assert!(!config.scratch.effective_keep_scratch());
    let pattern = config.locator.effective_pattern();
    assert_eq!(pattern.name_glob, "*");
    assert_eq!(pattern.parent_contains.as_deref(), Some(".fseventsd"));
    assert_eq!(
        config.catalog_path(),
        PathBuf::from(".").join("fsevents_sql.db3")
    );
}

#[test]
fn layer_resolution_cli_over_env_over_project_over_user() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    std::fs::create_dir_all(home.path().join(".fsevents")).unwrap();
    std::fs::write(
        home.path().join(".fsevents").join("config.toml"),
        r#"
[decoder]
case_label = "UserLabel"
module_dir = "/opt/user-modules"

[scratch]
keep_scratch = true
"#,
    )
    .unwrap();

    let root = tempdir();
    std::fs::write(
        root.path().join("fsevents.toml"),
        r#"
[decoder]
case_label = "ProjectLabel"

[locator]
parent_pattern = ".FSEVENTSD"
"#,
    )
    .unwrap();

    std::env::set_var("FSEVENTS_CASE_LABEL", "EnvLabel");
    std::env::set_var("FSEVENTS_TEMP_ROOT", "/var/tmp/env-root");

    let cli = CliOverrides {
        temp_root: Some(PathBuf::from("/cli/root")),
        ..Default::default()
    };
    let config = FsEventsConfig::load(root.path(), Some(&cli)).unwrap();

    // user layer survives where nothing overrides it
    assert_eq!(
        config.decoder.module_dir,
        Some(PathBuf::from("/opt/user-modules"))
    );
    assert!(config.scratch.effective_keep_scratch());
    // project overrides user, env overrides project
    assert_eq!(config.decoder.effective_case_label(), "EnvLabel");
    assert_eq!(
        config.locator.effective_pattern().parent_contains.as_deref(),
        Some(".FSEVENTSD")
    );
    // cli overrides env
    assert_eq!(config.scratch.effective_temp_root(), PathBuf::from("/cli/root"));

    isolate_env(home.path());
}

#[test]
fn invalid_project_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let home = tempdir();
    isolate_env(home.path());

    let root = tempdir();
    std::fs::write(root.path().join("fsevents.toml"), "[decoder\ncase_label = ").unwrap();
    let err = FsEventsConfig::load(root.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn case_label_with_separator_is_rejected() {
    let config = FsEventsConfig::from_toml(
        r#"
[decoder]
case_label = "../escape"
"#,
    )
    .unwrap();
    let err = FsEventsConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "decoder.case_label"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_name_pattern_is_rejected() {
    let config = FsEventsConfig::from_toml("[locator]\nname_pattern = \"\"\n").unwrap();
    assert!(FsEventsConfig::validate(&config).is_err());
}

#[test]
fn extra_excluded_names_extend_structural_names() {
    let config = FsEventsConfig::from_toml(
        r#"
[locator]
extra_excluded_names = ["README"]
"#,
    )
    .unwrap();
    let excluded = config.locator.excluded_names();
    for name in [".", "..", "fseventsd-uuid", "README"] {
        assert!(excluded.iter().any(|n| n == name), "missing {name}");
    }
}

#[test]
fn toml_roundtrip_preserves_values() {
    let mut config = FsEventsConfig::default();
    config.decoder.case_label = Some("CaseA".to_string());
    config.catalog.path = Some(PathBuf::from("/srv/catalog.db3"));
    let text = config.to_toml().unwrap();
    let back = FsEventsConfig::from_toml(&text).unwrap();
    assert_eq!(back.decoder.effective_case_label(), "CaseA");
    assert_eq!(back.catalog_path(), PathBuf::from("/srv/catalog.db3"));
}
