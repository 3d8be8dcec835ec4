// tests/config_loading.rs

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tempfile::NamedTempFile;

use chronystat::config::{ConfigFile, load_and_validate, load_or_default};
use chronystat::errors::ChronyError;
use chronystat::types::Subcommand;
use chronystat_test_utils::builders::RawConfigBuilder;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_loaded_and_typed() {
    let file = write_config(
        r#"
[agent]
interval = 30

[chronyc]
commands = ["tracking", "serverstats", "ntpdata"]
use_sudo = true
path = "/opt/chrony/bin/chronyc"
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.interval, Duration::from_secs(30));
    assert_eq!(
        cfg.collector.commands,
        vec![Subcommand::Tracking, Subcommand::ServerStats, Subcommand::NtpData]
    );
    assert!(cfg.collector.use_sudo);
    assert_eq!(
        cfg.collector.chronyc_path,
        Some(PathBuf::from("/opt/chrony/bin/chronyc"))
    );
}

#[test]
fn empty_file_uses_defaults() {
    let file = write_config("");
    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.interval, Duration::from_secs(10));
    assert_eq!(
        cfg.collector.commands,
        vec![Subcommand::Tracking, Subcommand::Sources, Subcommand::SourceStats]
    );
    assert!(!cfg.collector.use_sudo);
}

#[test]
fn unknown_command_is_rejected() {
    let file = write_config(
        r#"
[chronyc]
commands = ["tracking", "clients"]
"#,
    );

    match load_and_validate(file.path()) {
        Err(ChronyError::UnknownCommand(msg)) => assert!(msg.contains("clients")),
        Err(e) => panic!("Expected UnknownCommand, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn duplicate_command_is_rejected() {
    let raw = RawConfigBuilder::new()
        .commands(&["tracking", "sources", "tracking"])
        .path("chronyc")
        .build();

    match ConfigFile::try_from(raw) {
        Err(ChronyError::ConfigError(msg)) => assert!(msg.contains("more than once")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn empty_command_list_is_rejected() {
    let raw = RawConfigBuilder::new().commands(&[]).path("chronyc").build();
    assert!(matches!(
        ConfigFile::try_from(raw),
        Err(ChronyError::ConfigError(_))
    ));
}

#[test]
fn zero_interval_is_rejected() {
    let raw = RawConfigBuilder::new().interval(0).path("chronyc").build();
    match ConfigFile::try_from(raw) {
        Err(ChronyError::ConfigError(msg)) => assert!(msg.contains("interval")),
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn command_names_must_match_chronyc_spelling() {
    let raw = RawConfigBuilder::new()
        .commands(&["tracking", "sources"])
        .path("chronyc")
        .build();
    let cfg = ConfigFile::try_from(raw).unwrap();
    assert_eq!(
        cfg.collector.commands,
        vec![Subcommand::Tracking, Subcommand::Sources]
    );

    let raw = RawConfigBuilder::new()
        .commands(&["tracking", " Sources "])
        .path("chronyc")
        .build();
    match ConfigFile::try_from(raw) {
        Err(ChronyError::UnknownCommand(msg)) => assert!(msg.contains(" Sources ")),
        other => panic!("Expected UnknownCommand, got: {:?}", other),
    }
}

#[test]
fn invalid_toml_is_a_toml_error() {
    let file = write_config("[chronyc\ncommands = 1");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(ChronyError::TomlError(_))
    ));
}

#[test]
fn explicit_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_or_default(Some(missing.as_path())),
        Err(ChronyError::IoError(_))
    ));
}
