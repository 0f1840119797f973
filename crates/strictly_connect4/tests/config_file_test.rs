//! Tests for loading engine configuration from TOML files.

use std::io::Write;
use std::time::Duration;
use strictly_connect4::{DropError, EngineConfig, Phase, TurnEngine};

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_custom_board() {
    let file = write_config(
        r#"
width = 9
height = 7
run_length = 5
restart_delay_secs = 2.5
"#,
    );

    let config = EngineConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(*config.width(), 9);
    assert_eq!(*config.height(), 7);
    assert_eq!(*config.run_length(), 5);
    assert_eq!(config.restart_delay(), Duration::from_millis(2500));

    let mut engine = TurnEngine::new(config);
    assert!(engine.request_drop(8).unwrap().is_accepted());
    assert!(matches!(engine.phase(), Phase::Dropping { row: 6, .. }));
    assert_eq!(
        engine.request_drop(9),
        Err(DropError::InvalidColumn { column: 9, width: 9 })
    );
}

#[test]
fn test_empty_file_is_classic() {
    let file = write_config("");
    let config = EngineConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let file = write_config("width = 3\nheight = 3\nrun_length = 4\n");
    let err = EngineConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("cannot fit"));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = EngineConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
}
