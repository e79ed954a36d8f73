use std::io::Write;
use std::path::Path;

use argconfig_config::{ConfigFile, ConfigFileError, load_config};
use serde_json::json;
use tempfile::NamedTempFile;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_config(raw: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(raw.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_and_resolve_from_disk() {
    let file = write_config(
        r#"{
            "main": {"main_config1": "F1", "shared": "main"},
            "global": {"global_config1": "G1", "shared": "global"},
            "subcommand1": {"sub1_config1": "F2", "shared": "sub"}
        }"#,
    );

    let config = load_config(file.path(), Some("subcommand1")).unwrap();
    assert_eq!(config["main_config1"], json!("F1"));
    assert_eq!(config["global_config1"], json!("G1"));
    assert_eq!(config["sub1_config1"], json!("F2"));
    assert_eq!(config["shared"], json!("sub"));
}

#[test]
fn test_same_file_resolves_per_subcommand() {
    let file = write_config(
        r#"{"subcommand1": {"k": 1}, "subcommand2": {"k": 2}}"#,
    );
    let loaded = ConfigFile::load(file.path()).unwrap();

    assert_eq!(loaded.resolve(Some("subcommand1")).unwrap()["k"], json!(1));
    assert_eq!(loaded.resolve(Some("subcommand2")).unwrap()["k"], json!(2));
    assert_eq!(loaded.path(), file.path());
}

#[test]
fn test_non_string_values_kept() {
    let file = write_config(r#"{"main": {"n": 3, "b": true, "z": null}}"#);
    let config = load_config(file.path(), None).unwrap();

    assert_eq!(config["n"], json!(3));
    assert_eq!(config["b"], json!(true));
    assert_eq!(config["z"], json!(null));
}

#[test]
fn test_empty_object_gives_empty_map() {
    let file = write_config("{}");
    let config = load_config(file.path(), Some("subcommand1")).unwrap();
    assert!(config.is_empty());
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = load_config(&path, None).unwrap_err();
    assert!(matches!(err, ConfigFileError::Io { .. }));
    assert_eq!(err.path(), path.as_path());
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_invalid_json_is_json_error() {
    let file = write_config("{ not json");
    let err = load_config(file.path(), None).unwrap_err();
    assert!(matches!(err, ConfigFileError::Json { .. }));
    assert_eq!(err.path(), file.path());
}

#[test]
fn test_top_level_array_is_shape_error() {
    let file = write_config("[1, 2, 3]");
    let err = ConfigFile::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigFileError::Shape { .. }));
    assert!(Path::new(err.path()).exists());
}
