use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

fn write_config(dir: &TempDir, contents: &Value) -> PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, serde_json::to_string_pretty(contents).unwrap())
        .expect("failed to write config");
    path
}

fn demo(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argconfig-demo"))
        .args(args)
        .env_remove("ARGCONFIG_LOG")
        .output()
        .expect("failed to run argconfig-demo")
}

fn inspect(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argconfig-inspect"))
        .args(args)
        .env_remove("ARGCONFIG_LOG")
        .output()
        .expect("failed to run argconfig-inspect")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ---------------------------------------------------------------------------
// argconfig-demo
// ---------------------------------------------------------------------------

#[test]
fn demo_prints_resolved_command_line() {
    let output = demo(&[
        "a",
        "b",
        "--main_config1",
        "X",
        "subcommand1",
        "c",
        "d",
        "--sub1_config1",
        "Y",
    ]);
    assert!(output.status.success(), "demo should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["main_args"], json!({"main_arg1": "a", "main_arg2": "b"}));
    assert_eq!(parsed["subcommand"], json!("subcommand1"));
    assert_eq!(parsed["subcommand_args"], json!({"sub1_arg1": "c", "sub1_arg2": "d"}));
    assert_eq!(parsed["config"]["main_config1"], json!("X"));
    assert_eq!(parsed["config"]["sub1_config1"], json!("Y"));
    assert_eq!(parsed["config"]["main_config2"], json!(null));
    assert_eq!(parsed["config"]["global_config1"], json!(null));
    assert_eq!(parsed["config_file"], json!(null));
}

#[test]
fn demo_reads_config_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = write_config(
        &dir,
        &json!({
            "main": {"main_config1": "F1"},
            "global": {"global_config2": "G"},
            "subcommand1": {"sub1_config1": "F2"}
        }),
    );

    let output = demo(&["-c", config.to_str().unwrap(), "a", "b", "subcommand1", "c", "d"]);
    assert!(output.status.success(), "demo should succeed with config file");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["config"]["main_config1"], json!("F1"));
    assert_eq!(parsed["config"]["global_config2"], json!("G"));
    assert_eq!(parsed["config"]["sub1_config1"], json!("F2"));
    assert_eq!(parsed["config_file"], json!(config.to_str().unwrap()));
}

#[test]
fn demo_external_plugin_is_available() {
    let output = demo(&["a", "b", "ex_subcommand1", "c", "d", "--ex1_config1", "on"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["subcommand"], json!("ex_subcommand1"));
}

#[test]
fn demo_missing_required_config_exits_1() {
    let output = demo(&["a", "b", "subcommand2", "c", "d"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error: subcommand2 requires config sub2_config1"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn demo_missing_config_file_exits_1() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let missing = dir.path().join("absent.json");
    let output = demo(&["-c", missing.to_str().unwrap(), "a", "b", "subcommand1", "c", "d"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.json"));
}

#[test]
fn demo_unmarked_module_is_not_a_subcommand() {
    let output = demo(&["a", "b", "util"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn demo_accepts_negative_values_and_subcommand_named_positional() {
    let output = demo(&[
        "subcommand1",
        "b",
        "-m",
        "-5",
        "subcommand1",
        "c",
        "d",
        "--sub1_config1",
        "-1",
    ]);
    assert!(output.status.success(), "demo should succeed");

    let parsed = stdout_json(&output);
    assert_eq!(parsed["main_args"]["main_arg1"], json!("subcommand1"));
    assert_eq!(parsed["subcommand"], json!("subcommand1"));
    assert_eq!(parsed["config"]["main_config2"], json!("-5"));
    assert_eq!(parsed["config"]["sub1_config1"], json!("-1"));
}

#[test]
fn demo_missing_positional_exits_2() {
    let output = demo(&["a", "b", "subcommand1", "c"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn demo_help_lists_subcommands() {
    let output = demo(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["subcommand1", "subcommand2", "ex_subcommand1", "--config"] {
        assert!(stdout.contains(name), "help should mention {name}");
    }
    assert!(!stdout.contains("util"));
}

// ---------------------------------------------------------------------------
// argconfig-inspect
// ---------------------------------------------------------------------------

#[test]
fn inspect_prints_subcommand_config() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = write_config(
        &dir,
        &json!({
            "main": {"main_config1": "F1"},
            "subcommand1": {"sub1_config1": "F2"}
        }),
    );

    let output = inspect(&["subcommand1", "--config", config.to_str().unwrap()]);
    assert!(output.status.success(), "inspect should succeed");
    assert_eq!(
        stdout_json(&output),
        json!({
            "main_config1": "F1",
            "main_config2": null,
            "sub1_config1": "F2",
            "sub1_config2": null,
            "global_config1": null,
            "global_config2": null
        })
    );
}

#[test]
fn inspect_unknown_subcommand_exits_1() {
    let output = inspect(&["nope"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown subcommand: nope"));
}

#[test]
fn inspect_without_file_reports_missing_required() {
    let output = inspect(&["ex_subcommand1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8_lossy(&output.stderr)
            .contains("ex_subcommand1 requires config ex1_config1")
    );
}
