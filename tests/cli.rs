//! CLI-level behavior that does not require the external tools: model
//! listing, and the configuration-error paths that must exit with code 1
//! before any work starts and without creating output files.

use assert_cmd::Command;
use predicates::prelude::*;

fn voxscribe() -> Command {
    Command::cargo_bin("voxscribe").unwrap()
}

#[test]
fn list_models_shows_grouped_table() {
    voxscribe()
        .arg("--list-models")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Whisper Models"))
        .stdout(predicate::str::contains("Tiny Models"))
        .stdout(predicate::str::contains("Large Models"))
        .stdout(predicate::str::contains("tiny"))
        .stdout(predicate::str::contains("large-v3"))
        .stdout(predicate::str::contains("Usage examples"));
}

#[test]
fn unknown_format_exits_one_with_supported_set() {
    let dir = tempfile::tempdir().unwrap();

    voxscribe()
        .args(["-f", "docx", "-o"])
        .arg(dir.path())
        .arg("sample.mp3")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown format 'docx'"))
        .stderr(predicate::str::contains("txt, json, srt, vtt"));

    // No partial output may be left behind on a configuration error.
    assert_eq!(fs_err::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unknown_format_in_comma_list_is_rejected() {
    voxscribe()
        .args(["-f", "txt,csv", "sample.mp3"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown format 'csv'"));
}

#[test]
fn blank_format_spec_exits_one_without_output() {
    let dir = tempfile::tempdir().unwrap();

    voxscribe()
        .args(["-f", "", "-o"])
        .arg(dir.path())
        .arg("sample.mp3")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown format"));

    assert_eq!(fs_err::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unknown_model_exits_one_with_available_models() {
    let dir = tempfile::tempdir().unwrap();

    voxscribe()
        .args(["--model", "invalid-model", "-o"])
        .arg(dir.path())
        .arg("sample.mp3")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown model 'invalid-model'"))
        .stderr(predicate::str::contains("Available models"));

    assert_eq!(fs_err::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn input_is_required_without_list_models() {
    voxscribe().assert().failure();
}

#[test]
fn stdout_conflicts_with_name() {
    voxscribe()
        .args(["--stdout", "-n", "out", "sample.mp3"])
        .assert()
        .failure();
}
