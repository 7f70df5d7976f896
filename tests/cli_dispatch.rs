mod support;

use std::fs;

use langdetect::Command;
use langdetect::cli::{AppError, dispatch, parse_args};
use tempfile::TempDir;

use support::{ScriptedBackend, output_string};

#[test]
fn no_command_does_nothing() {
    let backend = ScriptedBackend::default();
    let options = parse_args(["-d", "profiles", "file.txt"]).unwrap();
    let mut out = Vec::new();

    let ran = dispatch(&options, &backend, std::path::Path::new("."), &mut out).unwrap();

    assert_eq!(ran, None);
    assert!(backend.calls().is_empty());
    assert!(out.is_empty());
}

#[test]
fn genprofile_wins_over_batchtest() {
    let dir = TempDir::new().unwrap();
    let tsv = dir.path().join("test.tsv");
    fs::write(&tsv, "en\ten hello\n").unwrap();
    let corpus = dir.path().to_str().unwrap();

    let backend = ScriptedBackend::default();
    let options = parse_args(["--batchtest", "--genprofile", corpus, "en"]).unwrap();
    let mut out = Vec::new();

    let ran = dispatch(&options, &backend, dir.path(), &mut out).unwrap();

    assert_eq!(ran, Some(Command::GenerateProfile));
    assert_eq!(backend.calls(), [format!("generate {corpus} en")]);
    assert!(dir.path().join("en").exists());
    assert!(out.is_empty());
}

#[test]
fn genprofile_needs_two_positionals() {
    let backend = ScriptedBackend::default();
    let options = parse_args(["--genprofile", "corpus"]).unwrap();
    let mut out = Vec::new();

    let err = dispatch(&options, &backend, std::path::Path::new("."), &mut out).unwrap_err();

    assert!(matches!(err, AppError::MissingArgument { ref arg } if arg == "language name"));
    assert!(backend.calls().is_empty());
}

#[test]
fn model_load_failure_stops_the_command() {
    let dir = TempDir::new().unwrap();
    let tsv = dir.path().join("test.tsv");
    fs::write(&tsv, "en\ten hello\n").unwrap();

    let backend = ScriptedBackend::failing_load();
    let options = parse_args(["--batchtest", tsv.to_str().unwrap()]).unwrap();
    let mut out = Vec::new();

    let err = dispatch(&options, &backend, dir.path(), &mut out).unwrap_err();

    assert!(matches!(err, AppError::ModelLoad(_)));
    assert_eq!(backend.calls().len(), 1);
    assert!(out.is_empty());
}

#[test]
fn options_reach_the_backend() {
    let dir = TempDir::new().unwrap();
    let tsv = dir.path().join("test.tsv");
    fs::write(&tsv, "en\ten hello\n").unwrap();

    let backend = ScriptedBackend::default();
    let options = parse_args([
        "--batchtest",
        "-d",
        "profiles",
        "-s",
        "99",
        "-a",
        "0.1",
        tsv.to_str().unwrap(),
    ])
    .unwrap();
    let mut out = Vec::new();

    dispatch(&options, &backend, dir.path(), &mut out).unwrap();

    assert_eq!(
        backend.calls(),
        ["load profiles Some(99)".to_string(), "create 0.1".to_string()]
    );
    assert_eq!(output_string(out), "en (1/1=1.00): {en=1}\ntotal: 1/1 = 1.000\n");
}

#[test]
fn malformed_numbers_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let tsv = dir.path().join("test.tsv");
    fs::write(&tsv, "en\ten hello\n").unwrap();

    let backend = ScriptedBackend::default();
    let options = parse_args(["--batchtest", "-s", "x", "-a", "y", tsv.to_str().unwrap()]).unwrap();
    let mut out = Vec::new();

    dispatch(&options, &backend, dir.path(), &mut out).unwrap();

    assert_eq!(
        backend.calls(),
        ["load ./ None".to_string(), "create 0.5".to_string()]
    );
}

#[test]
fn batch_run_without_examples_is_an_error() {
    let dir = TempDir::new().unwrap();
    let tsv = dir.path().join("test.tsv");
    fs::write(&tsv, "no tab here\n").unwrap();

    let backend = ScriptedBackend::default();
    let options = parse_args(["--batchtest", tsv.to_str().unwrap()]).unwrap();
    let mut out = Vec::new();

    let err = dispatch(&options, &backend, dir.path(), &mut out).unwrap_err();

    assert!(matches!(err, AppError::NoExamples));
    assert_eq!(output_string(out), "total: 0/0 = no data\n");
}

#[test]
fn missing_option_value_is_rejected_at_parse_time() {
    assert!(parse_args(["--detectlang", "file.txt", "-a"]).is_err());
}
