mod support;

use std::fs;

use langdetect::{BatchHarness, batch_test};
use tempfile::TempDir;

use support::{ScriptedBackend, output_string};

use langdetect::ModelLoader;

fn factory() -> support::ScriptedFactory {
    ScriptedBackend::default()
        .load(std::path::Path::new("."), None)
        .expect("scripted load")
}

#[test]
fn skips_malformed_lines_and_reports_per_label() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("test.tsv");
    fs::write(
        &file,
        "en\ten hello world\nfr\tfr bonjour\n\tno label\nnoTabHere\nfr\ten oops\n",
    )
    .unwrap();

    let mut out = Vec::new();
    let report = batch_test(&factory(), &[&file], 0.5, false, &mut out);

    assert_eq!(
        output_string(out),
        "en (1/1=1.00): {en=1}\n\
         fr (1/2=0.50): {en=1, fr=1}\n\
         total: 2/3 = 0.667\n"
    );
    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].examples, 3);
    assert!(report.files[0].error.is_none());
}

#[test]
fn tally_is_cumulative_across_files() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.tsv");
    let b = dir.path().join("b.tsv");
    fs::write(&a, "en\ten one\n").unwrap();
    fs::write(&b, "en\ten two").unwrap();

    let mut out = Vec::new();
    let report = batch_test(&factory(), &[&a, &b], 0.5, false, &mut out);

    assert_eq!(
        output_string(out),
        "en (1/1=1.00): {en=1}\ntotal: 1/1 = 1.000\n\
         en (2/2=1.00): {en=2}\ntotal: 2/2 = 1.000\n"
    );
    assert_eq!(report.files[1].examples, 1);
    assert_eq!(report.files[1].summary.labels[0].total, 2);
    assert_eq!(report.total_examples(), 2);
}

#[test]
fn failing_file_still_reports_and_next_file_runs() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.tsv");
    let good = dir.path().join("good.tsv");
    let missing = dir.path().join("missing.tsv");
    fs::write(&bad, "en\ten first\nen\tFAIL here\nen\ten never\n").unwrap();
    fs::write(&good, "de\tde gut\n").unwrap();

    let mut out = Vec::new();
    let report = batch_test(&factory(), &[&bad, &missing, &good], 0.5, false, &mut out);

    assert_eq!(
        output_string(out),
        "en (1/1=1.00): {en=1}\ntotal: 1/1 = 1.000\n\
         en (1/1=1.00): {en=1}\ntotal: 1/1 = 1.000\n\
         de (1/1=1.00): {de=1}\nen (1/1=1.00): {en=1}\ntotal: 2/2 = 1.000\n"
    );
    assert_eq!(report.files[0].examples, 1);
    assert!(report.files[0].error.is_some());
    assert!(report.files[1].error.is_some());
    assert!(report.files[2].error.is_none());
    assert_eq!(report.errors(), 2);
}

#[test]
fn empty_run_reports_no_data() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("empty.tsv");
    fs::write(&file, "no tabs at all\n\tonly text\n").unwrap();

    let mut out = Vec::new();
    let report = batch_test(&factory(), &[&file], 0.5, false, &mut out);

    // Reported as an explicit state rather than computing 0/0.
    assert_eq!(output_string(out), "total: 0/0 = no data\n");
    assert_eq!(report.total_examples(), 0);
    assert_eq!(report.files[0].summary.rate(), None);
}

#[test]
fn debug_streams_each_example_with_truncated_text() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("long.tsv");
    let long_text = format!("en {}", "é".repeat(150));
    fs::write(&file, format!("en\t{long_text}\n")).unwrap();

    let factory = factory();
    let mut harness = BatchHarness::new(&factory, 0.5, true);
    let mut out = Vec::new();
    harness.run_file(&file, &mut out);

    let output = output_string(out);
    let first = output.lines().next().unwrap();
    let expected: String = long_text.chars().take(100).collect();
    assert_eq!(first, format!("en,en,{expected}"));
    assert_eq!(harness.tally().total(), 1);
}

#[test]
fn one_detector_per_example() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("t.tsv");
    fs::write(&file, "en\ten a\r\nfr\tfr b\r\n").unwrap();

    let backend = ScriptedBackend::default();
    let factory = backend.load(dir.path(), Some(3)).unwrap();
    let mut out = Vec::new();
    let report = batch_test(&factory, &[&file], 0.25, false, &mut out);

    assert_eq!(report.total_examples(), 2);
    assert_eq!(
        backend.calls()[1..],
        ["create 0.25".to_string(), "create 0.25".to_string()]
    );
}

#[test]
fn invalid_utf8_line_does_not_stop_the_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("mixed.tsv");
    fs::write(&file, b"en\ten one\nfr\tfr caf\xe9\nen\ten three\n").unwrap();

    let mut out = Vec::new();
    let report = batch_test(&factory(), &[&file], 0.5, false, &mut out);

    assert!(report.files[0].error.is_none());
    assert_eq!(report.total_examples(), 3);
    assert_eq!(
        output_string(out),
        "en (2/2=1.00): {en=2}\nfr (1/1=1.00): {fr=1}\ntotal: 3/3 = 1.000\n"
    );
}

#[test]
fn carriage_return_alone_ends_a_line() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("mac.tsv");
    fs::write(&file, "en\ten one\rfr\tfr deux\rde\tde drei").unwrap();

    let mut out = Vec::new();
    let report = batch_test(&factory(), &[&file], 0.5, false, &mut out);

    assert_eq!(report.total_examples(), 3);
    assert_eq!(
        output_string(out),
        "de (1/1=1.00): {de=1}\nen (1/1=1.00): {en=1}\nfr (1/1=1.00): {fr=1}\n\
         total: 3/3 = 1.000\n"
    );
}
