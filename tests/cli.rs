//! End-to-end CLI tests over the survey fixture.

use std::{fs, path::PathBuf};

use assert_cmd::Command;
use predicates::{prelude::*, str::contains};
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("avaliacao_2024.csv")
}

fn bin() -> Command {
    Command::cargo_bin("survey-tally").expect("binary exists")
}

#[test]
fn tally_reports_counts_and_percentages() {
    bin()
        .args(["tally", "-i", fixture_path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("A comunicação com a equipe gestora é eficaz?"))
        .stdout(contains("62.5%"))
        .stdout(contains("Não informado"));
}

#[test]
fn tally_applies_role_filter() {
    // Professors answered Q1 with Sim twice, Não once, one blank.
    bin()
        .args([
            "tally",
            "-i",
            fixture_path().to_str().unwrap(),
            "-C",
            "A comunicação com a equipe gestora é eficaz?",
            "--role",
            "Professor",
        ])
        .assert()
        .success()
        .stdout(contains("50.0%"))
        .stdout(contains("25.0%"));
}

#[test]
fn tally_top_truncates_per_column() {
    bin()
        .args([
            "tally",
            "-i",
            fixture_path().to_str().unwrap(),
            "--top",
            "1",
        ])
        .assert()
        .success()
        .stdout(contains("Não"))
        .stdout(contains("Sim").not());
}

#[test]
fn tally_writes_csv_output() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("tally.csv");
    bin()
        .args([
            "tally",
            "-i",
            fixture_path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success();

    let written = fs::read_to_string(&output).expect("read output");
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("\"column\",\"value\",\"count\",\"percent\"")
    );
    assert!(written.contains("\"Sim\",\"5\",\"62.5\""));
}

#[test]
fn tally_json_is_machine_readable() {
    let assert = bin()
        .args([
            "tally",
            "-i",
            fixture_path().to_str().unwrap(),
            "-C",
            "Os recursos pedagógicos são adequados?",
            "--json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8");
    let entries: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 3);
    let total: u64 = entries
        .iter()
        .map(|entry| entry["count"].as_u64().expect("count"))
        .sum();
    assert_eq!(total, 8);
}

#[test]
fn tally_rejects_unknown_column() {
    bin()
        .args([
            "tally",
            "-i",
            fixture_path().to_str().unwrap(),
            "-C",
            "does not exist",
        ])
        .assert()
        .failure()
        .stderr(contains("not found"));
}

#[test]
fn summary_counts_filtered_responses() {
    bin()
        .args([
            "summary",
            "-i",
            fixture_path().to_str().unwrap(),
            "--school",
            "EMEI Cecília Meireles",
        ])
        .assert()
        .success()
        .stdout(contains("responses"))
        .stdout(contains("Distribution by role"));
}

#[test]
fn inspect_labels_each_column() {
    bin()
        .args(["inspect", "-i", fixture_path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("Você atua como:"))
        .stdout(contains("role"))
        .stdout(contains("school"))
        .stdout(contains("question"));
}

#[test]
fn inspect_json_reports_classification() {
    let assert = bin()
        .args(["inspect", "-i", fixture_path().to_str().unwrap(), "--json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf-8");
    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(report["role_column"], "Você atua como:");
    assert_eq!(report["school_column"], "Unidade Escolar:");
    assert_eq!(report["row_count"], 8);
    assert_eq!(report["dropped_rows"], 0);
}

#[test]
fn preview_reads_csv_from_stdin() {
    bin()
        .args(["preview", "-i", "-"])
        .write_stdin("Papel,Escola,Q1\nProfessor,EscolaA,Sim\n")
        .assert()
        .success()
        .stdout(contains("Papel"))
        .stdout(contains("Professor"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("responses.txt");
    fs::write(&input, "a,b\n1,2\n").expect("write file");

    bin()
        .args(["summary", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("unsupported file extension"));
}

#[test]
fn empty_csv_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("empty.csv");
    fs::write(&input, "").expect("write file");

    bin()
        .args(["tally", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("no usable rows"));
}

#[test]
fn corrupt_workbook_is_rejected() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("broken.xlsx");
    fs::write(&input, b"this is not a zip archive").expect("write file");

    bin()
        .args(["inspect", "-i", input.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(contains("Loading survey"));
}

#[test]
fn malformed_lines_surface_in_summary() {
    let dir = tempdir().expect("temp dir");
    let input = dir.path().join("ragged.csv");
    fs::write(&input, "Papel,Escola,Q1\nProfessor,EscolaA,Sim\nDiretor,EscolaB\n")
        .expect("write file");

    bin()
        .args(["summary", "-i", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(contains("dropped malformed rows"))
        .stdout(contains("1"));
}
