//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DEFINITION: &str = "../../assessments/korean-diagnostic-v1.json";
const RESPONSES: &str = "../../assessments/sample-responses.json";

fn sklc() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sklc").unwrap();
    cmd.env_remove("SKLC_DEFINITION").env_remove("RUST_LOG");
    cmd
}

fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn help_output() {
    sklc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Korean speaking diagnostic scoring engine"));
}

#[test]
fn version_output() {
    sklc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sklc"));
}

#[test]
fn validate_fixture_definition() {
    sklc()
        .arg("validate")
        .arg("--definition")
        .arg(DEFINITION)
        .assert()
        .success()
        .stdout(predicate::str::contains("10 items, 5 domains"))
        .stdout(predicate::str::contains("Definition is valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gappy.json");
    std::fs::write(
        &path,
        r#"{
  "title": "Gappy",
  "domains": ["grammar", "listening"],
  "items": [
    {"id": "g1", "domains": {"grammar": 1.0},
     "scoring": {"response_type": "text", "method": "heuristic_v0"}}
  ],
  "aggregation": {"banding": {"bands": [
    {"band": 0, "min_score": 0.0, "max_score": 0.3},
    {"band": 1, "min_score": 0.31, "max_score": 1.0}
  ]}}
}"#,
    )
    .unwrap();

    sklc()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[g1] WARNING: unknown scoring method heuristic_v0"))
        .stdout(predicate::str::contains("domain listening has no contributing items"))
        .stdout(predicate::str::contains("scores between 0.3 and 0.31 match no band"))
        .stdout(predicate::str::contains("3 warning(s) found."));
}

#[test]
fn validate_nonexistent_file() {
    sklc()
        .arg("validate")
        .arg("--definition")
        .arg("nonexistent.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_rejects_unsupported_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("definition.yaml");
    std::fs::write(&path, "title: nope\n").unwrap();

    sklc()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported definition format: yaml"));
}

#[test]
fn validate_rejects_duplicate_items() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dup.json");
    std::fs::write(
        &path,
        r#"{"title": "Dup", "domains": ["grammar"], "items": [
            {"id": "g1", "domains": {"grammar": 1.0}},
            {"id": "g1", "domains": {"grammar": 1.0}}
        ]}"#,
    )
    .unwrap();

    sklc()
        .arg("validate")
        .arg("--definition")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("g1"));
}

#[test]
fn score_prints_table() {
    sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .assert()
        .success()
        .stdout(predicate::str::contains("Korean Speaking Diagnostic v1"))
        .stdout(predicate::str::contains("grammar"))
        .stdout(predicate::str::contains("0.657"))
        .stdout(predicate::str::contains("Global stage: 3 (SKLC Level 3)"));
}

#[test]
fn score_in_korean() {
    sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .arg("--lang")
        .arg("ko")
        .assert()
        .success()
        .stdout(predicate::str::contains("익숙한 주제"));
}

#[test]
fn score_prints_json_result() {
    let output = sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["global_stage"], 3);
    assert_eq!(result["domain_bands"]["grammar"], 3);
    assert_eq!(result["domain_bands"]["vocabulary"], 2);
    assert_eq!(result["item_scores"]["a2"], 0.5);
    assert_eq!(result["domain_raw_scores"].as_object().unwrap().len(), 5);
}

#[test]
fn score_prints_markdown() {
    sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .arg("--format")
        .arg("markdown")
        .assert()
        .success()
        .stdout(predicate::str::contains("| Domain | Raw score | Band |"))
        .stdout(predicate::str::contains("| pragmatics | 0.750 | 3 |"));
}

#[test]
fn score_rejects_unknown_format() {
    sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .arg("--format")
        .arg("xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: xml"));
}

#[test]
fn score_writes_report() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("results");

    sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to:"));

    let reports: Vec<_> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1);
    let name = reports[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("score-") && name.ends_with(".json"), "{name}");

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&reports[0]).unwrap()).unwrap();
    assert_eq!(report["assessment"]["item_count"], 10);
    assert_eq!(report["level"]["level"], "SKLC Level 3");
    assert_eq!(report["result"]["global_stage"], 3);
}

#[test]
fn score_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("sklc.toml"),
        format!(
            "default_definition = {:?}\ndefault_language = \"ko\"\noutput_dir = \"reports\"\n",
            fixture(DEFINITION).display().to_string()
        ),
    )
    .unwrap();

    sklc()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("score")
        .arg("--responses")
        .arg(fixture(RESPONSES))
        .arg("--output")
        .assert()
        .success()
        .stdout(predicate::str::contains("익숙한 주제"));

    assert_eq!(std::fs::read_dir(dir.path().join("reports")).unwrap().count(), 1);
}

#[test]
fn score_uses_definition_from_env() {
    let dir = TempDir::new().unwrap();

    sklc()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .env("SKLC_DEFINITION", fixture(DEFINITION))
        .arg("score")
        .arg("--responses")
        .arg(fixture(RESPONSES))
        .assert()
        .success()
        .stdout(predicate::str::contains("Global stage: 3"));
}

#[test]
fn score_without_definition_fails() {
    let dir = TempDir::new().unwrap();

    sklc()
        .current_dir(dir.path())
        .env("HOME", dir.path())
        .arg("score")
        .arg("--responses")
        .arg(fixture(RESPONSES))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no definition given"));
}

#[test]
fn score_with_missing_config_fails() {
    sklc()
        .arg("score")
        .arg("--definition")
        .arg(DEFINITION)
        .arg("--responses")
        .arg(RESPONSES)
        .arg("--config")
        .arg("no_such_config.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn describe_stage() {
    sklc()
        .arg("describe")
        .arg("--stage")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("SKLC Level 2"))
        .stdout(predicate::str::contains("simple everyday conversations"));
}

#[test]
fn describe_in_korean_as_json() {
    let output = sklc()
        .arg("describe")
        .arg("--stage")
        .arg("1")
        .arg("--lang")
        .arg("ko")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let level: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(level["level"], "SKLC Level 1");
    assert!(level["description"].as_str().unwrap().contains("자기소개"));
}

#[test]
fn describe_unknown_stage_falls_back() {
    sklc()
        .arg("describe")
        .arg("--stage")
        .arg("9")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pre-SKLC"));
}

#[test]
fn describe_rejects_unknown_language() {
    sklc()
        .arg("describe")
        .arg("--stage")
        .arg("1")
        .arg("--lang")
        .arg("ja")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown language"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    sklc()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created sklc.toml"))
        .stdout(predicate::str::contains("Created assessments/example.json"));

    assert!(dir.path().join("sklc.toml").exists());
    assert!(dir.path().join("assessments/example.json").exists());

    sklc()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--definition")
        .arg("assessments/example.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Definition is valid."));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    // First init
    sklc().current_dir(dir.path()).arg("init").assert().success();

    // Second init should skip
    sklc()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}
