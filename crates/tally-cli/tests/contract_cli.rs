#![allow(deprecated)]
use assert_cmd::Command;
use chrono::{DateTime, TimeZone, Utc};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tally_core::{TestResult, TestStatus, TestSuiteResult};
use tempfile::tempdir;

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
}

fn run(hour: u32, statuses: &[TestStatus], secs: i64) -> TestSuiteResult {
    let start = at(hour);
    let results = statuses
        .iter()
        .enumerate()
        .map(|(i, &status)| {
            let mut r = TestResult::new(format!("case_{i}"), "network", status, start)
                .with_duration(Duration::from_millis(400 * (i as u64 + 1)))
                .with_category(if i % 2 == 0 { "unit" } else { "integration" });
            if status == TestStatus::Fail {
                r = r.with_error("boom");
            }
            r
        })
        .collect();
    TestSuiteResult::from_results(
        "network",
        "dev",
        "us-east-1",
        start,
        start + chrono::Duration::seconds(secs),
        results,
    )
}

fn write_json(dir: &Path, name: &str, value: &impl serde::Serialize) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn tally() -> Command {
    let mut cmd = Command::cargo_bin("tally").unwrap();
    cmd.env_remove("TALLY_REPORTS_DIR")
        .env_remove("TALLY_BASE_NAME")
        .env_remove("TALLY_FORMATS")
        .env_remove("TALLY_SLOW_THRESHOLD")
        .env_remove("TALLY_CONFIG")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_report_markdown_to_stdout() {
    let dir = tempdir().unwrap();
    let input = write_json(
        dir.path(),
        "run.json",
        &run(12, &[TestStatus::Pass, TestStatus::Fail], 10),
    );

    tally()
        .args(["report", "--format", "markdown"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# Test Analytics Report\n"))
        .stdout(predicate::str::contains("- **Total Tests**: 2"))
        .stdout(predicate::str::contains("| case_1 | FAIL |"));
}

#[test]
fn test_report_unknown_format_exits_2() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "run.json", &run(12, &[TestStatus::Pass], 1));

    tally()
        .args(["report", "--format", "pdf"])
        .arg(&input)
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported format: pdf"));
}

#[test]
fn test_report_to_file() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "run.json", &run(12, &[TestStatus::Skip], 1));
    let out = dir.path().join("report.xml");

    tally()
        .args(["report", "--format", "junit", "--out"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<skipped/>"));
}

#[test]
fn test_missing_input_exits_4() {
    let dir = tempdir().unwrap();
    tally()
        .args(["metrics"])
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(4)
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_metrics_from_jsonl() {
    let dir = tempdir().unwrap();
    let lines = [
        run(10, &[TestStatus::Pass, TestStatus::Pass], 5),
        run(11, &[TestStatus::Fail, TestStatus::Skip], 5),
    ]
    .iter()
    .map(|s| serde_json::to_string(s).unwrap())
    .collect::<Vec<_>>()
    .join("\n");
    let input = dir.path().join("runs.jsonl");
    fs::write(&input, lines).unwrap();

    let out = tally().arg("metrics").arg(&input).assert().success();
    let v: Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(v["total_suites"], 2);
    assert_eq!(v["total_tests"], 4);
    assert_eq!(v["passed_tests"], 2);
    assert_eq!(v["pass_rate"], 50.0);
}

#[test]
fn test_metrics_empty_input_has_null_rate() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.json");
    fs::write(&input, "").unwrap();

    let out = tally().arg("metrics").arg(&input).assert().success();
    let v: Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(v["total_tests"], 0);
    assert!(v["pass_rate"].is_null());
}

#[test]
fn test_trend_needs_two_runs() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "one.json", &run(12, &[TestStatus::Pass], 1));

    tally()
        .arg("trend")
        .arg(&input)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("insufficient data"));
}

#[test]
fn test_trend_fail_on_regression() {
    let dir = tempdir().unwrap();
    // Later run listed first; the trend orders by start time.
    let later = write_json(
        dir.path(),
        "b.json",
        &run(13, &[TestStatus::Pass, TestStatus::Fail], 20),
    );
    let earlier = write_json(
        dir.path(),
        "a.json",
        &run(12, &[TestStatus::Pass, TestStatus::Pass], 10),
    );

    let out = tally()
        .args(["trend", "--fail-on-regression"])
        .arg(&later)
        .arg(&earlier)
        .assert()
        .code(1);
    let v: Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    assert_eq!(v["regressing"], true);
    assert_eq!(v["improving"], false);
    assert_eq!(v["pass_rate_change"], -50.0);
    assert_eq!(v["duration_change_secs"], 10.0);

    tally().arg("trend").arg(&later).arg(&earlier).assert().success();
}

#[test]
fn test_export_writes_every_requested_format() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "run.json", &run(12, &[TestStatus::Pass], 1));
    let reports = dir.path().join("out").join("reports");

    tally()
        .arg("export")
        .arg("--reports-dir")
        .arg(&reports)
        .args(["--name", "nightly.json", "--format", "json,junit"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("sha256:"));

    let names: Vec<String> = fs::read_dir(&reports)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 2, "{names:?}");
    // Only the suffix matching each format is stripped from the base name.
    let json = names.iter().filter(|n| n.ends_with(".json")).collect::<Vec<_>>();
    let junit = names.iter().filter(|n| n.ends_with(".junit")).collect::<Vec<_>>();
    assert_eq!(json.len(), 1, "{names:?}");
    assert_eq!(junit.len(), 1, "{names:?}");
    assert!(json[0].starts_with("nightly_"), "{names:?}");
    assert!(junit[0].starts_with("nightly.json_"), "{names:?}");

    // Both files share one timestamp.
    let stamp = |name: &str, prefix: &str, ext: &str| {
        name[prefix.len()..name.len() - ext.len()].to_string()
    };
    assert_eq!(
        stamp(json[0].as_str(), "nightly_", ".json"),
        stamp(junit[0].as_str(), "nightly.json_", ".junit")
    );
}

#[test]
fn test_export_reads_config_and_env() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "run.json", &run(12, &[TestStatus::Pass], 1));
    let config = dir.path().join("tally.yaml");
    fs::write(&config, "base_name: weekly\nformats: [markdown, html]\n").unwrap();
    let reports = dir.path().join("env-reports");

    tally()
        .arg("export")
        .arg("--config")
        .arg(&config)
        .env("TALLY_REPORTS_DIR", &reports)
        .env("TALLY_FORMATS", "html")
        .arg(&input)
        .assert()
        .success();

    let names: Vec<String> = fs::read_dir(&reports)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names.len(), 1, "{names:?}");
    assert!(names[0].starts_with("weekly_") && names[0].ends_with(".html"));
}

#[test]
fn test_query_categories_sorted() {
    let dir = tempdir().unwrap();
    let input = write_json(
        dir.path(),
        "run.json",
        &run(12, &[TestStatus::Pass, TestStatus::Pass, TestStatus::Fail], 3),
    );

    tally()
        .args(["query", "categories"])
        .arg(&input)
        .assert()
        .success()
        .stdout("integration\nunit\n");

    tally()
        .args(["query", "packages", "--json"])
        .arg(&input)
        .assert()
        .success()
        .stdout("[\"network\"]\n");
}

#[test]
fn test_query_failed_and_slow() {
    let dir = tempdir().unwrap();
    let input = write_json(
        dir.path(),
        "run.json",
        &run(12, &[TestStatus::Pass, TestStatus::Fail, TestStatus::Pass], 3),
    );

    tally()
        .args(["query", "failed"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("case_1\tFAIL"))
        .stdout(predicate::str::contains("boom"))
        .stdout(predicate::str::contains("case_0").not());

    // Durations are 400ms, 800ms, 1.2s; the bound is strict.
    let out = tally()
        .args(["query", "slow", "--json", "--threshold", "800ms"])
        .arg(&input)
        .assert()
        .success();
    let v: Value = serde_json::from_slice(&out.get_output().stdout).unwrap();
    let names: Vec<&str> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["case_2"]);
}

#[test]
fn test_query_slow_bad_threshold_exits_2() {
    let dir = tempdir().unwrap();
    let input = write_json(dir.path(), "run.json", &run(12, &[TestStatus::Pass], 1));

    tally()
        .args(["query", "slow", "--threshold", "fast"])
        .arg(&input)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration error"));
}
