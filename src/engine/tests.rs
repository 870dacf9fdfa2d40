//! Tests for engine module

use super::*;
use crate::settings::load_settings_from_str;
use std::fs;
use tempfile::{tempdir, TempDir};

const SCENARIO: &str = r#"
directories:
  data: data
  input: input
  output: output
paths:
  input:
    json_file_suffix: "-consumption-data.json"
  output:
    csv_file_suffix: "-consumption.csv"
csv:
  header: [timestamp, consumption]
  date_format: "%Y-%m-%d %H:%M:%S"
  decimal_separator: "."
  empty_columns: 0
  line_terminator: lf
processing:
  consumption_multiplier: 1.0
  decimal_places: 3
"#;

fn workspace(yaml: &str) -> (TempDir, Converter) {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data/input")).unwrap();
    let settings = load_settings_from_str(yaml).unwrap();
    let converter = Converter::new(settings, dir.path()).unwrap();
    (dir, converter)
}

fn write_input(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join("data/input").join(name), body).unwrap();
}

fn read_output(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join("data/output").join(name)).unwrap()
}

const ONE_RECORD: &str = r#"[{"timestamp":"2024-01-15T10:00:00Z","consumption":12.3456}]"#;

// ============================================================================
// RunStats Tests
// ============================================================================

#[test]
fn test_run_stats_counters() {
    let mut stats = RunStats::new();
    stats.add_found();
    stats.add_found();
    stats.add_converted(&FileSummary {
        input: "a.json".into(),
        output: "a.csv".into(),
        rows: 24,
        skipped: 1,
    });
    stats.add_failure("b.json", "bad timestamp");
    stats.set_duration(12);

    assert_eq!(stats.files_found, 2);
    assert_eq!(stats.files_converted, 1);
    assert_eq!(stats.rows_written, 24);
    assert_eq!(stats.records_skipped, 1);
    assert_eq!(stats.files_failed(), 1);
    assert_eq!(stats.failures[0].message, "bad timestamp");
    assert_eq!(stats.duration_ms, 12);
}

// ============================================================================
// Converter Tests
// ============================================================================

#[test]
fn test_converter_single_file() {
    let (dir, converter) = workspace(SCENARIO);
    write_input(&dir, "2024-01-consumption-data.json", ONE_RECORD);

    let stats = converter.run().unwrap();
    assert_eq!(stats.files_converted, 1);
    assert_eq!(stats.rows_written, 1);
    assert_eq!(
        read_output(&dir, "2024-01-consumption.csv"),
        "timestamp,consumption\n2024-01-15 10:00:00,12.346\n"
    );
}

#[test]
fn test_converter_comma_separator() {
    let yaml = SCENARIO.replace("decimal_separator: \".\"", "decimal_separator: \",\"");
    let (dir, converter) = workspace(&yaml);
    write_input(&dir, "2024-01-consumption-data.json", ONE_RECORD);

    converter.run().unwrap();
    assert_eq!(
        read_output(&dir, "2024-01-consumption.csv"),
        "timestamp,consumption\n2024-01-15 10:00:00,12,346\n"
    );
}

#[test]
fn test_converter_missing_input_dir() {
    let dir = tempdir().unwrap();
    let settings = load_settings_from_str(SCENARIO).unwrap();
    let converter = Converter::new(settings, dir.path()).unwrap();

    let err = converter.run().unwrap_err();
    assert!(err.is_fatal());
    assert!(!dir.path().join("data/output").exists());
}

#[test]
fn test_converter_empty_input_dir() {
    let (_dir, converter) = workspace(SCENARIO);
    let stats = converter.run().unwrap();
    assert_eq!(stats.files_found, 0);
    assert_eq!(stats.files_converted, 0);
}

#[test]
fn test_converter_bad_file_does_not_stop_run() {
    let (dir, converter) = workspace(SCENARIO);
    for month in 1..=10 {
        let body = if month == 4 {
            r#"[{"timestamp":"not-a-date","consumption":1.0}]"#.to_string()
        } else {
            ONE_RECORD.to_string()
        };
        write_input(&dir, &format!("2024-{month:02}-consumption-data.json"), &body);
    }

    let stats = converter.run().unwrap();
    assert_eq!(stats.files_found, 10);
    assert_eq!(stats.files_converted, 9);
    assert_eq!(stats.files_failed(), 1);
    assert!(stats.failures[0].path.ends_with("2024-04-consumption-data.json"));

    let outputs = fs::read_dir(dir.path().join("data/output")).unwrap().count();
    assert_eq!(outputs, 9);
    assert!(!dir.path().join("data/output/2024-04-consumption.csv").exists());
}

#[test]
fn test_converter_invalid_json_is_skipped() {
    let (dir, converter) = workspace(SCENARIO);
    write_input(&dir, "2024-01-consumption-data.json", "{ not json");
    write_input(&dir, "2024-02-consumption-data.json", ONE_RECORD);

    let stats = converter.run().unwrap();
    assert_eq!(stats.files_converted, 1);
    assert_eq!(stats.files_failed(), 1);
}

#[test]
fn test_converter_is_idempotent() {
    let (dir, converter) = workspace(SCENARIO);
    write_input(&dir, "2024-01-consumption-data.json", ONE_RECORD);

    converter.run().unwrap();
    let first = fs::read(dir.path().join("data/output/2024-01-consumption.csv")).unwrap();
    converter.run().unwrap();
    let second = fs::read(dir.path().join("data/output/2024-01-consumption.csv")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_converter_skip_record_policy() {
    let yaml = format!("{SCENARIO}  on_record_error: skip_record\n");
    let (dir, converter) = workspace(&yaml);
    write_input(
        &dir,
        "2024-01-consumption-data.json",
        r#"[
            {"timestamp":"2024-01-15T10:00:00Z","consumption":1.0},
            {"timestamp":"bogus","consumption":2.0},
            {"timestamp":"2024-01-15T12:00:00Z","consumption":3.0}
        ]"#,
    );

    let stats = converter.run().unwrap();
    assert_eq!(stats.rows_written, 2);
    assert_eq!(stats.records_skipped, 1);
}

#[test]
fn test_converter_tibber_export() {
    let yaml = r#"
directories: { data: data, input: input, output: output }
paths:
  input: { json_file_prefix: "-Verbrauch.json" }
  output: { csv_file_prefix: "-Verbrauch.csv" }
csv:
  header: [Zeit, Verbrauch]
  date_format: "%Y%m%d:%H"
  decimal_separator: ","
  empty_columns: 1
  delimiter: ";"
processing:
  consumption_multiplier: 1000
"#;
    let (dir, converter) = workspace(yaml);
    write_input(
        &dir,
        "2024-11-Verbrauch.json",
        r#"{"data":{"viewer":{"homes":[{"consumption":{"nodes":[
            {"from":"2024-11-01T00:00:00.000+01:00","to":"2024-11-01T01:00:00.000+01:00","consumption":0.56},
            {"from":"2024-11-01T01:00:00.000+01:00","to":"2024-11-01T02:00:00.000+01:00","consumption":0.456819},
            {"from":"2024-11-01T02:00:00.000+01:00","to":"2024-11-01T03:00:00.000+01:00","consumption":null}
        ]}}]}}}"#,
    );

    converter.run().unwrap();
    assert_eq!(
        read_output(&dir, "2024-11-Verbrauch.csv"),
        "Zeit;Verbrauch;\r\n20241101:00;560,00;\r\n20241101:01;456,82;\r\n20241101:02;0,00;\r\n"
    );
}
