//! Tests for validate module

use super::*;
use crate::settings::load_settings_from_str;
use chrono::{Duration, NaiveDate};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const SETTINGS: &str = r#"
directories: { data: data, input: input, output: output }
paths:
  input: { json_file_suffix: ".json" }
  output: { csv_file_suffix: ".csv" }
csv:
  header: [timestamp, power]
  date_format: "%Y-%m-%d %H:%M:%S"
  decimal_separator: ","
"#;

fn setup(yaml: &str) -> (TempDir, CsvValidator) {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data/output")).unwrap();
    let settings = load_settings_from_str(yaml).unwrap();
    let validator = CsvValidator::new(&settings, dir.path()).unwrap();
    (dir, validator)
}

fn write_file(dir: &TempDir, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.path().join("data/output").join(name);
    let mut body = String::from("timestamp,power\r\n");
    for line in lines {
        body.push_str(line);
        body.push_str("\r\n");
    }
    fs::write(&path, body).unwrap();
    path
}

/// One `"<timestamp>,\"100,5\""` line per hour offset from `start`
fn hourly(start: NaiveDate, hours: impl IntoIterator<Item = i64>) -> Vec<String> {
    let base = start.and_hms_opt(0, 0, 0).unwrap();
    hours
        .into_iter()
        .map(|h| {
            let ts = base + Duration::hours(h);
            format!("{},\"100,5\"", ts.format("%Y-%m-%d %H:%M:%S"))
        })
        .collect()
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

// ============================================================================
// Timestamp Parsing Tests
// ============================================================================

#[test]
fn test_parse_output_timestamp_defaults_minutes() {
    let ts = parse_output_timestamp("20241101:07", "%Y%m%d:%H").unwrap();
    assert_eq!(ts.to_string(), "2024-11-01 07:00:00");

    let ts = parse_output_timestamp("15.01.2024 10:30", "%d.%m.%Y %H:%M").unwrap();
    assert_eq!(ts.to_string(), "2024-01-15 10:30:00");

    let ts = parse_output_timestamp("2024-01-15", "%Y-%m-%d").unwrap();
    assert_eq!(ts.to_string(), "2024-01-15 00:00:00");
}

#[test]
fn test_parse_output_timestamp_invalid() {
    assert!(parse_output_timestamp("invalid-date", "%Y-%m-%d %H:%M:%S").is_none());
    assert!(parse_output_timestamp("10:00", "%H:%M").is_none());
}

// ============================================================================
// Content Tests
// ============================================================================

#[test]
fn test_valid_continuous_data() {
    let (dir, validator) = setup(SETTINGS);
    let path = write_file(&dir, "2024-03.csv", &hourly(march(1), 0..48));

    let report = validator.validate_file(&path);
    assert!(report.is_valid(), "{:?}", report.issues);
}

#[test]
fn test_duplicate_timestamp() {
    let (dir, validator) = setup(SETTINGS);
    let mut lines = hourly(march(1), 0..24);
    lines.insert(1, lines[0].clone());
    let path = write_file(&dir, "dup.csv", &lines);

    let report = validator.validate_file(&path);
    assert_eq!(
        report.issues,
        vec![ValidationIssue::DuplicateTimestamp {
            row: 3,
            value: "2024-03-01 00:00:00".to_string(),
            first_row: 2,
        }]
    );
}

#[test]
fn test_missing_hours() {
    let (dir, validator) = setup(SETTINGS);
    let mut lines = hourly(march(1), [0, 1, 2, 4]);
    lines.extend(hourly(march(2), 0..24));
    let path = write_file(&dir, "gap.csv", &lines);

    let report = validator.validate_file(&path);
    assert_eq!(report.issues.len(), 1);
    let message = report.issues[0].to_string();
    assert!(message.starts_with("Missing hours [3, 5, 6"), "{message}");
    assert!(message.contains("between rows 2 and 5"), "{message}");
}

#[test]
fn test_missing_hour_in_middle_of_day() {
    let (dir, validator) = setup(SETTINGS);
    let hours = (0..24).filter(|h| *h != 2);
    let path = write_file(&dir, "dst.csv", &hourly(march(30), hours));

    let report = validator.validate_file(&path);
    assert_eq!(
        report.issues,
        vec![ValidationIssue::MissingHours {
            date: march(30),
            hours: vec![2],
            first_row: 2,
            last_row: 24,
        }]
    );
}

#[test]
fn test_date_gap() {
    let (dir, validator) = setup(SETTINGS);
    let mut lines = hourly(march(1), 0..24);
    lines.extend(hourly(march(3), 0..24));
    let path = write_file(&dir, "days.csv", &lines);

    let report = validator.validate_file(&path);
    assert_eq!(
        report.issues,
        vec![ValidationIssue::DateGap {
            from: march(1),
            to: march(3),
            last_row: 25,
            first_row: 26,
        }]
    );
    assert!(report.issues[0]
        .to_string()
        .starts_with("Gap in dates between 2024-03-01 and 2024-03-03"));
}

#[test]
fn test_invalid_datetime_and_consumption() {
    let (dir, validator) = setup(SETTINGS);
    let lines = vec![
        "2024-03-01 00:00:00,\"100,5\"".to_string(),
        "invalid-date,\"200,5\"".to_string(),
        "2024-03-01 02:00:00,invalid".to_string(),
    ];
    let path = write_file(&dir, "bad.csv", &lines);

    let report = validator.validate_file(&path);
    assert!(report
        .issues
        .contains(&ValidationIssue::InvalidTimestamp { row: 3 }));
    assert!(report
        .issues
        .contains(&ValidationIssue::InvalidConsumption { row: 4 }));
}

#[test]
fn test_first_data_row_is_row_two() {
    let (dir, validator) = setup(SETTINGS);
    let path = write_file(&dir, "first.csv", &["bad,1".to_string()]);

    let report = validator.validate_file(&path);
    assert_eq!(
        report.issues,
        vec![ValidationIssue::InvalidTimestamp { row: 2 }]
    );
}

#[test]
fn test_header_only() {
    let (dir, validator) = setup(SETTINGS);
    let path = write_file(&dir, "empty.csv", &[]);

    let report = validator.validate_file(&path);
    assert_eq!(report.issues, vec![ValidationIssue::HeaderOnly]);
}

#[test]
fn test_multiple_issues() {
    let (dir, validator) = setup(SETTINGS);
    let lines = vec![
        "2024-03-01 00:00:00,\"100,5\"".to_string(),
        "2024-03-01 00:00:00,\"200,5\"".to_string(),
        "invalid-date,\"150,5\"".to_string(),
        "2024-03-01 03:00:00,invalid".to_string(),
    ];
    let path = write_file(&dir, "many.csv", &lines);

    let report = validator.validate_file(&path);
    assert!(report.issues.len() >= 4, "{:?}", report.issues);
}

// ============================================================================
// Structure Tests
// ============================================================================

#[test]
fn test_header_mismatch_and_short_rows() {
    let (dir, validator) = setup(SETTINGS);
    let path = dir.path().join("data/output/struct.csv");
    fs::write(&path, "time,power\n2024-03-01 00:00:00\n").unwrap();

    let report = validator.validate_file(&path);
    assert!(report.issues.contains(&ValidationIssue::HeaderMismatch {
        name: "timestamp".to_string(),
        position: 1,
    }));
    assert!(report
        .issues
        .contains(&ValidationIssue::RowTooShort { row: 2, expected: 2 }));
    assert!(report
        .issues
        .contains(&ValidationIssue::InvalidConsumption { row: 2 }));
}

#[test]
fn test_header_too_short() {
    let (dir, validator) = setup(SETTINGS);
    let path = dir.path().join("data/output/narrow.csv");
    fs::write(&path, "timestamp\n").unwrap();

    let report = validator.validate_file(&path);
    assert!(report
        .issues
        .contains(&ValidationIssue::HeaderTooShort { expected: 2 }));
}

#[test]
fn test_empty_file_has_no_header() {
    let (dir, validator) = setup(SETTINGS);
    let path = dir.path().join("data/output/blank.csv");
    fs::write(&path, "").unwrap();

    let report = validator.validate_file(&path);
    assert_eq!(report.issues, vec![ValidationIssue::MissingHeader]);
}

// ============================================================================
// Directory Tests
// ============================================================================

#[test]
fn test_validate_all() {
    let (dir, validator) = setup(SETTINGS);
    write_file(&dir, "2024-03.csv", &hourly(march(1), 0..24));
    write_file(&dir, "2024-04.csv", &[]);
    fs::write(dir.path().join("data/output/notes.txt"), "x").unwrap();

    let reports = validator.validate_all().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0].is_valid());
    assert!(!reports[1].is_valid());
}

#[test]
fn test_validate_semicolon_compact_format() {
    let yaml = r#"
directories: { data: data, input: input, output: output }
paths:
  input: { json_file_suffix: "-Verbrauch.json" }
  output: { csv_file_suffix: "-Verbrauch.csv" }
csv:
  header: [Zeit, Verbrauch]
  date_format: "%Y%m%d:%H"
  decimal_separator: ","
  empty_columns: 1
  delimiter: ";"
"#;
    let (dir, validator) = setup(yaml);
    let mut body = String::from("Zeit;Verbrauch;\r\n");
    for hour in 0..24 {
        body.push_str(&format!("20241101:{hour:02};560,00;\r\n"));
    }
    let path = dir.path().join("data/output/2024-11-Verbrauch.csv");
    fs::write(&path, body).unwrap();

    let report = validator.validate_file(&path);
    assert!(report.is_valid(), "{:?}", report.issues);
}

#[test]
fn test_validate_missing_output_dir() {
    let dir = tempdir().unwrap();
    let settings = load_settings_from_str(SETTINGS).unwrap();
    let validator = CsvValidator::new(&settings, dir.path()).unwrap();
    assert!(validator.validate_all().unwrap_err().is_fatal());
}
