//! Tests for discovery module

use super::*;
use crate::error::Error;
use std::fs;
use tempfile::tempdir;

fn touch(dir: &std::path::Path, name: &str) {
    fs::write(dir.join(name), "{}").unwrap();
}

#[test]
fn test_extract_period() {
    assert_eq!(
        extract_period("2024-11-Verbrauch.json", "-Verbrauch.json"),
        Some("2024-11")
    );
    assert_eq!(
        extract_period("2024-01-consumption-data.json", "-consumption-data.json"),
        Some("2024-01")
    );
    assert_eq!(extract_period("2024-08-other.json", "-Verbrauch.json"), None);
    assert_eq!(extract_period("-Verbrauch.json", "-Verbrauch.json"), None);
}

#[test]
fn test_extract_period_is_name_without_suffix() {
    for name in ["winter-Verbrauch.json", "2023-12-Verbrauch.json", "x-Verbrauch.json"] {
        let period = extract_period(name, "-Verbrauch.json").unwrap();
        assert_eq!(format!("{period}-Verbrauch.json"), name);
    }
}

#[test]
fn test_discover_matching_files_in_order() {
    let dir = tempdir().unwrap();
    for name in [
        "2024-11-Verbrauch.json",
        "2024-09-Verbrauch.json",
        "2024-10-Verbrauch.json",
        "2024-08-other.json",
        "notes.txt",
    ] {
        touch(dir.path(), name);
    }

    let files: Vec<DiscoveredFile> = discover(dir.path(), "-Verbrauch.json")
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    let periods: Vec<&str> = files.iter().map(|f| f.period.as_str()).collect();
    assert_eq!(periods, vec!["2024-09", "2024-10", "2024-11"]);
    assert!(files
        .iter()
        .all(|f| f.path.starts_with(dir.path()) && f.path.is_file()));
}

#[test]
fn test_discover_no_matches() {
    let dir = tempdir().unwrap();
    touch(dir.path(), "2024-11-Verbrauch.json");

    let files: Vec<_> = discover(dir.path(), "-nonexistent.json").unwrap().collect();
    assert!(files.is_empty());
}

#[test]
fn test_discover_skips_directories_and_bare_suffix() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("2024-05-Verbrauch.json")).unwrap();
    touch(dir.path(), "-Verbrauch.json");
    touch(dir.path(), "2024-06-Verbrauch.json");

    let files: Vec<DiscoveredFile> = discover(dir.path(), "-Verbrauch.json")
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].period, "2024-06");
}

#[test]
fn test_discover_missing_directory() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("data").join("input");

    let err = discover(&missing, "-Verbrauch.json").unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, Error::InputDirNotFound { path } if path == missing));
}

#[test]
fn test_discover_file_instead_of_directory() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("input");
    fs::write(&file, "").unwrap();

    assert!(matches!(
        discover(&file, ".json"),
        Err(Error::InputDirNotFound { .. })
    ));
}
