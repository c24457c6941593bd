//! Integration tests for catalog loading

use selector_helper::core::catalog::{
    find_course, list_snapshots, load_catalog, parse_catalog_csv, parse_catalog_json, DataFileError, Semester,
};
use selector_helper::models::{CourseClass, Weekday};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn sample(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("samples").join(name)
}

#[test]
fn test_csv_sample_loads_and_dedups() {
    let courses = parse_catalog_csv(sample("catalog.csv")).expect("Failed to parse CSV sample");

    // The sample repeats CSE1001 verbatim
    assert_eq!(courses.len(), 11);
    assert_eq!(courses.iter().filter(|c| c.id == "CSE1001").count(), 1);

    let cse = find_course(&courses, "CSE1001").unwrap();
    assert_eq!(cse.name, "計算機概論");
    assert_eq!(cse.class, CourseClass::TrackA);
    assert_eq!(cse.periods_on(Weekday::Monday), "34");
    assert_eq!(cse.periods_on(Weekday::Wednesday), "5");
    assert!(!cse.meets_on(Weekday::Tuesday));
    assert!(cse.is_compulsory());
}

#[test]
fn test_json_sample_skips_non_objects() {
    let courses = parse_catalog_json(sample("catalog.json")).expect("Failed to parse JSON sample");

    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["CSE1001", "CSE2001", "CHI1001", "ENG1001"]);
    assert_eq!(courses[0].name, "計算機概論");
}

#[test]
fn test_csv_and_json_describe_the_same_courses() {
    let from_csv = parse_catalog_csv(sample("catalog.csv")).unwrap();
    let from_json = parse_catalog_json(sample("catalog.json")).unwrap();

    for id in ["CSE1001", "CSE2001", "CHI1001"] {
        let csv_course = find_course(&from_csv, id).unwrap();
        let json_course = find_course(&from_json, id).unwrap();
        assert_eq!(csv_course, json_course, "{id} differs between CSV and JSON");
    }

    // Legacy-shaped JSON element only carries the columns it names
    let eng_json = find_course(&from_json, "ENG1001").unwrap();
    let eng_csv = find_course(&from_csv, "ENG1001").unwrap();
    assert_eq!(eng_json.schedule, eng_csv.schedule);
    assert_eq!(eng_json.english, "1");
}

#[test]
fn test_load_catalog_detects_format() {
    let dir = TempDir::new().unwrap();
    let json_as_txt = dir.path().join("catalog.txt");
    fs::copy(sample("catalog.json"), &json_as_txt).unwrap();

    assert_eq!(load_catalog(&json_as_txt).unwrap().len(), 4);
    assert_eq!(load_catalog(&sample("catalog.csv")).unwrap().len(), 11);
    assert!(load_catalog(&dir.path().join("missing.csv")).is_err());
}

#[test]
fn test_snapshot_directory_uses_latest_semester() {
    let dir = TempDir::new().unwrap();
    let csv = fs::read_to_string(sample("catalog.csv")).unwrap();
    let header = csv.lines().next().unwrap();

    fs::write(dir.path().join("all_classes_1131_20240701.csv"), format!("{header}\n")).unwrap();
    fs::write(dir.path().join("all_classes_1132_20250101.csv"), &csv).unwrap();
    fs::write(dir.path().join("all_classes_1132_20241220.csv"), format!("{header}\n")).unwrap();
    fs::write(dir.path().join("notes.csv"), "ignored").unwrap();

    let snapshots = list_snapshots(dir.path()).unwrap();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].semester, Semester::Spring);
    assert_eq!(snapshots[0].updated, "20250101");
    assert_eq!(snapshots[0].label(), "113下 20250101 資料");
    assert_eq!(snapshots[1].semester, Semester::Fall);

    assert_eq!(load_catalog(dir.path()).unwrap().len(), 11);
}

#[test]
fn test_empty_snapshot_directory() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        list_snapshots(dir.path()),
        Err(DataFileError::NoSnapshots(_))
    ));
    assert!(load_catalog(dir.path()).is_err());
}
