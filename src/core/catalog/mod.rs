//! Course catalog loading
//!
//! Turns raw catalog files into canonical [`Course`] records. Both the legacy
//! CSV export and the JSON API payload are supported; a directory of
//! `all_classes_*.csv` snapshots resolves to its newest snapshot.

pub mod csv_parser;
pub mod data_files;
pub mod json_parser;

pub use csv_parser::{parse_catalog_csv, parse_catalog_csv_str};
pub use data_files::{latest_snapshot, list_snapshots, DataFile, DataFileError, Semester};
pub use json_parser::{parse_catalog_json, parse_catalog_json_str};

use crate::core::models::Course;
use crate::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Catalog file encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// Legacy CSV export with a header row
    Csv,
    /// JSON array of course objects
    Json,
}

impl CatalogFormat {
    /// Pick the format from the file extension, sniffing the content otherwise
    #[must_use]
    pub fn detect(path: &Path, content: &str) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Self::Csv,
            Some("json") => Self::Json,
            _ => Self::sniff(content),
        }
    }

    /// Guess the format from the first non-whitespace character
    #[must_use]
    pub fn sniff(content: &str) -> Self {
        match content.trim_start_matches('\u{feff}').trim_start().chars().next() {
            Some('[') => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Keep the first course of every (name, id, teacher) identity, in input order
#[must_use]
pub fn dedup_courses(courses: Vec<Course>) -> Vec<Course> {
    let mut seen: HashSet<(String, String, String)> = HashSet::new();
    let before = courses.len();

    let unique: Vec<Course> = courses
        .into_iter()
        .filter(|course| {
            let (name, id, teacher) = course.identity();
            seen.insert((name.to_string(), id.to_string(), teacher.to_string()))
        })
        .collect();

    if unique.len() < before {
        debug!("Dropped {} duplicate catalog rows", before - unique.len());
    }
    unique
}

/// Parse catalog text in the given format
///
/// # Errors
/// Returns an error if the text is not valid for the format
pub fn parse_catalog_str(content: &str, format: CatalogFormat) -> Result<Vec<Course>, Box<dyn Error>> {
    match format {
        CatalogFormat::Csv => parse_catalog_csv_str(content),
        CatalogFormat::Json => parse_catalog_json_str(content),
    }
}

/// Load a catalog from a file or a snapshot directory
///
/// # Errors
/// Returns an error if the path cannot be read, a directory holds no
/// snapshot, or the file content is malformed
pub fn load_catalog(path: &Path) -> Result<Vec<Course>, Box<dyn Error>> {
    if path.is_dir() {
        let snapshot = latest_snapshot(path)?;
        info!("Using catalog snapshot {} ({})", snapshot.name, snapshot.label());
        return load_catalog_file(&snapshot.path);
    }
    load_catalog_file(path)
}

fn load_catalog_file(path: &Path) -> Result<Vec<Course>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let format = CatalogFormat::detect(path, &content);
    debug!("Parsing {} as {:?}", path.display(), format);

    let courses = parse_catalog_str(&content, format)?;
    info!("Loaded {} courses from {}", courses.len(), path.display());
    Ok(courses)
}

/// Find a course by section code
#[must_use]
pub fn find_course<'a>(courses: &'a [Course], id: &str) -> Option<&'a Course> {
    courses.iter().find(|course| course.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_by_extension_then_content() {
        assert_eq!(CatalogFormat::detect(Path::new("a.CSV"), "[]"), CatalogFormat::Csv);
        assert_eq!(CatalogFormat::detect(Path::new("a.json"), "Number"), CatalogFormat::Json);
        assert_eq!(CatalogFormat::detect(Path::new("catalog"), "  \n[{}]"), CatalogFormat::Json);
        assert_eq!(CatalogFormat::detect(Path::new("catalog"), "Number,Name"), CatalogFormat::Csv);
    }

    #[test]
    fn test_dedup_keeps_first_identity() {
        let mut first = Course::new("A1", "Algebra", "Lin");
        first.room = "first".to_string();
        let mut second = Course::new("A1", "Algebra", "Lin");
        second.room = "second".to_string();
        let other_teacher = Course::new("A1", "Algebra", "Chen");

        let courses = dedup_courses(vec![first, second, other_teacher]);
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].room, "first");
        assert_eq!(courses[1].teacher, "Chen");
    }

    #[test]
    fn test_find_course() {
        let courses = vec![Course::new("A1", "Algebra", "Lin"), Course::new("B2", "Biology", "Wu")];
        assert_eq!(find_course(&courses, "B2").map(|c| c.name.as_str()), Some("Biology"));
        assert!(find_course(&courses, "C3").is_none());
    }
}
