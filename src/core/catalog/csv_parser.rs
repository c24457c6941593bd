//! CSV parser for the legacy catalog export
//!
//! The legacy export has one header row naming each column (`Number`, `Name`,
//! `Teacher`, `Monday` … `Sunday`, ...). Columns may appear in any order and
//! unknown columns are ignored.

use super::dedup_courses;
use crate::core::models::{Course, CourseClass, Weekday};
use crate::debug;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Column lookup built from the header row
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), idx))
            .collect();
        Self { index }
    }

    /// Trimmed field value, empty when the column or the cell is missing
    fn get(&self, record: &csv::StringRecord, name: &str) -> String {
        self.index
            .get(name)
            .and_then(|idx| record.get(*idx))
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

/// Parse a catalog CSV file into deduplicated courses
///
/// # Errors
/// Returns an error if the file cannot be read or has no header row
pub fn parse_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_catalog_csv_str(&content)
}

/// Parse catalog CSV text into deduplicated courses
///
/// Rows without a section code or a name are dropped, as are rows the CSV
/// reader cannot decode.
///
/// # Errors
/// Returns an error if the header row cannot be read
pub fn parse_catalog_csv_str(content: &str) -> Result<Vec<Course>, Box<dyn Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = Columns::new(reader.headers()?);
    if !columns.index.contains_key("Number") {
        return Err("Catalog CSV has no 'Number' column".into());
    }

    let mut courses = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable catalog row {}: {e}", line + 2);
                continue;
            }
        };
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match parse_course_record(&record, &columns) {
            Some(course) => courses.push(course),
            None => debug!("Skipping catalog row {} without Number/Name", line + 2),
        }
    }

    Ok(dedup_courses(courses))
}

/// Build a course from one CSV record
fn parse_course_record(record: &csv::StringRecord, columns: &Columns) -> Option<Course> {
    let id = columns.get(record, "Number");
    let name = columns.get(record, "Name");
    if id.is_empty() || name.is_empty() {
        return None;
    }

    let mut course = Course::new(id, name, columns.get(record, "Teacher"));
    course.department = columns.get(record, "Department");
    course.grade = columns.get(record, "Grade");
    course.class = CourseClass::from_label(&columns.get(record, "Class"));
    course.credit = columns.get(record, "Credit");
    course.compulsory_elective = columns.get(record, "CompulsoryElective");
    course.english = columns.get(record, "EMI");
    course.url = columns.get(record, "Url");
    course.programs = columns.get(record, "Programs");
    for day in Weekday::ALL {
        course.schedule[day.index()] = columns.get(record, day.key());
    }
    course.change = columns.get(record, "Change");
    course.change_description = columns.get(record, "Description");
    course.multiple_compulsory = columns.get(record, "MultipleCompulsory");
    course.year_semester = columns.get(record, "YearSemester");
    course.restrict = columns.get(record, "Restrict");
    course.select = columns.get(record, "Select");
    course.selected = columns.get(record, "Selected");
    course.remaining = columns.get(record, "Remaining");
    course.room = columns.get(record, "Room");
    course.description = columns.get(record, "Context");

    Some(course)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Number,Name,Teacher,Department,Grade,Class,Credit,CompulsoryElective,EMI,Monday,Tuesday,Wednesday,Thursday,Friday,Saturday,Sunday";

    #[test]
    fn test_parse_basic_rows() {
        let csv = format!(
            "{HEADER}\nCSE101,程式設計,林老師,資工系,1,甲班,3,必,0,34,,,,,,\nCSE102,資料結構,陳老師,資工系,2,,3,選,1,,56,,,,,\n"
        );
        let courses = parse_catalog_csv_str(&csv).unwrap();

        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, "CSE101");
        assert_eq!(courses[0].class, CourseClass::TrackA);
        assert_eq!(courses[0].periods_on(Weekday::Monday), "34");
        assert_eq!(courses[1].class, CourseClass::Unsectioned);
        assert_eq!(courses[1].periods_on(Weekday::Tuesday), "56");
        assert!(courses[1].is_english_taught());
    }

    #[test]
    fn test_duplicate_identity_keeps_first() {
        let csv = format!(
            "{HEADER}\nCSE101,程式設計,林老師,資工系,1,,3,必,0,34,,,,,,\nCSE101,程式設計,林老師,電機系,1,,3,必,0,12,,,,,,\n"
        );
        let courses = parse_catalog_csv_str(&csv).unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].department, "資工系");
    }

    #[test]
    fn test_rows_without_identity_are_dropped() {
        let csv = format!("{HEADER}\n,無代碼,林老師,,,,,,,,,,,,,\nCSE103,,林老師,,,,,,,,,,,,,\n\n");
        let courses = parse_catalog_csv_str(&csv).unwrap();
        assert!(courses.is_empty());
    }

    #[test]
    fn test_missing_columns_default_to_empty() {
        let csv = "Number,Name\nGEN001,通識\n";
        let courses = parse_catalog_csv_str(csv).unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].teacher, "");
        assert_eq!(courses[0].weekly_hours(), 0);
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let csv = "Number,Name,Teacher,Programs\nGEN002,通識,\"林, 陳\",\"A學程, B學程\"\n";
        let courses = parse_catalog_csv_str(csv).unwrap();
        assert_eq!(courses[0].teacher, "林, 陳");
        assert_eq!(courses[0].programs, "A學程, B學程");
    }

    #[test]
    fn test_missing_number_column_is_an_error() {
        assert!(parse_catalog_csv_str("Name,Teacher\nX,Y\n").is_err());
    }
}
