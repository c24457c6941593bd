//! JSON parser for the course API payloads
//!
//! Two element shapes are accepted inside the top-level array: the newer API
//! record (`id`, `classTime`, `tags`, boolean flags, numeric counters) and the
//! legacy record keyed by the CSV column names (`Number`, `Name`, ...).

use super::dedup_courses;
use crate::core::models::{Course, CourseClass, Weekday, COMPULSORY, ELECTIVE};
use crate::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Course record as served by the newer course API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiCourse {
    id: String,
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    change: Option<String>,
    #[serde(default)]
    change_description: Option<String>,
    #[serde(default)]
    multiple_compulsory: bool,
    #[serde(default)]
    department: String,
    #[serde(default)]
    grade: String,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    credit: String,
    #[serde(default)]
    year_semester: String,
    #[serde(default)]
    compulsory: bool,
    #[serde(default)]
    restrict: Option<i64>,
    #[serde(default)]
    select: Option<i64>,
    #[serde(default)]
    selected: Option<i64>,
    #[serde(default)]
    remaining: Option<i64>,
    #[serde(default)]
    teacher: String,
    #[serde(default)]
    room: String,
    #[serde(default)]
    class_time: Vec<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    english: bool,
}

fn count_to_string(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl From<ApiCourse> for Course {
    fn from(api: ApiCourse) -> Self {
        let name = api.name.lines().next().unwrap_or_default().trim().to_string();
        let mut course = Self::new(api.id.trim(), name, api.teacher);
        course.url = api.url;
        course.change = api.change.unwrap_or_default();
        course.change_description = api.change_description.unwrap_or_default();
        course.multiple_compulsory = if api.multiple_compulsory { "是" } else { "" }.to_string();
        course.department = api.department;
        course.grade = api.grade;
        course.class = CourseClass::from_label(api.class.as_deref().unwrap_or_default());
        course.credit = api.credit;
        course.year_semester = api.year_semester;
        course.compulsory_elective = if api.compulsory { COMPULSORY } else { ELECTIVE }.to_string();
        course.restrict = count_to_string(api.restrict);
        course.select = count_to_string(api.select);
        course.selected = count_to_string(api.selected);
        course.remaining = count_to_string(api.remaining);
        course.room = api.room;
        for day in Weekday::ALL {
            course.schedule[day.index()] = api.class_time.get(day.index()).cloned().unwrap_or_default();
        }
        course.description = api.description;
        course.programs = api.tags.join(", ");
        course.english = if api.english { "1" } else { "0" }.to_string();
        course
    }
}

/// Build a course from a legacy object keyed by the CSV column names
fn parse_legacy_object(fields: &serde_json::Map<String, Value>) -> Option<Course> {
    let text: HashMap<&str, String> = fields
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.trim().to_string(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key.as_str(), value)
        })
        .collect();
    let get = |key: &str| text.get(key).cloned().unwrap_or_default();

    let id = get("Number");
    let name = get("Name");
    if id.is_empty() || name.is_empty() {
        return None;
    }

    let mut course = Course::new(id, name, get("Teacher"));
    course.department = get("Department");
    course.grade = get("Grade");
    course.class = CourseClass::from_label(&get("Class"));
    course.credit = get("Credit");
    course.compulsory_elective = get("CompulsoryElective");
    course.english = get("EMI");
    course.url = get("Url");
    course.programs = get("Programs");
    for day in Weekday::ALL {
        course.schedule[day.index()] = get(day.key());
    }
    course.change = get("Change");
    course.change_description = get("Description");
    course.multiple_compulsory = get("MultipleCompulsory");
    course.year_semester = get("YearSemester");
    course.restrict = get("Restrict");
    course.select = get("Select");
    course.selected = get("Selected");
    course.remaining = get("Remaining");
    course.room = get("Room");
    course.description = get("Context");
    Some(course)
}

/// Convert one array element, `None` when it has neither known shape
fn parse_element(value: Value) -> Option<Course> {
    let Value::Object(fields) = value else {
        return None;
    };
    if fields.contains_key("Number") {
        return parse_legacy_object(&fields);
    }
    let api: ApiCourse = serde_json::from_value(Value::Object(fields)).ok()?;
    if api.id.trim().is_empty() || api.name.trim().is_empty() {
        return None;
    }
    Some(api.into())
}

/// Parse a catalog JSON file into deduplicated courses
///
/// # Errors
/// Returns an error if the file cannot be read or is not a JSON array
pub fn parse_catalog_json<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    parse_catalog_json_str(&content)
}

/// Parse catalog JSON text into deduplicated courses
///
/// # Errors
/// Returns an error if the text is not a JSON array
pub fn parse_catalog_json_str(content: &str) -> Result<Vec<Course>, Box<dyn Error>> {
    let elements: Vec<Value> = serde_json::from_str(content)?;
    let total = elements.len();

    let courses: Vec<Course> = elements.into_iter().filter_map(parse_element).collect();
    if courses.len() < total {
        debug!("Skipped {} malformed catalog entries", total - courses.len());
    }

    Ok(dedup_courses(courses))
}
