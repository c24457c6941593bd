//! Registration script export and import
//!
//! The export is a console script for the university registration page: it
//! embeds the courses marked for registration as a JSON array literal
//! (`const exportClass = [...];`) and fills the page's form inputs with it.
//! Importing reads that array back out of a pasted script.

use crate::core::models::Course;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Embedded console script template
const SCRIPT_TEMPLATE: &str = include_str!("../assets/ExportScript.js");

const PAYLOAD_PATTERN: &str = r"(?s)exportClass = (\[.*?\]);";

/// Highest registration weight
pub const MAX_WEIGHT: u8 = 100;

/// Marker the registration form uses for "add course"
pub const ADD_MARKER: &str = "+";

/// One course row of the export payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    /// Section code
    pub id: String,
    /// Course name
    pub name: String,
    /// Registration weight, 0–100
    pub value: u8,
    /// Add/drop marker, always `+`
    #[serde(rename = "isSel")]
    pub is_sel: String,
}

/// Clamp a raw weight into 0–100
#[must_use]
pub fn clamp_weight(raw: i64) -> u8 {
    u8::try_from(raw.clamp(0, i64::from(MAX_WEIGHT))).unwrap_or(0)
}

/// Read a weight from a JSON value
///
/// Numbers are truncated; strings use their leading integer (`"42abc"` is
/// 42). Anything else, including a string with no leading digits, is 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_weight(value: &Value) -> u8 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc().clamp(-1.0, 101.0) as i64))
            .map_or(0, clamp_weight),
        Value::String(s) => parse_weight_text(s),
        _ => 0,
    }
}

/// Leading integer of a text weight, clamped; 0 when there is none
#[must_use]
pub fn parse_weight_text(text: &str) -> u8 {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 || negative {
        return 0;
    }
    digits[..end].parse::<i64>().map_or(MAX_WEIGHT, clamp_weight)
}

/// Build the payload rows for the courses marked for registration
///
/// Rows follow marking order. Marked ids that are no longer selected are
/// skipped; missing weights count as 0.
#[must_use]
pub fn build_export(selected: &[Course], marked: &[String], weights: &BTreeMap<String, u8>) -> Vec<ExportEntry> {
    marked
        .iter()
        .filter_map(|id| selected.iter().find(|course| &course.id == id))
        .map(|course| ExportEntry {
            id: course.id.clone(),
            name: course.name.clone(),
            value: weights.get(&course.id).copied().unwrap_or(0).min(MAX_WEIGHT),
            is_sel: ADD_MARKER.to_string(),
        })
        .collect()
}

/// Render the console script for the given rows
///
/// # Errors
/// Returns an error if the rows cannot be serialized
pub fn render_script(entries: &[ExportEntry]) -> Result<String, serde_json::Error> {
    let payload = serde_json::to_string(entries)?;
    Ok(SCRIPT_TEMPLATE.replace("{{export_class}}", &payload))
}

/// A course read back from a pasted script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedCourse {
    /// Section code
    pub id: String,
    /// Clamped registration weight
    pub weight: u8,
}

/// Why a pasted script was rejected
#[derive(Debug)]
pub enum ImportError {
    /// The payload pattern could not be compiled
    Pattern(regex::Error),
    /// No `exportClass = [...];` assignment was found
    MissingPayload,
    /// The array literal is not valid JSON
    InvalidJson(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern(e) => write!(f, "Invalid import pattern: {e}"),
            Self::MissingPayload => write!(f, "Invalid code: no exportClass array found"),
            Self::InvalidJson(e) => write!(f, "Invalid code: {e}"),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern(e) => Some(e),
            Self::InvalidJson(e) => Some(e),
            Self::MissingPayload => None,
        }
    }
}

/// Extract the courses of a pasted export script
///
/// Array elements without a string `id` are ignored.
///
/// # Errors
/// Returns [`ImportError`] if the script holds no payload or the payload is
/// not a JSON array
pub fn parse_import(text: &str) -> Result<Vec<ImportedCourse>, ImportError> {
    let pattern = Regex::new(PAYLOAD_PATTERN).map_err(ImportError::Pattern)?;
    let payload = pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .ok_or(ImportError::MissingPayload)?;

    let elements: Vec<Value> = serde_json::from_str(payload.as_str()).map_err(ImportError::InvalidJson)?;

    Ok(elements
        .iter()
        .filter_map(|element| {
            let id = element.get("id")?.as_str()?;
            Some(ImportedCourse {
                id: id.to_string(),
                weight: element.get("value").map_or(0, parse_weight),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn selection() -> Vec<Course> {
        vec![
            Course::new("CSE101", "程式設計", "林"),
            Course::new("CSE102", "資料結構", "陳"),
            Course::new("CSE103", "計算機組織", "王"),
        ]
    }

    #[test]
    fn test_build_export_follows_marking_order() {
        let marked = vec!["CSE103".to_string(), "GONE".to_string(), "CSE101".to_string()];
        let weights = BTreeMap::from([("CSE101".to_string(), 80)]);

        let entries = build_export(&selection(), &marked, &weights);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "CSE103");
        assert_eq!(entries[0].value, 0);
        assert_eq!(entries[1].value, 80);
        assert_eq!(entries[1].is_sel, "+");
    }

    #[test]
    fn test_script_embeds_compact_payload() {
        let entries = vec![ExportEntry {
            id: "CSE101".to_string(),
            name: "程式設計".to_string(),
            value: 50,
            is_sel: "+".to_string(),
        }];
        let script = render_script(&entries).unwrap();
        assert!(script.contains(
            r#"const exportClass = [{"id":"CSE101","name":"程式設計","value":50,"isSel":"+"}];"#
        ));
        assert!(script.starts_with("const frame = document.getElementById('main');"));
    }

    #[test]
    fn test_round_trip() {
        let marked = vec!["CSE101".to_string(), "CSE102".to_string(), "CSE103".to_string()];
        let weights = BTreeMap::from([
            ("CSE101".to_string(), 0),
            ("CSE102".to_string(), 100),
            ("CSE103".to_string(), 37),
        ]);
        let script = render_script(&build_export(&selection(), &marked, &weights)).unwrap();

        let imported: BTreeMap<String, u8> = parse_import(&script)
            .unwrap()
            .into_iter()
            .map(|c| (c.id, c.weight))
            .collect();
        assert_eq!(imported, weights);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(matches!(parse_import("hello"), Err(ImportError::MissingPayload)));
        assert!(matches!(
            parse_import("const exportClass = [{id: 1}];"),
            Err(ImportError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_import_accepts_multiline_payload() {
        let text = "const exportClass = [\n  {\"id\": \"A\", \"value\": \"250\"},\n  {\"value\": 3}\n];";
        let imported = parse_import(text).unwrap();
        assert_eq!(imported, vec![ImportedCourse { id: "A".to_string(), weight: 100 }]);
    }

    #[test]
    fn test_weight_parsing() {
        assert_eq!(parse_weight(&json!(42)), 42);
        assert_eq!(parse_weight(&json!(42.9)), 42);
        assert_eq!(parse_weight(&json!(-5)), 0);
        assert_eq!(parse_weight(&json!(1e9)), 100);
        assert_eq!(parse_weight(&json!("70abc")), 70);
        assert_eq!(parse_weight(&json!("abc")), 0);
        assert_eq!(parse_weight(&json!(null)), 0);
        assert_eq!(parse_weight_text("-3"), 0);
        assert_eq!(clamp_weight(101), 100);
    }
}
