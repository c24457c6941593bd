//! Advanced filter model
//!
//! Each filterable course field maps to the same [`FilterElement`] shape. The
//! serialized form keeps the field labels used by the catalog UI (名稱, 教師,
//! ...) so persisted filters stay readable by both front ends.

use super::course::Course;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Course fields that can carry an advanced filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterField {
    /// Course name (free text)
    #[serde(rename = "名稱")]
    Name,
    /// Teacher names (free text)
    #[serde(rename = "教師")]
    Teacher,
    /// Program tags (free text)
    #[serde(rename = "學程")]
    Programs,
    /// Year level
    #[serde(rename = "年級")]
    Grade,
    /// Section/track label
    #[serde(rename = "班別")]
    Class,
    /// Department
    #[serde(rename = "系所")]
    Department,
    /// Required / elective flag
    #[serde(rename = "必修")]
    CompulsoryElective,
    /// Credit
    #[serde(rename = "學分")]
    Credit,
    /// English-taught flag
    #[serde(rename = "英課")]
    English,
    /// Meeting days
    #[serde(rename = "星期")]
    Weekday,
    /// Meeting periods
    #[serde(rename = "節次")]
    Period,
}

/// How a filter field is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Keyword matching against `value`
    Text,
    /// Membership of the course value in `active_options`
    Option,
    /// Meeting days against `active_options`
    Weekday,
    /// Meeting periods against `active_options`
    Period,
}

impl FilterField {
    /// Every field, in display order
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::Teacher,
        Self::Programs,
        Self::Period,
        Self::Weekday,
        Self::Grade,
        Self::Class,
        Self::Department,
        Self::CompulsoryElective,
        Self::Credit,
        Self::English,
    ];

    /// UI label of the field
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "名稱",
            Self::Teacher => "教師",
            Self::Programs => "學程",
            Self::Grade => "年級",
            Self::Class => "班別",
            Self::Department => "系所",
            Self::CompulsoryElective => "必修",
            Self::Credit => "學分",
            Self::English => "英課",
            Self::Weekday => "星期",
            Self::Period => "節次",
        }
    }

    /// Evaluation strategy of the field
    #[must_use]
    pub const fn kind(self) -> FilterKind {
        match self {
            Self::Name | Self::Teacher | Self::Programs => FilterKind::Text,
            Self::Weekday => FilterKind::Weekday,
            Self::Period => FilterKind::Period,
            Self::Grade
            | Self::Class
            | Self::Department
            | Self::CompulsoryElective
            | Self::Credit
            | Self::English => FilterKind::Option,
        }
    }

    /// The course value this field filters on; `None` for the time fields
    #[must_use]
    pub fn value_of(self, course: &Course) -> Option<&str> {
        match self {
            Self::Name => Some(&course.name),
            Self::Teacher => Some(&course.teacher),
            Self::Programs => Some(&course.programs),
            Self::Grade => Some(&course.grade),
            Self::Class => Some(course.class.label()),
            Self::Department => Some(&course.department),
            Self::CompulsoryElective => Some(&course.compulsory_elective),
            Self::Credit => Some(&course.credit),
            Self::English => Some(&course.english),
            Self::Weekday | Self::Period => None,
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(field) = Self::ALL.into_iter().find(|f| f.label() == trimmed) {
            return Ok(field);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "teacher" => Ok(Self::Teacher),
            "program" | "programs" => Ok(Self::Programs),
            "grade" => Ok(Self::Grade),
            "class" => Ok(Self::Class),
            "department" | "dept" => Ok(Self::Department),
            "compulsory" | "required" => Ok(Self::CompulsoryElective),
            "credit" | "credits" => Ok(Self::Credit),
            "english" | "emi" => Ok(Self::English),
            "weekday" | "day" => Ok(Self::Weekday),
            "period" => Ok(Self::Period),
            _ => Err(format!("Unknown filter field: '{s}'")),
        }
    }
}

/// Matching mode of a filter element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterLogic {
    /// Exact match
    Equal,
    /// Contains / is one of
    #[default]
    Include,
    /// Does not contain / is not one of
    Exclude,
}

impl FromStr for FilterLogic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" | "eq" => Ok(Self::Equal),
            "include" | "in" => Ok(Self::Include),
            "exclude" | "not" => Ok(Self::Exclude),
            _ => Err(format!("Unknown filter logic: '{s}'")),
        }
    }
}

/// Filter state of a single field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterElement {
    /// Whether the filter takes part in filtering
    #[serde(default)]
    pub active: bool,
    /// Free-text value for text fields
    #[serde(default)]
    pub value: String,
    /// Matching mode
    #[serde(default, rename = "filterLogic")]
    pub filter_logic: FilterLogic,
    /// Chosen options for enumerable fields
    #[serde(default, rename = "activeOptions")]
    pub active_options: BTreeMap<String, bool>,
}

impl FilterElement {
    /// Whether `option` is chosen
    #[must_use]
    pub fn is_option_active(&self, option: &str) -> bool {
        self.active_options.get(option).copied().unwrap_or(false)
    }

    /// Chosen option keys, sorted
    pub fn active_option_keys(&self) -> impl Iterator<Item = &str> {
        self.active_options
            .iter()
            .filter(|(_, on)| **on)
            .map(|(key, _)| key.as_str())
    }

    /// Choose or un-choose an option
    pub fn set_option(&mut self, option: impl Into<String>, on: bool) {
        self.active_options.insert(option.into(), on);
    }
}

/// Advanced filter state for every [`FilterField`]
///
/// Always holds an element for every field; missing entries in persisted
/// data are filled with inactive defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<FilterField, FilterElement>", into = "BTreeMap<FilterField, FilterElement>")]
pub struct AdvancedFilters {
    entries: BTreeMap<FilterField, FilterElement>,
}

impl Default for AdvancedFilters {
    fn default() -> Self {
        Self::from(BTreeMap::new())
    }
}

impl From<BTreeMap<FilterField, FilterElement>> for AdvancedFilters {
    fn from(mut entries: BTreeMap<FilterField, FilterElement>) -> Self {
        for field in FilterField::ALL {
            entries.entry(field).or_default();
        }
        Self { entries }
    }
}

impl From<AdvancedFilters> for BTreeMap<FilterField, FilterElement> {
    fn from(filters: AdvancedFilters) -> Self {
        filters.entries
    }
}

impl AdvancedFilters {
    /// Element of a field
    #[must_use]
    pub fn get(&self, field: FilterField) -> &FilterElement {
        // `From` inserts every field, so the entry is always present.
        &self.entries[&field]
    }

    /// Mutable element of a field
    pub fn get_mut(&mut self, field: FilterField) -> &mut FilterElement {
        self.entries.entry(field).or_default()
    }

    /// All (field, element) pairs
    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &FilterElement)> {
        self.entries.iter().map(|(field, element)| (*field, element))
    }

    /// Activate a text filter on `field` with the given value and logic
    pub fn set_text(&mut self, field: FilterField, value: impl Into<String>, logic: FilterLogic) {
        let element = self.get_mut(field);
        element.active = true;
        element.value = value.into();
        element.filter_logic = logic;
    }

    /// Activate an option filter on `field` with the given chosen options and logic
    pub fn set_options<I, S>(&mut self, field: FilterField, options: I, logic: FilterLogic)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let element = self.get_mut(field);
        element.active = true;
        element.filter_logic = logic;
        element.active_options = options.into_iter().map(|o| (o.into(), true)).collect();
    }

    /// Whether any element is active
    #[must_use]
    pub fn any_active(&self) -> bool {
        self.entries.values().any(|e| e.active)
    }
}
