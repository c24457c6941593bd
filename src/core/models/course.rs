//! Course model

use super::time::Weekday;
use serde::{Deserialize, Serialize};

/// Section/track label of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CourseClass {
    /// 不分班
    #[default]
    #[serde(rename = "不分班")]
    Unsectioned,
    /// 全英班
    #[serde(rename = "全英班")]
    FullEnglish,
    /// 甲班
    #[serde(rename = "甲班")]
    TrackA,
    /// 乙班
    #[serde(rename = "乙班")]
    TrackB,
}

impl CourseClass {
    /// All labels, in filter option order
    pub const ALL: [Self; 4] = [Self::TrackA, Self::TrackB, Self::FullEnglish, Self::Unsectioned];

    /// Catalog label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unsectioned => "不分班",
            Self::FullEnglish => "全英班",
            Self::TrackA => "甲班",
            Self::TrackB => "乙班",
        }
    }

    /// Map a catalog label; anything unknown is treated as unsectioned
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == label.trim())
            .unwrap_or_default()
    }
}

/// Marker for required courses in `compulsory_elective`
pub const COMPULSORY: &str = "必";
/// Marker for elective courses in `compulsory_elective`
pub const ELECTIVE: &str = "選";

/// One offered class section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Course {
    /// Section code (e.g., "CSE101")
    pub id: String,
    /// Course name
    pub name: String,
    /// Comma-joined teacher names
    pub teacher: String,
    /// Offering department
    pub department: String,
    /// Year level, "0" means unrestricted
    pub grade: String,
    /// Section/track label
    pub class: CourseClass,
    /// Credit as listed (numeric string)
    pub credit: String,
    /// "必" for required, "選" for elective
    pub compulsory_elective: String,
    /// "1" when English-taught, "0" otherwise
    pub english: String,
    /// Syllabus link
    pub url: String,
    /// Comma-joined program tags
    pub programs: String,
    /// Period codes per weekday, Monday first; empty means no class
    pub schedule: [String; 7],
    /// Change status ("新增", "異動", ...)
    pub change: String,
    /// Change note
    pub change_description: String,
    /// "是" when the course is compulsory for several departments
    pub multiple_compulsory: String,
    /// Term length marker (e.g., "期" or "學年")
    pub year_semester: String,
    /// Capacity
    pub restrict: String,
    /// Registered in the current round
    pub select: String,
    /// Already enrolled
    pub selected: String,
    /// Remaining seats
    pub remaining: String,
    /// Room and meeting description
    pub room: String,
    /// Free-text note
    pub description: String,
}

impl Course {
    /// Create a course with the identity fields set and everything else empty
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            teacher: teacher.into(),
            ..Self::default()
        }
    }

    /// Builder-style setter for one weekday's period codes
    #[must_use]
    pub fn with_day(mut self, day: Weekday, periods: impl Into<String>) -> Self {
        self.schedule[day.index()] = periods.into();
        self
    }

    /// Period codes on the given day
    #[must_use]
    pub fn periods_on(&self, day: Weekday) -> &str {
        &self.schedule[day.index()]
    }

    /// Whether the course meets on the given day
    #[must_use]
    pub fn meets_on(&self, day: Weekday) -> bool {
        !self.schedule[day.index()].is_empty()
    }

    /// Whether the course occupies the given period on the given day
    #[must_use]
    pub fn occupies(&self, day: Weekday, period: char) -> bool {
        self.periods_on(day).contains(period)
    }

    /// Days the course meets on, with their period codes
    pub fn meeting_days(&self) -> impl Iterator<Item = (Weekday, &str)> {
        Weekday::ALL
            .into_iter()
            .map(|day| (day, self.periods_on(day)))
            .filter(|(_, periods)| !periods.is_empty())
    }

    /// Deduplication key: (name, id, teacher)
    #[must_use]
    pub fn identity(&self) -> (&str, &str, &str) {
        (&self.name, &self.id, &self.teacher)
    }

    /// Whether the course is required (必)
    #[must_use]
    pub fn is_compulsory(&self) -> bool {
        self.compulsory_elective == COMPULSORY
    }

    /// Whether the course is English-taught
    #[must_use]
    pub fn is_english_taught(&self) -> bool {
        self.english == "1"
    }

    /// Credit as a number; unparsable credits count as zero
    #[must_use]
    pub fn credit_value(&self) -> f32 {
        self.credit.trim().parse::<f32>().unwrap_or(0.0)
    }

    /// Number of weekly class periods
    #[must_use]
    pub fn weekly_hours(&self) -> usize {
        self.schedule.iter().map(|p| p.chars().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new("CSE101", "Programming", "Lin")
            .with_day(Weekday::Monday, "34")
            .with_day(Weekday::Thursday, "5");

        assert_eq!(course.identity(), ("Programming", "CSE101", "Lin"));
        assert!(course.meets_on(Weekday::Monday));
        assert!(!course.meets_on(Weekday::Tuesday));
        assert!(course.occupies(Weekday::Monday, '4'));
        assert!(!course.occupies(Weekday::Thursday, '4'));
        assert_eq!(course.weekly_hours(), 3);
        assert_eq!(course.meeting_days().count(), 2);
    }

    #[test]
    fn test_credit_value() {
        let mut course = Course::new("X", "X", "");
        course.credit = "3".to_string();
        assert!((course.credit_value() - 3.0).abs() < f32::EPSILON);

        course.credit = "n/a".to_string();
        assert!(course.credit_value().abs() < f32::EPSILON);
    }

    #[test]
    fn test_class_label_fallback() {
        assert_eq!(CourseClass::from_label("甲班"), CourseClass::TrackA);
        assert_eq!(CourseClass::from_label("全英班"), CourseClass::FullEnglish);
        assert_eq!(CourseClass::from_label("丙班"), CourseClass::Unsectioned);
        assert_eq!(CourseClass::from_label(""), CourseClass::Unsectioned);
    }

    #[test]
    fn test_compulsory_flags() {
        let mut course = Course::new("X", "X", "");
        course.compulsory_elective = COMPULSORY.to_string();
        course.english = "1".to_string();
        assert!(course.is_compulsory());
        assert!(course.is_english_taught());

        course.compulsory_elective = ELECTIVE.to_string();
        assert!(!course.is_compulsory());
    }
}
