//! Course filter engine
//!
//! Filtering happens in three passes:
//!
//! 1. the basic free-text filter (every keyword must hit one of the searchable
//!    fields),
//! 2. the advanced per-field filters ([`AdvancedFilters`]), all of which must
//!    pass,
//! 3. optionally, dropping unselected courses that clash with the selection.
//!
//! Every pass only removes courses, so applying the same filters to an
//! already filtered list returns it unchanged.

use crate::core::conflict::detect_time_conflict;
use crate::core::models::{
    AdvancedFilters, Course, CourseClass, FilterElement, FilterField, FilterKind, FilterLogic,
    Weekday, PERIODS,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Selection state the conflict pass needs
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Currently selected courses
    pub selected: &'a [Course],
    /// Keep courses that clash with the selection
    pub display_conflict_courses: bool,
}

impl<'a> FilterContext<'a> {
    /// Context that never drops conflicting courses
    #[must_use]
    pub const fn show_all(selected: &'a [Course]) -> Self {
        Self {
            selected,
            display_conflict_courses: true,
        }
    }

    /// Context that hides courses clashing with `selected`
    #[must_use]
    pub const fn hide_conflicts(selected: &'a [Course]) -> Self {
        Self {
            selected,
            display_conflict_courses: false,
        }
    }

    fn is_selected(&self, course: &Course) -> bool {
        self.selected.iter().any(|s| s.id == course.id)
    }
}

/// Apply the basic filter, the advanced filters and the conflict pass
pub fn filter_courses<'a, I>(
    courses: I,
    basic: &str,
    advanced: &AdvancedFilters,
    context: FilterContext<'_>,
) -> Vec<&'a Course>
where
    I: IntoIterator<Item = &'a Course>,
{
    let keywords = basic_keywords(basic);

    courses
        .into_iter()
        .filter(|course| matches_basic(course, &keywords))
        .filter(|course| matches_advanced(course, advanced))
        .filter(|course| {
            context.display_conflict_courses
                || context.is_selected(course)
                || !detect_time_conflict(course, context.selected)
        })
        .collect()
}

fn basic_keywords(text: &str) -> Vec<String> {
    text.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Whether every keyword appears in at least one searchable field
fn matches_basic(course: &Course, keywords: &[String]) -> bool {
    if keywords.is_empty() {
        return true;
    }
    let haystacks = [
        course.name.to_lowercase(),
        course.teacher.to_lowercase(),
        course.programs.to_lowercase(),
        course.id.to_lowercase(),
        course.department.to_lowercase(),
    ];
    keywords
        .iter()
        .all(|keyword| haystacks.iter().any(|field| field.contains(keyword.as_str())))
}

/// Whether the course passes every applicable advanced filter entry
#[must_use]
pub fn matches_advanced(course: &Course, filters: &AdvancedFilters) -> bool {
    filters
        .iter()
        .all(|(field, element)| matches_entry(course, field, element))
}

fn matches_entry(course: &Course, field: FilterField, element: &FilterElement) -> bool {
    if !element.active {
        return true;
    }
    match field.kind() {
        FilterKind::Text => {
            if element.value.trim().is_empty() {
                return true;
            }
            let value = field.value_of(course).unwrap_or_default();
            matches_text(value, &element.value, element.filter_logic)
        }
        FilterKind::Weekday => matches_weekdays(course, element),
        FilterKind::Period => matches_periods(course, element),
        FilterKind::Option => {
            let value = field.value_of(course).unwrap_or_default();
            matches_option(value, element)
        }
    }
}

/// Keyword match of a text field
///
/// The query is split on half- or full-width commas into groups that are
/// OR'd; each group is split on whitespace into keywords that are AND'd.
/// Groups without keywords are ignored; a query with no keyword at all
/// matches everything.
#[must_use]
pub fn matches_text(field_value: &str, query: &str, logic: FilterLogic) -> bool {
    let field_value = field_value.to_lowercase();
    let query = query.to_lowercase();

    let groups: Vec<Vec<&str>> = query
        .split([',', '，'])
        .map(|group| group.split_whitespace().collect::<Vec<_>>())
        .filter(|keywords| !keywords.is_empty())
        .collect();
    if groups.is_empty() {
        return true;
    }

    groups.iter().any(|keywords| {
        keywords.iter().all(|keyword| match logic {
            FilterLogic::Equal => field_value == *keyword,
            FilterLogic::Include => field_value.contains(keyword),
            FilterLogic::Exclude => !field_value.contains(keyword),
        })
    })
}

/// 星期 filter
fn matches_weekdays(course: &Course, element: &FilterElement) -> bool {
    match element.filter_logic {
        FilterLogic::Equal => Weekday::ALL
            .into_iter()
            .all(|day| element.is_option_active(day.key()) == course.meets_on(day)),
        logic => {
            let matched = Weekday::ALL
                .into_iter()
                .any(|day| course.meets_on(day) && element.is_option_active(day.key()));
            (logic == FilterLogic::Include) == matched
        }
    }
}

/// 節次 filter
fn matches_periods(course: &Course, element: &FilterElement) -> bool {
    match element.filter_logic {
        FilterLogic::Equal => {
            let wanted: String = element.active_option_keys().collect();
            course.meeting_days().all(|(_, periods)| {
                let mut codes: Vec<char> = periods.chars().collect();
                codes.sort_unstable();
                codes.into_iter().collect::<String>() == wanted
            })
        }
        logic => {
            let matched = course.meeting_days().any(|(_, periods)| {
                periods
                    .chars()
                    .any(|code| element.is_option_active(&code.to_string()))
            });
            (logic == FilterLogic::Include) == matched
        }
    }
}

/// Enumerable field filter; `equal` behaves like `include`
fn matches_option(value: &str, element: &FilterElement) -> bool {
    let matched = element.is_option_active(value);
    match element.filter_logic {
        FilterLogic::Equal | FilterLogic::Include => matched,
        FilterLogic::Exclude => !matched,
    }
}

/// One selectable option of an enumerable filter field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChoice {
    /// Value stored in `active_options`
    pub value: String,
    /// Label shown to the user
    pub display: String,
}

impl FilterChoice {
    fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            display: value.clone(),
            value,
        }
    }

    fn labelled(value: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            display: display.into(),
        }
    }
}

/// Options offered by the enumerable filter fields
///
/// Departments and credits are discovered from the loaded catalog; all other
/// fields have fixed option lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Sorted unique departments
    pub departments: Vec<String>,
    /// Sorted unique credit values
    pub credits: Vec<String>,
}

impl FilterOptions {
    /// Collect department and credit options from a catalog
    #[must_use]
    pub fn from_courses(courses: &[Course]) -> Self {
        let departments: BTreeSet<&str> = courses.iter().map(|c| c.department.as_str()).collect();
        let credits: BTreeSet<&str> = courses.iter().map(|c| c.credit.as_str()).collect();
        Self {
            departments: departments.into_iter().map(str::to_string).collect(),
            credits: credits.into_iter().map(str::to_string).collect(),
        }
    }

    /// Options of `field`; empty for free-text fields
    #[must_use]
    pub fn choices(&self, field: FilterField) -> Vec<FilterChoice> {
        match field {
            FilterField::Name | FilterField::Teacher | FilterField::Programs => Vec::new(),
            FilterField::Period => PERIODS.iter().map(|p| FilterChoice::plain(p.code.to_string())).collect(),
            FilterField::Weekday => Weekday::ALL
                .into_iter()
                .map(|day| FilterChoice::labelled(day.key(), day.display_name()))
                .collect(),
            FilterField::Grade => ["不分", "大一", "大二", "大三", "大四"]
                .into_iter()
                .enumerate()
                .map(|(grade, label)| FilterChoice::labelled(grade.to_string(), label))
                .collect(),
            FilterField::Class => CourseClass::ALL
                .into_iter()
                .map(|class| FilterChoice::plain(class.label()))
                .collect(),
            FilterField::Department => self.departments.iter().cloned().map(FilterChoice::plain).collect(),
            FilterField::CompulsoryElective => vec![
                FilterChoice::labelled("必", "必修"),
                FilterChoice::labelled("選", "選修"),
            ],
            FilterField::Credit => self.credits.iter().cloned().map(FilterChoice::plain).collect(),
            FilterField::English => vec![
                FilterChoice::labelled("1", "是"),
                FilterChoice::labelled("0", "否"),
            ],
        }
    }
}

/// Filters of the 學期必修 view
///
/// Each non-empty field must equal the course value exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredCourseFilters {
    /// Department
    #[serde(rename = "Department", default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Year level
    #[serde(rename = "Grade", default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    /// Section/track label
    #[serde(rename = "Class", default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl RequiredCourseFilters {
    /// Whether no field carries a non-empty value
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints().next().is_none()
    }

    fn constraints(&self) -> impl Iterator<Item = (FilterField, &str)> {
        [
            (FilterField::Department, &self.department),
            (FilterField::Grade, &self.grade),
            (FilterField::Class, &self.class),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (field, v))
        })
    }

    /// Whether the course is a required course matching every set field
    ///
    /// With no field set every course matches.
    #[must_use]
    pub fn matches(&self, course: &Course) -> bool {
        self.constraints().all(|(field, wanted)| {
            field.value_of(course) == Some(wanted) && course.is_compulsory()
        })
    }

    /// Courses matching these filters, in catalog order
    pub fn apply<'a>(&self, courses: &'a [Course]) -> Vec<&'a Course> {
        courses.iter().filter(|course| self.matches(course)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str, name: &str, teacher: &str) -> Course {
        Course::new(id, name, teacher)
    }

    fn ids(courses: &[&Course]) -> Vec<String> {
        courses.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_basic_filter_and_across_keywords() {
        let courses = vec![
            course("CS101", "Intro", "Lin"),
            course("CS102", "Systems", "Lin"),
            course("MA101", "Calculus", "Chen"),
        ];
        let filters = AdvancedFilters::default();
        let result = filter_courses(&courses, "cs101 lin", &filters, FilterContext::show_all(&[]));
        assert_eq!(ids(&result), vec!["CS101"]);

        let result = filter_courses(&courses, "  LIN ", &filters, FilterContext::show_all(&[]));
        assert_eq!(ids(&result), vec!["CS101", "CS102"]);

        let result = filter_courses(&courses, "", &filters, FilterContext::show_all(&[]));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_text_filter_groups() {
        assert!(matches_text("林小明, 陳大文", "林 明", FilterLogic::Include));
        assert!(!matches_text("林小明", "林 文", FilterLogic::Include));
        assert!(matches_text("林小明", "王，林", FilterLogic::Include));
        assert!(matches_text("Calculus", "calculus", FilterLogic::Equal));
        assert!(!matches_text("Calculus I", "calculus", FilterLogic::Equal));
        assert!(!matches_text("Calculus", "calc", FilterLogic::Exclude));
        assert!(matches_text("Algebra", "calc", FilterLogic::Exclude));
        assert!(matches_text("anything", " , ", FilterLogic::Equal));
    }

    #[test]
    fn test_inactive_text_entry_is_ignored() {
        let mut filters = AdvancedFilters::default();
        filters.set_text(FilterField::Name, "calculus", FilterLogic::Include);
        filters.get_mut(FilterField::Name).active = false;

        let courses = vec![course("X", "Algebra", "")];
        assert!(matches_advanced(&courses[0], &filters));
    }

    #[test]
    fn test_period_equal_requires_exact_set() {
        let mut filters = AdvancedFilters::default();
        filters.set_options(FilterField::Period, ["5", "6"], FilterLogic::Equal);

        let exact = course("A", "A", "").with_day(Weekday::Monday, "56");
        let longer = course("B", "B", "").with_day(Weekday::Monday, "567");
        let unordered = course("C", "C", "")
            .with_day(Weekday::Monday, "65")
            .with_day(Weekday::Thursday, "56");
        let second_day_differs = course("D", "D", "")
            .with_day(Weekday::Monday, "56")
            .with_day(Weekday::Friday, "5");

        assert!(matches_advanced(&exact, &filters));
        assert!(!matches_advanced(&longer, &filters));
        assert!(matches_advanced(&unordered, &filters));
        assert!(!matches_advanced(&second_day_differs, &filters));
    }

    #[test]
    fn test_period_include_and_exclude() {
        let mut filters = AdvancedFilters::default();
        filters.set_options(FilterField::Period, ["A"], FilterLogic::Include);

        let morning = course("A", "A", "").with_day(Weekday::Tuesday, "A1");
        let afternoon = course("B", "B", "").with_day(Weekday::Tuesday, "56");
        assert!(matches_advanced(&morning, &filters));
        assert!(!matches_advanced(&afternoon, &filters));

        filters.get_mut(FilterField::Period).filter_logic = FilterLogic::Exclude;
        assert!(!matches_advanced(&morning, &filters));
        assert!(matches_advanced(&afternoon, &filters));
    }

    #[test]
    fn test_weekday_filter() {
        let mut filters = AdvancedFilters::default();
        filters.set_options(FilterField::Weekday, ["Monday", "Wednesday"], FilterLogic::Include);

        let monday = course("A", "A", "").with_day(Weekday::Monday, "12");
        let both = course("B", "B", "")
            .with_day(Weekday::Monday, "12")
            .with_day(Weekday::Wednesday, "12");
        let friday = course("C", "C", "").with_day(Weekday::Friday, "12");

        assert!(matches_advanced(&monday, &filters));
        assert!(!matches_advanced(&friday, &filters));

        filters.get_mut(FilterField::Weekday).filter_logic = FilterLogic::Equal;
        assert!(!matches_advanced(&monday, &filters));
        assert!(matches_advanced(&both, &filters));

        filters.get_mut(FilterField::Weekday).filter_logic = FilterLogic::Exclude;
        assert!(matches_advanced(&friday, &filters));
        assert!(!matches_advanced(&both, &filters));
    }

    #[test]
    fn test_option_filter_equal_falls_back_to_include() {
        let mut cs = course("A", "A", "");
        cs.department = "資工系".to_string();
        let mut ee = course("B", "B", "");
        ee.department = "電機系".to_string();

        let mut filters = AdvancedFilters::default();
        filters.set_options(FilterField::Department, ["資工系"], FilterLogic::Include);
        assert!(matches_advanced(&cs, &filters));
        assert!(!matches_advanced(&ee, &filters));

        filters.get_mut(FilterField::Department).filter_logic = FilterLogic::Equal;
        assert!(matches_advanced(&cs, &filters));
        assert!(!matches_advanced(&ee, &filters));

        filters.get_mut(FilterField::Department).filter_logic = FilterLogic::Exclude;
        assert!(!matches_advanced(&cs, &filters));
        assert!(matches_advanced(&ee, &filters));
    }

    #[test]
    fn test_class_option_uses_label() {
        let mut track = course("A", "A", "");
        track.class = CourseClass::TrackA;
        let mut filters = AdvancedFilters::default();
        filters.set_options(FilterField::Class, ["甲班"], FilterLogic::Include);
        assert!(matches_advanced(&track, &filters));
    }

    #[test]
    fn test_hide_conflicts_keeps_selected() {
        let a = course("A", "A", "").with_day(Weekday::Monday, "12");
        let b = course("B", "B", "").with_day(Weekday::Monday, "23");
        let c = course("C", "C", "").with_day(Weekday::Monday, "45");
        let catalog = vec![a.clone(), b, c.clone()];
        let selected = vec![a, c];
        let filters = AdvancedFilters::default();

        let shown = filter_courses(&catalog, "", &filters, FilterContext::hide_conflicts(&selected));
        assert_eq!(ids(&shown), vec!["A", "C"]);

        let shown = filter_courses(&catalog, "", &filters, FilterContext::show_all(&selected));
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let mut catalog = vec![
            course("CS101", "Intro", "Lin").with_day(Weekday::Monday, "56"),
            course("CS102", "Systems", "Chen").with_day(Weekday::Monday, "567"),
            course("CS103", "Networks", "Lin").with_day(Weekday::Tuesday, "56"),
        ];
        catalog[2].department = "資工系".to_string();

        let mut filters = AdvancedFilters::default();
        filters.set_options(FilterField::Period, ["5", "6"], FilterLogic::Equal);
        filters.set_text(FilterField::Teacher, "lin", FilterLogic::Include);

        let context = FilterContext::show_all(&[]);
        let once = filter_courses(&catalog, "cs", &filters, context);
        let twice = filter_courses(once.iter().copied(), "cs", &filters, context);
        assert_eq!(once, twice);
        assert_eq!(ids(&once), vec!["CS101", "CS103"]);
    }

    #[test]
    fn test_filter_options_discovery() {
        let mut a = course("A", "A", "");
        a.department = "電機系".to_string();
        a.credit = "3".to_string();
        let mut b = course("B", "B", "");
        b.department = "資工系".to_string();
        b.credit = "2".to_string();
        let mut c = course("C", "C", "");
        c.department = "電機系".to_string();
        c.credit = "3".to_string();

        let options = FilterOptions::from_courses(&[a, b, c]);
        assert_eq!(options.departments, vec!["資工系", "電機系"]);
        assert_eq!(options.credits, vec!["2", "3"]);
        assert_eq!(options.choices(FilterField::Period).len(), 15);
        assert_eq!(options.choices(FilterField::Grade)[1].display, "大一");
        assert!(options.choices(FilterField::Name).is_empty());
    }

    #[test]
    fn test_required_filter_only_keeps_compulsory() {
        let mut required = course("A", "A", "");
        required.department = "資工系".to_string();
        required.grade = "1".to_string();
        required.compulsory_elective = "必".to_string();
        let mut elective = required.clone();
        elective.id = "B".to_string();
        elective.compulsory_elective = "選".to_string();
        let mut other_grade = required.clone();
        other_grade.id = "C".to_string();
        other_grade.grade = "2".to_string();
        let catalog = vec![required, elective, other_grade];

        let filters = RequiredCourseFilters {
            department: Some("資工系".to_string()),
            grade: Some("1".to_string()),
            class: Some(String::new()),
        };
        assert_eq!(ids(&filters.apply(&catalog)), vec!["A"]);

        let unset = RequiredCourseFilters::default();
        assert!(unset.is_empty());
        assert_eq!(unset.apply(&catalog).len(), 3);
    }

    #[test]
    fn test_required_filters_json_shape() {
        let filters: RequiredCourseFilters =
            serde_json::from_str(r#"{"Department": "資工系", "Grade": ""}"#).unwrap();
        assert_eq!(filters.department.as_deref(), Some("資工系"));
        assert!(filters.class.is_none());
    }
}
