//! Integration tests for searching, scheduling and ranking the sample catalog

use selector_helper::core::catalog::{find_course, parse_catalog_csv};
use selector_helper::core::conflict::{conflicting_courses, detect_time_conflict, is_conflict};
use selector_helper::core::detective::{move_element, rank_courses, restore_order, toggle_element};
use selector_helper::core::filter::{filter_courses, FilterContext, FilterOptions, RequiredCourseFilters};
use selector_helper::core::schedule::{CreditSummary, ScheduleGrid};
use selector_helper::models::{
    default_order, AdvancedFilters, Course, FilterField, FilterLogic, OrderElement, TimeSlot, Weekday,
};
use std::path::Path;

fn catalog() -> Vec<Course> {
    parse_catalog_csv(Path::new(env!("CARGO_MANIFEST_DIR")).join("samples/catalog.csv"))
        .expect("Failed to parse CSV sample")
}

fn ids<'a>(courses: impl IntoIterator<Item = &'a Course>) -> Vec<&'a str> {
    courses.into_iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn test_basic_search_requires_every_keyword() {
    let courses = catalog();
    let none = AdvancedFilters::default();
    let ctx = FilterContext::show_all(&[]);

    let result = filter_courses(&courses, "計算機 陳", &none, ctx);
    assert_eq!(ids(result), vec!["CSE1002"]);

    // Department and programs are searched too
    let result = filter_courses(&courses, "人工智慧", &none, ctx);
    assert_eq!(ids(result), vec!["CSE1001", "CSE5001"]);

    assert_eq!(filter_courses(&courses, "  ", &none, ctx).len(), courses.len());
}

#[test]
fn test_advanced_filters_combine() {
    let courses = catalog();
    let mut filters = AdvancedFilters::default();
    filters.set_options(FilterField::Department, ["體育室"], FilterLogic::Include);
    filters.set_options(FilterField::Weekday, ["Saturday"], FilterLogic::Include);
    // Keywords of one group are AND'ed, so both must be absent
    filters.set_text(FilterField::Name, "游泳 羽球", FilterLogic::Exclude);

    let result = filter_courses(&courses, "", &filters, FilterContext::show_all(&[]));
    assert_eq!(ids(result), vec!["PE1001"]);
}

#[test]
fn test_period_equal_requires_exact_periods() {
    let courses = catalog();
    let mut filters = AdvancedFilters::default();
    filters.set_options(FilterField::Period, ["3", "4"], FilterLogic::Equal);

    // CSE1001 meets 一34 but also 三5, so only courses meeting exactly 3,4 on every day pass
    let result = filter_courses(&courses, "", &filters, FilterContext::show_all(&[]));
    assert!(result.is_empty());

    filters.set_options(FilterField::Period, ["1", "2"], FilterLogic::Equal);
    let result = filter_courses(&courses, "", &filters, FilterContext::show_all(&[]));
    assert_eq!(ids(result), vec!["CHI1001", "ENG1001"]);
}

#[test]
fn test_hiding_conflicts_keeps_selected_courses() {
    let courses = catalog();
    let selected = vec![find_course(&courses, "CSE1001").unwrap().clone()];
    let none = AdvancedFilters::default();

    let shown = filter_courses(&courses, "計算機", &none, FilterContext::show_all(&selected));
    assert_eq!(ids(shown), vec!["CSE1001", "CSE1002"]);

    let hidden = filter_courses(&courses, "計算機", &none, FilterContext::hide_conflicts(&selected));
    assert_eq!(ids(hidden), vec!["CSE1001"]);
}

#[test]
fn test_filtering_is_idempotent() {
    let courses = catalog();
    let mut filters = AdvancedFilters::default();
    filters.set_options(FilterField::CompulsoryElective, ["必"], FilterLogic::Include);

    let once: Vec<Course> = filter_courses(&courses, "", &filters, FilterContext::show_all(&[]))
        .into_iter()
        .cloned()
        .collect();
    let twice = filter_courses(&once, "", &filters, FilterContext::show_all(&[]));
    assert_eq!(ids(&once), ids(twice));
}

#[test]
fn test_filter_options_from_catalog() {
    let options = FilterOptions::from_courses(&catalog());
    assert!(options.departments.contains(&"體育室".to_string()));
    assert_eq!(options.credits, vec!["1", "2", "3"]);
    assert_eq!(options.choices(FilterField::Period).len(), 15);
    assert!(options.choices(FilterField::Name).is_empty());
}

#[test]
fn test_required_courses_of_a_class() {
    let courses = catalog();
    let filters = RequiredCourseFilters {
        department: Some("資訊工程學系".to_string()),
        grade: Some("1".to_string()),
        class: Some("乙班".to_string()),
    };
    assert_eq!(ids(filters.apply(&courses)), vec!["CSE1002"]);

    let electives_only = RequiredCourseFilters {
        department: Some("資訊工程學系碩士班".to_string()),
        ..RequiredCourseFilters::default()
    };
    assert!(electives_only.apply(&courses).is_empty());
}

#[test]
fn test_conflicts_between_sections() {
    let courses = catalog();
    let a = find_course(&courses, "CSE1001").unwrap();
    let b = find_course(&courses, "CSE1002").unwrap();
    let swim = find_course(&courses, "PE1002").unwrap();

    assert!(is_conflict(a, b));
    assert!(is_conflict(b, a));
    assert!(!is_conflict(a, swim));

    let selected = vec![a.clone(), swim.clone()];
    assert!(detect_time_conflict(b, &selected));
    assert_eq!(ids(conflicting_courses(b, &selected)), vec!["CSE1001"]);
    // A selected course does not clash with itself
    assert_eq!(conflicting_courses(a, &selected).count(), 0);
}

#[test]
fn test_schedule_grid_and_totals() {
    let courses = catalog();
    let selected: Vec<Course> = ["CSE1001", "CSE1002", "PE1001"]
        .iter()
        .map(|id| find_course(&courses, id).unwrap().clone())
        .collect();

    let grid = ScheduleGrid::build(&selected);
    assert_eq!(ids(grid.cell(Weekday::Monday, '3').iter().copied()), vec!["CSE1001", "CSE1002"]);
    assert!(grid.cell(Weekday::Monday, '5').is_empty());
    assert!(grid.uses_weekend());
    assert_eq!(grid.cell_conflicts().len(), 3);

    let summary = CreditSummary::from_courses(&selected);
    assert!((summary.total_credits - 7.0).abs() < f32::EPSILON);
    assert_eq!(summary.total_hours, 7);
}

#[test]
fn test_detective_default_order() {
    let courses = catalog();
    let ranked = rank_courses(&courses, &default_order(), &[], Some(1));
    assert_eq!(
        ids(ranked),
        vec!["GEN1001", "PE1001", "PE1002", "PE1003", "XIN1001", "CHI1001"]
    );
}

#[test]
fn test_detective_random_buckets_are_seeded() {
    let courses = catalog();
    let mut order = default_order();
    assert!(toggle_element(&mut order, "random-courses"));
    assert!(toggle_element(&mut order, "random-graduate-courses"));
    assert!(toggle_element(&mut order, "english-beginner"));

    let first = ids(rank_courses(&courses, &order, &[], Some(42)));
    let second = ids(rank_courses(&courses, &order, &[], Some(42)));
    assert_eq!(first, second);

    let mut random_part: Vec<&str> = first[6..9].to_vec();
    random_part.sort_unstable();
    assert_eq!(random_part, vec!["CSE1001", "CSE1002", "CSE2001"]);
    assert_eq!(first[9..], ["CSE5001", "ENG1001"]);
}

#[test]
fn test_detective_time_slots_narrow_the_pool() {
    let courses = catalog();
    let slots = [TimeSlot::new(Weekday::Saturday, '2')];
    assert_eq!(ids(rank_courses(&courses, &default_order(), &slots, None)), vec!["PE1002"]);
}

#[test]
fn test_order_edits_and_restore() {
    let mut order = default_order();
    assert!(move_element(&mut order, 4, 0));
    assert_eq!(order[0].id, "chinese-critical-thinking");
    assert!(!move_element(&mut order, 0, 99));
    assert!(!toggle_element(&mut order, "no-such-bucket"));

    let saved = vec![
        OrderElement {
            id: "random-courses".to_string(),
            label: "stale".to_string(),
            enabled: true,
        },
        OrderElement {
            id: "retired-bucket".to_string(),
            label: "gone".to_string(),
            enabled: true,
        },
    ];
    let restored = restore_order(saved);
    assert_eq!(restored.len(), default_order().len());
    assert_eq!(restored[0].id, "random-courses");
    assert!(restored[0].enabled);
    assert_ne!(restored[0].label, "stale");
    assert!(restored.iter().all(|e| e.id != "retired-bucket"));

    assert_eq!(restore_order(Vec::new()), default_order());
}
