//! Required command handler: the 學期必修 view

use super::{print_courses, Workspace};
use selector_helper::core::filter::RequiredCourseFilters;

/// Run the required command
///
/// Given flags replace the stored value of their field; an empty string
/// clears it. The filters are saved for the next run.
pub fn run(
    workspace: &mut Workspace,
    department: Option<String>,
    grade: Option<String>,
    class: Option<String>,
    clear: bool,
) {
    let filters = &mut workspace.session.required_filters;
    if clear {
        *filters = RequiredCourseFilters::default();
    }
    for (slot, value) in [
        (&mut filters.department, department),
        (&mut filters.grade, grade),
        (&mut filters.class, class),
    ] {
        if let Some(value) = value {
            *slot = Some(value).filter(|v| !v.trim().is_empty());
        }
    }

    if workspace.session.required_filters.is_empty() {
        println!("No department, grade or class given; listing every course.");
    }

    let courses = workspace.session.required_filters.apply(&workspace.catalog);
    print_courses(courses, &workspace.session, None);
    workspace.save();
}
