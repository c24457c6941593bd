//! Select command handler

use super::{format_course_line, Workspace};
use crate::args::SelectSubcommand;
use selector_helper::core::catalog::find_course;
use selector_helper::core::conflict::conflicting_courses;
use selector_helper::core::schedule::CreditSummary;
use selector_helper::verbose;

/// Dispatch select subcommands
pub fn run(workspace: &mut Workspace, subcommand: SelectSubcommand) {
    match subcommand {
        SelectSubcommand::Add { ids } => add(workspace, &ids),
        SelectSubcommand::Remove { ids } => remove(workspace, &ids),
        SelectSubcommand::Clear => {
            let count = workspace.session.selected().len();
            workspace.session.clear_selection();
            println!("✓ Cleared {count} selected courses");
        }
        SelectSubcommand::List => {
            list(workspace);
            return;
        }
    }
    workspace.save();
}

fn add(workspace: &mut Workspace, ids: &[String]) {
    for id in ids {
        let Some(course) = find_course(&workspace.catalog, id) else {
            eprintln!("✗ No course '{id}' in the catalog");
            continue;
        };

        let clashes: Vec<String> = conflicting_courses(course, workspace.session.selected())
            .map(|other| format!("{} {}", other.id, other.name))
            .collect();

        if workspace.session.select(course) {
            println!("✓ Selected {} {}", course.id, course.name);
            for clash in clashes {
                println!("  ⚠ Time conflict with {clash}");
            }
        } else {
            println!("  {id} is already selected");
        }
    }
}

fn remove(workspace: &mut Workspace, ids: &[String]) {
    for id in ids {
        if workspace.session.deselect(id) {
            println!("✓ Removed {id}");
            if workspace.session.is_marked(id) {
                verbose!("  {id} stays on the registration list but is skipped by export");
            }
        } else {
            eprintln!("✗ {id} is not selected");
        }
    }
}

fn list(workspace: &Workspace) {
    let session = &workspace.session;
    if !session.unresolved().is_empty() {
        println!("Not in the current catalog (kept): {}", session.unresolved().join(", "));
    }
    if session.selected().is_empty() {
        println!("No courses selected.");
        return;
    }

    for course in session.selected() {
        let register = if session.is_marked(&course.id) { " [register]" } else { "" };
        println!("{}{register}", format_course_line(course, session));
    }

    let summary = CreditSummary::from_courses(session.selected());
    println!(
        "{} courses, {:.1} credits, {} periods per week",
        session.selected().len(),
        summary.total_credits,
        summary.total_hours
    );
}
