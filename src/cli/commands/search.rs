//! Search command handler
//!
//! Applies the basic text filter and the advanced filters to the catalog.
//! Filter edits apply to this run only unless `--save` is given.

use super::{print_courses, Workspace};
use selector_helper::core::filter::{filter_courses, FilterOptions};
use selector_helper::debug;
use selector_helper::models::{AdvancedFilters, FilterField, FilterKind, FilterLogic};

/// Search flags collected from the command line
#[derive(Debug, Default)]
pub struct SearchArgs {
    /// Free-text keywords
    pub query: Vec<String>,
    /// `FIELD=VALUE` text filters
    pub filters: Vec<String>,
    /// `FIELD=LOGIC` pairs
    pub logic: Vec<String>,
    /// `FIELD=OPTION[,OPTION]` pairs
    pub options: Vec<String>,
    /// Fields to deactivate
    pub off: Vec<String>,
    /// Reset before applying edits
    pub clear: bool,
    /// `Some(false)` hides conflicts, `Some(true)` shows them
    pub display_conflicts: Option<bool>,
    /// List the selection instead
    pub selected_only: bool,
    /// Field whose options to print
    pub list_options: Option<String>,
    /// Output cap
    pub limit: Option<usize>,
    /// Persist the edited filters
    pub save: bool,
}

/// Run the search command
pub fn run(workspace: &mut Workspace, args: &SearchArgs) {
    if let Some(field) = &args.list_options {
        list_options(workspace, field);
        return;
    }

    if let Err(e) = apply_edits(workspace, args) {
        eprintln!("✗ {e}");
        std::process::exit(2);
    }

    let session = &workspace.session;
    if args.selected_only {
        print_courses(session.selected(), session, args.limit);
    } else {
        debug!(
            "Searching {} courses for '{}' ({} advanced filters active)",
            workspace.catalog.len(),
            session.basic_filter,
            session.advanced_filters.iter().filter(|(_, e)| e.active).count()
        );
        let result = filter_courses(
            &workspace.catalog,
            &session.basic_filter,
            &session.advanced_filters,
            session.filter_context(),
        );
        print_courses(result, session, args.limit);
    }

    if args.save {
        workspace.save();
    }
}

/// Apply the command-line filter edits to the session
fn apply_edits(workspace: &mut Workspace, args: &SearchArgs) -> Result<(), String> {
    let session = &mut workspace.session;
    if args.clear {
        session.basic_filter.clear();
        session.advanced_filters = AdvancedFilters::default();
    }
    if !args.query.is_empty() {
        session.basic_filter = args.query.join(" ");
    }
    if let Some(display) = args.display_conflicts {
        session.display_conflict_courses = display;
    }
    edit_advanced(&mut session.advanced_filters, args)
}

/// Apply `--off`, `--filter`, `--option` and `--logic` in that order
///
/// # Errors
/// Returns a message naming the offending argument.
pub fn edit_advanced(filters: &mut AdvancedFilters, args: &SearchArgs) -> Result<(), String> {
    for name in &args.off {
        let field: FilterField = name.parse()?;
        filters.get_mut(field).active = false;
    }

    for pair in &args.filters {
        let (field, value) = split_pair(pair)?;
        if field.kind() != FilterKind::Text {
            return Err(format!("{field} takes options; use --option {field}=..."));
        }
        let element = filters.get_mut(field);
        element.active = true;
        element.value = value.to_string();
    }

    for pair in &args.options {
        let (field, value) = split_pair(pair)?;
        if field.kind() == FilterKind::Text {
            return Err(format!("{field} is a text field; use --filter {field}=..."));
        }
        let element = filters.get_mut(field);
        element.active = true;
        for option in value.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            element.set_option(normalize_option(field, option)?, true);
        }
    }

    for pair in &args.logic {
        let (field, value) = split_pair(pair)?;
        let logic: FilterLogic = value.parse()?;
        filters.get_mut(field).filter_logic = logic;
    }

    Ok(())
}

fn split_pair(pair: &str) -> Result<(FilterField, &str), String> {
    let (field, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("Expected FIELD=VALUE, got '{pair}'"))?;
    Ok((field.parse()?, value.trim()))
}

/// Map user spellings onto stored option keys
fn normalize_option(field: FilterField, option: &str) -> Result<String, String> {
    match field {
        FilterField::Weekday => option
            .parse::<selector_helper::models::Weekday>()
            .map(|day| day.key().to_string()),
        FilterField::Period => Ok(option.to_ascii_uppercase()),
        _ => Ok(option.to_string()),
    }
}

fn list_options(workspace: &Workspace, field: &str) {
    let field: FilterField = match field.parse() {
        Ok(field) => field,
        Err(e) => {
            eprintln!("✗ {e}");
            std::process::exit(2);
        }
    };

    let choices = FilterOptions::from_courses(&workspace.catalog).choices(field);
    if choices.is_empty() {
        println!("{field} is a free-text field");
        return;
    }

    let element = workspace.session.advanced_filters.get(field);
    for choice in choices {
        let on = if element.is_option_active(&choice.value) { "x" } else { " " };
        if choice.display == choice.value {
            println!("[{on}] {}", choice.value);
        } else {
            println!("[{on}] {} ({})", choice.value, choice.display);
        }
    }
}
