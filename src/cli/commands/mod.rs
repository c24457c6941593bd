//! CLI command handlers for `SelectorHelper`.
//!
//! Each command is implemented in its own submodule. Commands that work on
//! the planner state share a [`Workspace`]: the configuration, the loaded
//! catalog, the state store and the session restored from it.

pub mod config;
pub mod detective;
pub mod register;
pub mod required;
pub mod schedule;
pub mod search;
pub mod select;
pub mod transfer;
pub mod versions;

use selector_helper::config::Config;
use selector_helper::core::catalog::load_catalog;
use selector_helper::core::conflict::detect_time_conflict;
use selector_helper::core::session::{acknowledge_notice, notice_pending, Session};
use selector_helper::core::store::Store;
use selector_helper::models::Course;
use selector_helper::{error, warn};
use std::path::Path;

/// Shown once per announcement version
const NOTICE: &str = "\
SelectorHelper {{version}}
  • Your selection, filters and registration list are saved between runs.
  • `schedule` draws the weekly timetable and flags clashing periods.
  • `export` prints the script that fills the registration page; paste it
    into the browser console on the registration site.
  • Always double-check the result on the official registration system.";

/// Planner state shared by the session commands
pub struct Workspace {
    /// Loaded catalog, empty when loading failed
    pub catalog: Vec<Course>,
    /// Persisted key/value state
    pub store: Store,
    /// Session restored from the store
    pub session: Session,
}

impl Workspace {
    /// Load the catalog and restore the session
    ///
    /// A catalog that cannot be loaded is reported and replaced with an empty
    /// one so state-only commands keep working.
    pub fn load(config: &Config) -> Self {
        let catalog = if config.paths.catalog.is_empty() {
            eprintln!("✗ No catalog configured. Use --catalog or `config set catalog <PATH>`.");
            Vec::new()
        } else {
            match load_catalog(Path::new(&config.paths.catalog)) {
                Ok(courses) => courses,
                Err(e) => {
                    error!("Failed to load catalog {}: {e}", config.paths.catalog);
                    eprintln!("✗ Failed to load catalog {}: {e}", config.paths.catalog);
                    Vec::new()
                }
            }
        };

        let mut store = if config.paths.state_file.is_empty() {
            Store::in_memory()
        } else {
            Store::open(Path::new(&config.paths.state_file))
        };

        let version = &config.notice.version;
        if !version.is_empty() && notice_pending(&store, version) {
            eprintln!("{}\n", NOTICE.replace("{{version}}", version));
            acknowledge_notice(&mut store, version, true);
            if let Err(e) = store.save() {
                warn!("Failed to record the announcement as seen: {e}");
            }
        }

        let session = Session::restore(&store, &catalog);
        Self {
            catalog,
            store,
            session,
        }
    }

    /// Persist the session and write the store to disk
    pub fn save(&mut self) {
        self.session.persist(&mut self.store);
        if let Err(e) = self.store.save() {
            error!("Failed to save session state: {e}");
            eprintln!("✗ Failed to save session state: {e}");
        }
    }
}

/// Compact meeting time, e.g. `一34 三5`
pub fn format_time(course: &Course) -> String {
    course
        .meeting_days()
        .map(|(day, periods)| format!("{}{periods}", day.display_name()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One listing line for a course
///
/// Selected courses carry `*`, courses clashing with the selection carry `!`.
pub fn format_course_line(course: &Course, session: &Session) -> String {
    let flag = if session.is_selected(&course.id) {
        '*'
    } else if detect_time_conflict(course, session.selected()) {
        '!'
    } else {
        ' '
    };
    format!(
        "{flag} {:<8} {:<24} {:<12} {:>3} {:<2} {}",
        course.id,
        course.name,
        course.teacher,
        course.credit,
        course.compulsory_elective,
        format_time(course)
    )
}

/// Print a course listing, optionally truncated
pub fn print_courses<'a, I>(courses: I, session: &Session, limit: Option<usize>)
where
    I: IntoIterator<Item = &'a Course>,
{
    let courses: Vec<&Course> = courses.into_iter().collect();
    let shown = limit.unwrap_or(courses.len()).min(courses.len());
    for course in &courses[..shown] {
        println!("{}", format_course_line(course, session));
    }
    if shown < courses.len() {
        println!("… {} more (use --limit to show more)", courses.len() - shown);
    }
    println!("{} courses", courses.len());
}
