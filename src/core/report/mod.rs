//! Schedule report generation
//!
//! Renders the weekly schedule of the selected courses as plain text,
//! Markdown or a self-contained HTML page.

pub mod formats;

use crate::core::models::Course;
use crate::core::schedule::{CreditSummary, ScheduleGrid};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat, TextReporter};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Report heading
    pub title: String,
    /// Selected courses in selection order
    pub selected: &'a [Course],
    /// Weekly grid of the selection
    pub grid: ScheduleGrid<'a>,
    /// Credit and hour totals
    pub summary: CreditSummary,
    /// Ids marked for registration
    pub marked: &'a [String],
}

impl<'a> ReportContext<'a> {
    /// Build the context for a selection
    #[must_use]
    pub fn new(title: impl Into<String>, selected: &'a [Course], marked: &'a [String]) -> Self {
        Self {
            title: title.into(),
            selected,
            grid: ScheduleGrid::build(selected),
            summary: CreditSummary::from_courses(selected),
            marked,
        }
    }

    /// Number of selected courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether the course is marked for registration
    #[must_use]
    pub fn is_marked(&self, id: &str) -> bool {
        self.marked.iter().any(|m| m == id)
    }

    /// Total credits formatted with one decimal
    #[must_use]
    pub fn total_credits(&self) -> String {
        format!("{:.1}", self.summary.total_credits)
    }

    /// One line per conflicting cell, e.g. `一 2: A, B`
    #[must_use]
    pub fn conflict_lines(&self) -> Vec<String> {
        self.grid
            .cell_conflicts()
            .into_iter()
            .map(|(slot, courses)| {
                let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
                format!("{} {}: {}", slot.weekday.display_name(), slot.period, ids.join(", "))
            })
            .collect()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, content)?;
        Ok(())
    }

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}
