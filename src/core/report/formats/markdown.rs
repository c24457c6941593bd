//! Markdown report generator
//!
//! Renders the weekly schedule as Markdown tables. These reports render well
//! in GitHub, GitLab, and VS Code.

use crate::core::models::Weekday;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/schedule.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = MARKDOWN_TEMPLATE.to_string();

        output = output.replace("{{title}}", &escape_cell(&ctx.title));
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace("{{total_credits}}", &ctx.total_credits());
        output = output.replace("{{total_hours}}", &ctx.summary.total_hours.to_string());

        let schedule_table = Self::generate_schedule_table(ctx);
        output = output.replace("{{schedule_table}}", &schedule_table);

        let course_table = Self::generate_course_table(ctx);
        output = output.replace("{{course_table}}", &course_table);

        let conflicts = ctx.conflict_lines();
        let conflicts = if conflicts.is_empty() {
            String::new()
        } else {
            let mut section = String::from("## ⚠️ Time Conflicts\n\n");
            for line in conflicts {
                let _ = writeln!(section, "- {}", escape_cell(&line));
            }
            section
        };
        output = output.replace("{{conflicts}}", &conflicts);

        output
    }

    /// Generate the period × weekday table
    fn generate_schedule_table(ctx: &ReportContext) -> String {
        let mut table = String::from("| 節 | 時間 |");
        for day in Weekday::ALL {
            let _ = write!(table, " {} |", day.display_name());
        }
        table.push_str("\n|---|---|");
        table.push_str(&"---|".repeat(Weekday::ALL.len()));
        table.push('\n');

        for (period, cells) in ctx.grid.rows() {
            let _ = write!(table, "| {} | {}–{} |", period.code, period.start, period.end);
            for cell in cells {
                let names: Vec<String> = cell.iter().map(|c| escape_cell(&c.name)).collect();
                let _ = write!(table, " {} |", names.join("<br>"));
            }
            table.push('\n');
        }

        table
    }

    /// Generate the list of selected courses
    fn generate_course_table(ctx: &ReportContext) -> String {
        if ctx.selected.is_empty() {
            return "_No courses selected._\n".to_string();
        }

        let mut table = String::from("| Code | Name | Teacher | Credits | Time | Register |\n");
        table.push_str("|---|---|---|---|---|---|\n");

        for course in ctx.selected {
            let time: Vec<String> = course
                .meeting_days()
                .map(|(day, periods)| format!("{}{periods}", day.display_name()))
                .collect();
            let register = if ctx.is_marked(&course.id) { "✓" } else { "" };
            let _ = writeln!(
                table,
                "| {} | {} | {} | {} | {} | {register} |",
                escape_cell(&course.id),
                escape_cell(&course.name),
                escape_cell(&course.teacher),
                escape_cell(&course.credit),
                time.join(" ")
            );
        }

        table
    }
}

/// Escape characters that would break a Markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;

    #[test]
    fn test_markdown_schedule() {
        let mut a = Course::new("CSE101", "程式設計", "林").with_day(Weekday::Monday, "34");
        a.credit = "3".to_string();
        let b = Course::new("CSE102", "資料|結構", "陳").with_day(Weekday::Monday, "4");
        let selected = vec![a, b];
        let marked = vec!["CSE101".to_string()];
        let ctx = ReportContext::new("113上 課表", &selected, &marked);

        let report = MarkdownReporter::new().render(&ctx).unwrap();
        assert!(report.starts_with("# 113上 課表"));
        assert!(report.contains("| 4 | 11:10–12:00 | 程式設計<br>資料\\|結構 |"));
        assert!(report.contains("| CSE101 | 程式設計 | 林 | 3 | 一34 | ✓ |"));
        assert!(report.contains("- 一 4: CSE101, CSE102"));
        assert!(!report.contains("{{"));
    }

    #[test]
    fn test_empty_selection() {
        let ctx = ReportContext::new("empty", &[], &[]);
        let report = MarkdownReporter::new().render(&ctx).unwrap();
        assert!(report.contains("_No courses selected._"));
        assert!(!report.contains("Time Conflicts"));
    }
}
