//! HTML report generator
//!
//! Generates the weekly schedule as a self-contained HTML page with embedded
//! CSS. Weekend columns are shaded and cells holding more than one course are
//! highlighted as conflicts.

use crate::core::models::Weekday;
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/schedule.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        let mut output = HTML_TEMPLATE.to_string();

        output = output.replace("{{title}}", &escape_html(&ctx.title));
        output = output.replace("{{course_count}}", &ctx.course_count().to_string());
        output = output.replace("{{total_credits}}", &ctx.total_credits());
        output = output.replace("{{total_hours}}", &ctx.summary.total_hours.to_string());

        let schedule_html = Self::generate_schedule_html(ctx);
        output = output.replace("{{schedule_table}}", &schedule_html);

        let conflicts_html = Self::generate_conflicts_html(ctx);
        output = output.replace("{{conflicts}}", &conflicts_html);

        let courses_html = Self::generate_courses_html(ctx);
        output = output.replace("{{course_table}}", &courses_html);

        output
    }

    /// Generate the rows of the period × weekday table
    fn generate_schedule_html(ctx: &ReportContext) -> String {
        let mut html = String::from("  <tr><th>節</th>");
        for day in Weekday::ALL {
            let _ = write!(html, "<th{}>{}</th>", weekend_class(day, ""), day.display_name());
        }
        html.push_str("</tr>\n");

        for (period, cells) in ctx.grid.rows() {
            let _ = write!(
                html,
                "  <tr><td class=\"period\">{}<small>{}~{}</small></td>",
                period.code, period.start, period.end
            );
            for (day, cell) in Weekday::ALL.into_iter().zip(cells) {
                let extra = if cell.len() > 1 { "conflict" } else { "" };
                let _ = write!(html, "<td{}>", weekend_class(day, extra));
                for course in cell {
                    let _ = write!(
                        html,
                        "<span class=\"course\" title=\"{}\">{}</span>",
                        escape_html(&course.id),
                        escape_html(&course.name)
                    );
                }
                html.push_str("</td>");
            }
            html.push_str("</tr>\n");
        }

        html
    }

    /// Generate the conflict warning list
    fn generate_conflicts_html(ctx: &ReportContext) -> String {
        let lines = ctx.conflict_lines();
        if lines.is_empty() {
            return String::new();
        }

        let mut html = String::from("<h2 class=\"warning\">Time Conflicts</h2>\n<ul class=\"warning\">\n");
        for line in lines {
            let _ = writeln!(html, "  <li>{}</li>", escape_html(&line));
        }
        html.push_str("</ul>");
        html
    }

    /// Generate the rows of the selected course table
    fn generate_courses_html(ctx: &ReportContext) -> String {
        let mut html = String::from(
            "  <tr><th>Code</th><th>Name</th><th>Teacher</th><th>Credits</th><th>Time</th><th>Register</th></tr>\n",
        );

        for course in ctx.selected {
            let time: Vec<String> = course
                .meeting_days()
                .map(|(day, periods)| format!("{}{periods}", day.display_name()))
                .collect();
            let name = if course.url.is_empty() {
                escape_html(&course.name)
            } else {
                format!(
                    "<a href=\"{}\">{}</a>",
                    escape_html(&course.url),
                    escape_html(&course.name)
                )
            };
            let register = if ctx.is_marked(&course.id) { "✓" } else { "" };
            let _ = writeln!(
                html,
                "  <tr><td>{}</td><td>{name}</td><td>{}</td><td>{}</td><td>{}</td><td>{register}</td></tr>",
                escape_html(&course.id),
                escape_html(&course.teacher),
                escape_html(&course.credit),
                time.join(" ")
            );
        }

        html
    }
}

/// ` class="..."` attribute for a cell, empty when no class applies
fn weekend_class(day: Weekday, extra: &str) -> String {
    let weekend = matches!(day, Weekday::Saturday | Weekday::Sunday);
    match (weekend, extra.is_empty()) {
        (false, true) => String::new(),
        (true, true) => " class=\"weekend\"".to_string(),
        (false, false) => format!(" class=\"{extra}\""),
        (true, false) => format!(" class=\"weekend {extra}\""),
    }
}

/// Escape text for HTML element content and attribute values
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
