//! Plain-text report for the terminal

use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;

/// Plain-text report generator
///
/// Lists the occupied periods of every weekday followed by the totals, which
/// reads better in a terminal than a wide grid of CJK names.
pub struct TextReporter;

impl TextReporter {
    /// Create a new text reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TextReporter {
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let mut out = String::new();
        writeln!(out, "{}", ctx.title)?;
        writeln!(out, "{}", "=".repeat(ctx.title.chars().count().max(8)))?;

        if ctx.grid.is_empty() {
            writeln!(out, "(no scheduled periods)")?;
        }

        let rows: Vec<_> = ctx.grid.rows().collect();
        for (day_idx, day) in crate::core::models::Weekday::ALL.into_iter().enumerate() {
            let occupied: Vec<_> = rows
                .iter()
                .filter(|(_, cells)| !cells[day_idx].is_empty())
                .collect();
            if occupied.is_empty() {
                continue;
            }

            writeln!(out, "\n星期{} ({day})", day.display_name())?;
            for (period, cells) in occupied {
                let names: Vec<String> = cells[day_idx]
                    .iter()
                    .map(|c| format!("{} {}", c.id, c.name))
                    .collect();
                let marker = if cells[day_idx].len() > 1 { " ⚠" } else { "" };
                writeln!(
                    out,
                    "  {} {:>5}-{:<5} {}{marker}",
                    period.code,
                    period.start,
                    period.end,
                    names.join(" / ")
                )?;
            }
        }

        writeln!(
            out,
            "\n{} courses, {} credits, {} periods per week",
            ctx.course_count(),
            ctx.total_credits(),
            ctx.summary.total_hours
        )?;

        let conflicts = ctx.conflict_lines();
        if !conflicts.is_empty() {
            writeln!(out, "Time conflicts:")?;
            for line in conflicts {
                writeln!(out, "  {line}")?;
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Weekday};

    #[test]
    fn test_text_lists_occupied_periods() {
        let mut a = Course::new("CSE101", "程式設計", "林").with_day(Weekday::Tuesday, "56");
        a.credit = "3".to_string();
        let selected = vec![a];
        let ctx = ReportContext::new("課表", &selected, &[]);

        let text = TextReporter::new().render(&ctx).unwrap();
        assert!(text.contains("星期二 (Tuesday)"));
        assert!(text.contains("  5 13:10-14:00 CSE101 程式設計"));
        assert!(!text.contains("星期一"));
        assert!(text.contains("1 courses, 3.0 credits, 2 periods per week"));
        assert!(!text.contains("Time conflicts"));
    }

    #[test]
    fn test_text_flags_conflicts() {
        let selected = vec![
            Course::new("A", "Algebra", "").with_day(Weekday::Monday, "1"),
            Course::new("B", "Biology", "").with_day(Weekday::Monday, "1"),
        ];
        let ctx = ReportContext::new("x", &selected, &[]);

        let text = TextReporter::new().render(&ctx).unwrap();
        assert!(text.contains("A Algebra / B Biology ⚠"));
        assert!(text.contains("Time conflicts:\n  一 1: A, B"));
    }
}
