//! Weekly schedule grid
//!
//! Projects the selected courses onto the fixed weekday × period timetable.
//! A course shows up in every cell it occupies, and a cell holding more than
//! one course is an unresolved time conflict.

use crate::core::models::{Course, Period, TimeSlot, Weekday, PERIODS};

/// 7 × 15 grid of selected courses, indexed by weekday then period
#[derive(Debug, Clone)]
pub struct ScheduleGrid<'a> {
    cells: Vec<Vec<Vec<&'a Course>>>,
}

impl<'a> ScheduleGrid<'a> {
    /// Build the grid from the selection, keeping selection order inside a cell
    #[must_use]
    pub fn build(selected: &'a [Course]) -> Self {
        let cells = Weekday::ALL
            .into_iter()
            .map(|day| {
                PERIODS
                    .iter()
                    .map(|period| {
                        selected
                            .iter()
                            .filter(|course| course.occupies(day, period.code))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }

    /// Courses in one cell; empty for an unknown period code
    #[must_use]
    pub fn cell(&self, day: Weekday, code: char) -> &[&'a Course] {
        crate::core::models::period_index(code)
            .map_or(&[][..], |idx| self.cells[day.index()][idx].as_slice())
    }

    /// Rows of the timetable: each period with its seven cells, Monday first
    pub fn rows(&self) -> impl Iterator<Item = (&Period, Vec<&[&'a Course]>)> + '_ {
        PERIODS.iter().enumerate().map(move |(idx, period)| {
            let cells = Weekday::ALL
                .into_iter()
                .map(|day| self.cells[day.index()][idx].as_slice())
                .collect();
            (period, cells)
        })
    }

    /// Cells holding more than one course
    #[must_use]
    pub fn cell_conflicts(&self) -> Vec<(TimeSlot, &[&'a Course])> {
        Weekday::ALL
            .into_iter()
            .flat_map(|day| {
                PERIODS.iter().enumerate().filter_map(move |(idx, period)| {
                    let courses = self.cells[day.index()][idx].as_slice();
                    (courses.len() > 1).then(|| (TimeSlot::new(day, period.code), courses))
                })
            })
            .collect()
    }

    /// Whether no cell holds a course
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Vec::is_empty)
    }

    /// Whether any weekend cell holds a course
    #[must_use]
    pub fn uses_weekend(&self) -> bool {
        [Weekday::Saturday, Weekday::Sunday]
            .into_iter()
            .any(|day| self.cells[day.index()].iter().any(|cell| !cell.is_empty()))
    }
}

/// Total credits and weekly hours of a course set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CreditSummary {
    /// Sum of parsed credits; unparsable credits count as zero
    pub total_credits: f32,
    /// Sum of the period counts of every weekday
    pub total_hours: usize,
}

impl CreditSummary {
    /// Summarize a course set
    #[must_use]
    pub fn from_courses<'a, I>(courses: I) -> Self
    where
        I: IntoIterator<Item = &'a Course>,
    {
        courses.into_iter().fold(Self::default(), |acc, course| Self {
            total_credits: acc.total_credits + course.credit_value(),
            total_hours: acc.total_hours + course.weekly_hours(),
        })
    }
}
