//! Time conflict detection between courses

use crate::core::models::{Course, Weekday};

/// Whether two courses share any (weekday, period) slot
///
/// Period strings are treated as sets of single-character codes. A day on
/// which either course has no class never conflicts.
#[must_use]
pub fn is_conflict(a: &Course, b: &Course) -> bool {
    Weekday::ALL.into_iter().any(|day| {
        let (left, right) = (a.periods_on(day), b.periods_on(day));
        !left.is_empty() && !right.is_empty() && left.chars().any(|code| right.contains(code))
    })
}

/// Whether `candidate` conflicts with any course in `selected`
///
/// The caller is responsible for leaving `candidate` itself out of `selected`.
#[must_use]
pub fn detect_time_conflict<'a, I>(candidate: &Course, selected: I) -> bool
where
    I: IntoIterator<Item = &'a Course>,
{
    selected.into_iter().any(|other| is_conflict(candidate, other))
}

/// Courses in `selected` that conflict with `candidate`
pub fn conflicting_courses<'a, I>(candidate: &'a Course, selected: I) -> impl Iterator<Item = &'a Course>
where
    I: IntoIterator<Item = &'a Course>,
    I::IntoIter: 'a,
{
    selected
        .into_iter()
        .filter(move |other| other.id != candidate.id && is_conflict(candidate, other))
}
