//! Weekdays, period codes and schedule slots

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Day of the week a course can meet on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    /// 星期一
    Monday,
    /// 星期二
    Tuesday,
    /// 星期三
    Wednesday,
    /// 星期四
    Thursday,
    /// 星期五
    Friday,
    /// 星期六
    Saturday,
    /// 星期日
    Sunday,
}

impl Weekday {
    /// All weekdays in catalog column order
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Column name used by the catalog and by the 星期 filter options
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Short display name (一 … 日)
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Monday => "一",
            Self::Tuesday => "二",
            Self::Wednesday => "三",
            Self::Thursday => "四",
            Self::Friday => "五",
            Self::Saturday => "六",
            Self::Sunday => "日",
        }
    }

    /// Zero-based position, Monday = 0
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts the English name (any case, three-letter prefix allowed), the
    /// Chinese display name, or a 1-based day number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| {
                let key = day.key().to_ascii_lowercase();
                let lower = trimmed.to_ascii_lowercase();
                key == lower
                    || (lower.len() == 3 && key.starts_with(&lower))
                    || day.display_name() == trimmed
                    || (day.index() + 1).to_string() == trimmed
            })
            .ok_or_else(|| format!("Unknown weekday: {s}"))
    }
}

/// One class period of the fixed daily timetable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Single-character period code
    pub code: char,
    /// Start time, `H:MM`
    pub start: &'static str,
    /// End time, `H:MM`
    pub end: &'static str,
}

/// The daily timetable in display order
pub const PERIODS: [Period; 15] = [
    Period { code: 'A', start: "7:00", end: "7:50" },
    Period { code: '1', start: "8:10", end: "9:00" },
    Period { code: '2', start: "9:10", end: "10:00" },
    Period { code: '3', start: "10:10", end: "11:00" },
    Period { code: '4', start: "11:10", end: "12:00" },
    Period { code: 'B', start: "12:10", end: "13:00" },
    Period { code: '5', start: "13:10", end: "14:00" },
    Period { code: '6', start: "14:10", end: "15:00" },
    Period { code: '7', start: "15:10", end: "16:00" },
    Period { code: '8', start: "16:10", end: "17:00" },
    Period { code: '9', start: "17:10", end: "18:00" },
    Period { code: 'C', start: "18:20", end: "19:10" },
    Period { code: 'D', start: "19:15", end: "20:05" },
    Period { code: 'E', start: "20:10", end: "21:00" },
    Period { code: 'F', start: "21:05", end: "21:55" },
];

/// Position of a period code in [`PERIODS`]
#[must_use]
pub fn period_index(code: char) -> Option<usize> {
    PERIODS.iter().position(|p| p.code == code)
}

/// A (weekday, period) cell of the weekly grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Day of the slot
    pub weekday: Weekday,
    /// Period code of the slot
    #[serde(rename = "timeSlot")]
    pub period: char,
}

impl TimeSlot {
    /// Create a slot
    #[must_use]
    pub const fn new(weekday: Weekday, period: char) -> Self {
        Self { weekday, period }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.weekday, self.period)
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    /// Parses `DAY:PERIOD`, e.g. `Monday:5` or `三:B`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, period) = s
            .split_once(':')
            .ok_or_else(|| format!("Expected DAY:PERIOD, got '{s}'"))?;
        let weekday: Weekday = day.parse()?;
        let mut chars = period.trim().chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_ascii_uppercase(),
            _ => return Err(format!("Period must be a single code, got '{period}'")),
        };
        if period_index(code).is_none() {
            return Err(format!("Unknown period code: '{code}'"));
        }
        Ok(Self::new(weekday, code))
    }
}
