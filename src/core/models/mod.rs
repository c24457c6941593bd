//! Data models for `SelectorHelper`

pub mod course;
pub mod filter;
pub mod order;
pub mod time;

pub use course::{Course, CourseClass, COMPULSORY, ELECTIVE};
pub use filter::{AdvancedFilters, FilterElement, FilterField, FilterKind, FilterLogic};
pub use order::{default_order, DetectiveBucket, OrderElement};
pub use time::{period_index, Period, TimeSlot, Weekday, PERIODS};
