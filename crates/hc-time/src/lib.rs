//! # hc-time
//!
//! Date, weekday, holiday day-record, date-range, and workday-calendar types.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and the weekends-only baseline.
pub mod calendar;

/// Concrete calendar implementations.
pub mod calendars;

/// `Date` type.
pub mod date;

/// `DayRecord` and `DateRange`.
pub mod day;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, WeekendsOnly};
pub use calendars::china::China;
pub use date::Date;
pub use day::{sort_by_date, DateRange, DayRecord};
pub use weekday::Weekday;
