//! Day-level and range-level holiday records.
//!
//! A [`DayRecord`] classifies one calendar day as a statutory off-day or a
//! makeup workday of a named holiday. A [`DateRange`] is a half-open run of
//! consecutive days sharing the same classification.

use hc_core::ensure;
use hc_core::errors::Result;
use serde::{Deserialize, Serialize};

use crate::date::Date;

/// One calendar day's classification.
///
/// Serialises as `{"name": …, "date": "YYYY-MM-DD", "isOffDay": …}`, the
/// day-granular record of the yearly data files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Display name of the governing holiday, e.g. `劳动节`.
    pub name: String,
    /// The day.
    pub date: Date,
    /// `true` for a holiday off-day, `false` for a makeup workday.
    pub is_off_day: bool,
}

impl DayRecord {
    /// A holiday off-day.
    pub fn off_day(name: impl Into<String>, date: Date) -> Self {
        Self {
            name: name.into(),
            date,
            is_off_day: true,
        }
    }

    /// A makeup workday.
    pub fn workday(name: impl Into<String>, date: Date) -> Self {
        Self {
            name: name.into(),
            date,
            is_off_day: false,
        }
    }
}

/// Sort records by date, keeping the relative order of equal dates.
pub fn sort_by_date(days: &mut [DayRecord]) {
    days.sort_by_key(|d| d.date);
}

/// A consolidated run of days: `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First covered day.
    pub start: Date,
    /// Day after the last covered day.
    pub end: Date,
    /// Classification shared by every covered day.
    pub is_off_day: bool,
    /// Holiday name, taken from the first covered day.
    pub name: String,
}

impl DateRange {
    /// Create a range; `start` must precede `end`.
    pub fn new(start: Date, end: Date, is_off_day: bool, name: impl Into<String>) -> Result<Self> {
        ensure!(start < end, "range start {start} must precede end {end}");
        Ok(Self {
            start,
            end,
            is_off_day,
            name: name.into(),
        })
    }

    /// Number of covered days (`end - start`).
    pub fn len_days(&self) -> i32 {
        self.end - self.start
    }

    /// Last covered day.
    pub fn last(&self) -> Date {
        // start < end holds, so the predecessor of `end` is in range.
        self.end.add_days(-1).unwrap_or(self.start)
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }

    /// Expand back into one record per covered day.
    pub fn days(&self) -> impl Iterator<Item = DayRecord> + '_ {
        (self.start.serial()..self.end.serial())
            .filter_map(|serial| Date::from_serial(serial).ok())
            .map(move |date| DayRecord {
                name: self.name.clone(),
                date,
                is_off_day: self.is_off_day,
            })
    }
}
