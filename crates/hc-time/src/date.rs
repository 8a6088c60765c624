//! `Date` type.
//!
//! Dates are stored as a serial number of days. Serial 1 is January 1, 1900
//! and the valid range runs to December 31, 2199.
//!
//! `Date` is the one canonical date value in the workspace. ISO strings from
//! data files, `(y, m, d)` triples from announcement text and
//! `chrono::NaiveDate` values are converted once at the edge through
//! [`Date::from_ymd`], [`str::parse`] or [`TryFrom`].

use std::fmt;
use std::str::FromStr;

use hc_core::errors::{Error, Result};
use hc_core::utilities::data_parsers::parse_iso_date;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::weekday::Weekday;

/// A calendar date without time-of-day.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i32);

// ── Constants ─────────────────────────────────────────────────────────────────

impl Date {
    /// Earliest representable date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Latest representable date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    // ── Constructors ─────────────────────────────────────────────────────────

    /// Create a date from a serial number (1 = 1900-01-01).
    pub fn from_serial(serial: i32) -> Result<Self> {
        if !(Self::MIN.0..=Self::MAX.0).contains(&serial) {
            return Err(Error::Date(format!(
                "serial {serial} out of range [{}, {}]",
                Self::MIN.0,
                Self::MAX.0
            )));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12), and day-of-month (1–31).
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(1900..=2199).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [1900, 2199]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let last = days_in_month(year, month);
        if day == 0 || day > last {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {last}] for {year}-{month:02}"
            )));
        }
        Ok(Date(serial_from_ymd(year, month, day)))
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Return the serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// Return the year (1900–2199).
    pub fn year(&self) -> u16 {
        ymd_from_serial(self.0).0
    }

    /// Return the month (1–12).
    pub fn month(&self) -> u8 {
        ymd_from_serial(self.0).1
    }

    /// Return the day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        ymd_from_serial(self.0).2
    }

    /// Return `(year, month, day)` in one decomposition.
    pub fn ymd(&self) -> (u16, u8, u8) {
        ymd_from_serial(self.0)
    }

    /// Return the weekday.
    pub fn weekday(&self) -> Weekday {
        // 1900-01-01 (serial 1) was a Monday.
        match Weekday::from_ordinal(((self.0 - 1).rem_euclid(7) + 1) as u8) {
            Some(w) => w,
            None => unreachable!("rem_euclid(7) + 1 is always in 1..=7"),
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// Advance by `n` days. Returns an error if the result is out of range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        self.0
            .checked_add(n)
            .ok_or_else(|| Error::Date(format!("{self} + {n} days overflows")))
            .and_then(Self::from_serial)
    }

    /// The following day.
    pub fn succ(self) -> Result<Self> {
        self.add_days(1)
    }

    /// Number of calendar days from `self` to `other` (positive if
    /// `other > self`).
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }

    /// Compact `YYYYMMDD` form used by iCalendar `DATE` values.
    pub fn to_basic_string(&self) -> String {
        let (y, m, d) = ymd_from_serial(self.0);
        format!("{y:04}{m:02}{d:02}")
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

// ── Formatting & parsing ──────────────────────────────────────────────────────

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = ymd_from_serial(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parse an ISO 8601 `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self> {
        let (y, m, d) = parse_iso_date(s).ok_or_else(|| Error::Parse {
            input: s.to_string(),
            reason: "expected YYYY-MM-DD".into(),
        })?;
        Date::from_ymd(y, m, d)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── chrono interop ────────────────────────────────────────────────────────────

impl TryFrom<chrono::NaiveDate> for Date {
    type Error = Error;

    fn try_from(value: chrono::NaiveDate) -> Result<Self> {
        use chrono::Datelike;
        let year = u16::try_from(value.year())
            .map_err(|_| Error::Date(format!("year {} out of range", value.year())))?;
        Date::from_ymd(year, value.month() as u8, value.day() as u8)
    }
}

impl From<Date> for chrono::NaiveDate {
    fn from(value: Date) -> Self {
        let (y, m, d) = value.ymd();
        match chrono::NaiveDate::from_ymd_opt(i32::from(y), u32::from(m), u32::from(d)) {
            Some(date) => date,
            None => unreachable!("every Date is a valid proleptic Gregorian date"),
        }
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

/// Whether a given year is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a given month/year. `month` must be in 1..=12.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Days from 1900-01-01 to January 1 of `year`.
fn days_before_year(year: u16) -> i32 {
    let prior = i32::from(year) - 1;
    let leaps = |y: i32| y / 4 - y / 100 + y / 400;
    (i32::from(year) - 1900) * 365 + leaps(prior) - leaps(1899)
}

/// Serial 1 = 1900-01-01.
fn serial_from_ymd(year: u16, month: u8, day: u8) -> i32 {
    let mut serial = days_before_year(year) + MONTH_OFFSET[usize::from(month) - 1];
    if month > 2 && is_leap_year(year) {
        serial += 1;
    }
    serial + i32::from(day)
}

fn ymd_from_serial(serial: i32) -> (u16, u8, u8) {
    let mut year = (1900 + (serial - 1) / 365) as u16;
    while days_before_year(year) >= serial {
        year -= 1;
    }
    let mut remaining = serial - days_before_year(year);
    let mut month = 1u8;
    loop {
        let len = i32::from(days_in_month(year, month));
        if remaining <= len {
            return (year, month, remaining as u8);
        }
        remaining -= len;
        month += 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_epoch() {
        assert_eq!(date(1900, 1, 1).serial(), 1);
        assert_eq!(date(1900, 1, 1), Date::MIN);
        assert_eq!(date(2199, 12, 31), Date::MAX);
    }

    #[test]
    fn test_roundtrip() {
        for (y, m, d) in [
            (1900, 1, 1),
            (1900, 12, 31),
            (2000, 2, 29),
            (2100, 2, 28),
            (2018, 12, 31),
            (2019, 1, 1),
            (2199, 12, 31),
        ] {
            assert_eq!(date(y, m, d).ymd(), (y, m, d), "{y}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn test_invalid_components() {
        assert!(Date::from_ymd(2019, 2, 29).is_err());
        assert!(Date::from_ymd(2019, 13, 1).is_err());
        assert!(Date::from_ymd(2019, 4, 31).is_err());
        assert!(Date::from_ymd(2019, 4, 0).is_err());
        assert!(Date::from_ymd(1899, 12, 31).is_err());
        assert!(Date::from_ymd(2200, 1, 1).is_err());
    }

    #[test]
    fn test_weekday() {
        // 2019-04-28 and 2019-05-05 were Sundays.
        assert_eq!(date(2019, 4, 28).weekday(), Weekday::Sunday);
        assert_eq!(date(2019, 5, 5).weekday(), Weekday::Sunday);
        assert_eq!(date(2024, 1, 1).weekday(), Weekday::Monday);
    }

    #[test]
    fn test_arithmetic() {
        let d = date(2018, 12, 31);
        assert_eq!(d.succ().unwrap(), date(2019, 1, 1));
        assert_eq!(d.add_days(-365).unwrap(), date(2017, 12, 31));
        assert_eq!(date(2019, 5, 5) - date(2019, 4, 28), 7);
        assert_eq!(date(2019, 4, 28).days_between(date(2019, 5, 5)), 7);
        assert!(Date::MAX.succ().is_err());
        assert!(Date::MIN.add_days(-1).is_err());
    }

    #[test]
    fn test_display_and_parse() {
        let d = date(2019, 5, 1);
        assert_eq!(d.to_string(), "2019-05-01");
        assert_eq!(format!("{d:?}"), "Date(2019-05-01)");
        assert_eq!(d.to_basic_string(), "20190501");
        assert_eq!("2019-05-01".parse::<Date>().unwrap(), d);
        assert!("2019-02-30".parse::<Date>().is_err());
        assert!(matches!("May 1".parse::<Date>(), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_serde_as_iso_string() {
        let d = date(2020, 10, 8);
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2020-10-08\"");
        assert_eq!(serde_json::from_str::<Date>("\"2020-10-08\"").unwrap(), d);
        assert!(serde_json::from_str::<Date>("\"2020-10-32\"").is_err());
    }

    #[test]
    fn test_chrono_conversion() {
        let naive = chrono::NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
        let d = Date::try_from(naive).unwrap();
        assert_eq!(d, date(2019, 5, 1));
        assert_eq!(chrono::NaiveDate::from(d), naive);
        let far = chrono::NaiveDate::from_ymd_opt(2300, 1, 1).unwrap();
        assert!(Date::try_from(far).is_err());
    }
}
