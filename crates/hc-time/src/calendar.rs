//! `Calendar` trait.
//!
//! A calendar knows which dates are workdays and can roll dates according to
//! a [`BusinessDayConvention`]. Date arithmetic near the ends of the
//! representable range can fail, so every method that moves a date returns a
//! `Result`.

use hc_core::errors::Result;

use crate::business_day_convention::BusinessDayConvention;
use crate::date::Date;

/// A workday calendar.
pub trait Calendar: std::fmt::Debug + Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &str;

    /// Return `true` if `date` is a workday.
    fn is_business_day(&self, date: Date) -> bool;

    /// Return `true` if `date` is a rest day (weekend or statutory holiday).
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Return `true` if `date` falls on Saturday or Sunday.
    fn is_weekend(&self, date: Date) -> bool {
        date.weekday().is_weekend()
    }

    /// Roll `date` according to `convention`.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Result<Date> {
        let step = |mut d: Date, delta: i32| -> Result<Date> {
            while self.is_holiday(d) {
                d = d.add_days(delta)?;
            }
            Ok(d)
        };
        match convention {
            BusinessDayConvention::Unadjusted => Ok(date),
            BusinessDayConvention::Following => step(date, 1),
            BusinessDayConvention::Preceding => step(date, -1),
            BusinessDayConvention::ModifiedFollowing => {
                let adjusted = step(date, 1)?;
                if adjusted.month() == date.month() {
                    Ok(adjusted)
                } else {
                    step(date, -1)
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let adjusted = step(date, -1)?;
                if adjusted.month() == date.month() {
                    Ok(adjusted)
                } else {
                    step(date, 1)
                }
            }
        }
    }

    /// Advance `date` by `n` workdays (backwards when `n` is negative).
    fn advance_business_days(&self, mut date: Date, n: i32) -> Result<Date> {
        let delta = if n >= 0 { 1 } else { -1 };
        let mut remaining = n.unsigned_abs();
        while remaining > 0 {
            date = date.add_days(delta)?;
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }
        Ok(date)
    }

    /// Count workdays in `(d1, d2]`; negative if `d2 < d1`.
    fn business_days_between(&self, d1: Date, d2: Date) -> i32 {
        let (lo, hi, sign) = if d2 >= d1 { (d1, d2, 1) } else { (d2, d1, -1) };
        let count = (lo.serial() + 1..=hi.serial())
            .filter_map(|s| Date::from_serial(s).ok())
            .filter(|&d| self.is_business_day(d))
            .count();
        sign * count as i32
    }
}

/// Saturdays and Sundays off, nothing else.
///
/// The baseline the announcement-driven calendar overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendsOnly;

impl Calendar for WeekendsOnly {
    fn name(&self) -> &str {
        "Weekends Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend(date)
    }
}
