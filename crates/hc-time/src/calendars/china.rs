//! China (mainland) workday calendar, driven by announcement data.
//!
//! Chinese statutory holidays follow the lunar calendar and are re-announced
//! every year together with makeup workdays on weekends, so no rule can
//! compute them. This calendar is built from the parsed [`DayRecord`]s
//! instead: weekends are rest days unless announced as makeup workdays, and
//! weekdays are workdays unless announced as holiday off-days.

use std::collections::BTreeMap;

use crate::calendar::Calendar;
use crate::date::Date;
use crate::day::DayRecord;

/// China workday calendar backed by announced day records.
#[derive(Debug, Clone, Default)]
pub struct China {
    overrides: BTreeMap<Date, DayRecord>,
}

impl China {
    /// Create a calendar with no announced days (weekends only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pooled records. A later record for the same date replaces
    /// an earlier one.
    pub fn from_records(records: impl IntoIterator<Item = DayRecord>) -> Self {
        let mut cal = Self::new();
        cal.extend(records);
        cal
    }

    /// Add more announced days.
    pub fn extend(&mut self, records: impl IntoIterator<Item = DayRecord>) {
        for r in records {
            self.overrides.insert(r.date, r);
        }
    }

    /// The announced record for `date`, if any.
    pub fn record(&self, date: Date) -> Option<&DayRecord> {
        self.overrides.get(&date)
    }

    /// Name of the holiday governing `date`, if it was announced.
    pub fn holiday_name(&self, date: Date) -> Option<&str> {
        self.record(date).map(|r| r.name.as_str())
    }

    /// Number of announced days.
    pub fn announced_count(&self) -> usize {
        self.overrides.len()
    }
}

impl Calendar for China {
    fn name(&self) -> &str {
        "China"
    }

    fn is_business_day(&self, date: Date) -> bool {
        match self.overrides.get(&date) {
            Some(r) => !r.is_off_day,
            None => !self.is_weekend(date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_day_convention::BusinessDayConvention;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn labour_day_2019() -> China {
        let mut records: Vec<_> = (1..=4)
            .map(|d| DayRecord::off_day("劳动节", date(2019, 5, d)))
            .collect();
        records.push(DayRecord::workday("劳动节", date(2019, 4, 28)));
        records.push(DayRecord::workday("劳动节", date(2019, 5, 5)));
        China::from_records(records)
    }

    #[test]
    fn announced_days_override_weekdays() {
        let cal = labour_day_2019();
        // 2019-05-01 is a Wednesday, 2019-05-05 a Sunday.
        assert!(cal.is_holiday(date(2019, 5, 1)));
        assert!(cal.is_business_day(date(2019, 5, 5)));
        assert!(cal.is_business_day(date(2019, 4, 28)));
        assert_eq!(cal.holiday_name(date(2019, 5, 3)), Some("劳动节"));
        assert_eq!(cal.announced_count(), 6);
    }

    #[test]
    fn unannounced_days_follow_weekends() {
        let cal = labour_day_2019();
        assert!(cal.is_holiday(date(2019, 5, 11)));
        assert!(cal.is_business_day(date(2019, 5, 6)));
        assert_eq!(cal.holiday_name(date(2019, 5, 6)), None);
    }

    #[test]
    fn adjust_skips_the_whole_holiday() {
        let cal = labour_day_2019();
        assert_eq!(
            cal.adjust(date(2019, 5, 1), BusinessDayConvention::Following)
                .unwrap(),
            date(2019, 5, 5)
        );
        assert_eq!(
            cal.adjust(date(2019, 5, 1), BusinessDayConvention::Preceding)
                .unwrap(),
            date(2019, 4, 30)
        );
        // Mon 04-29 to Mon 05-06: 04-30, 05-05, 05-06.
        assert_eq!(
            cal.business_days_between(date(2019, 4, 29), date(2019, 5, 6)),
            3
        );
    }

    #[test]
    fn later_records_win() {
        let mut cal = labour_day_2019();
        cal.extend([DayRecord::workday("调整", date(2019, 5, 4))]);
        assert!(cal.is_business_day(date(2019, 5, 4)));
        assert_eq!(cal.holiday_name(date(2019, 5, 4)), Some("调整"));
    }
}
