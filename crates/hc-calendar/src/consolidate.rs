//! Range consolidation.
//!
//! Merges a date-sorted sequence of day records into maximal runs of
//! consecutive days with the same `is_off_day`. One pass, no reordering:
//! the input must already be sorted by date (see
//! [`sort_by_date`](hc_time::sort_by_date)); unsorted input gives
//! meaningless ranges.
//!
//! The merge key is `is_off_day` alone. A run takes its name from its first
//! record, so two adjacent holidays of the same kind would merge under the
//! first name. Announcements do not produce that adjacency.

use hc_time::{DateRange, DayRecord};
use tracing::warn;

/// Iterator over the ranges of a sorted record slice.
#[derive(Debug, Clone)]
pub struct DateRanges<'a> {
    days: &'a [DayRecord],
}

/// Iterate the consolidated ranges of `days`, which must be sorted by date.
pub fn date_ranges(days: &[DayRecord]) -> DateRanges<'_> {
    DateRanges { days }
}

/// Collect the consolidated ranges of `days`, which must be sorted by date.
pub fn consolidate(days: &[DayRecord]) -> Vec<DateRange> {
    date_ranges(days).collect()
}

impl<'a> Iterator for DateRanges<'a> {
    type Item = DateRange;

    fn next(&mut self) -> Option<DateRange> {
        loop {
            let (fr, rest) = self.days.split_first()?;
            let mut to = fr;
            let mut taken = 1;
            for cur in rest {
                if cur.date - to.date == 1 && cur.is_off_day == to.is_off_day {
                    to = cur;
                    taken += 1;
                } else {
                    break;
                }
            }
            self.days = &self.days[taken..];
            match to
                .date
                .succ()
                .and_then(|end| DateRange::new(fr.date, end, fr.is_off_day, fr.name.as_str()))
            {
                Ok(range) => return Some(range),
                Err(e) => warn!(start = %fr.date, error = %e, "dropping unrepresentable range"),
            }
        }
    }
}
