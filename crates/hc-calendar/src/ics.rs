//! iCalendar (RFC 5545) emitter.
//!
//! One all-day `VEVENT` per consolidated range, inside a `VCALENDAR` that
//! declares a single fixed-offset `VTIMEZONE`. Output is deterministic: the
//! same ranges and settings always render to the same bytes, and each UID is
//! derived from the range's start and end only.

use std::path::Path;

use hc_core::errors::Result;
use hc_core::ExportSettings;
use hc_time::{sort_by_date, Date, DateRange, DayRecord};
use tracing::info;

use crate::consolidate::consolidate;

/// Maximum octets per content line, excluding the CRLF.
const MAX_LINE_OCTETS: usize = 75;

/// A calendar event derived from one [`DateRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// `SUMMARY`.
    pub summary: String,
    /// `DTSTART`, inclusive.
    pub start: Date,
    /// `DTEND`, exclusive.
    pub end: Date,
    /// `UID`: `<start>/<end>/<suffix>`.
    pub uid: String,
}

impl Event {
    /// Build the event for `range`.
    pub fn from_range(range: &DateRange, settings: &ExportSettings) -> Self {
        Self {
            summary: summary(range),
            start: range.start,
            end: range.end,
            uid: format!("{}/{}/{}", range.start, range.end, settings.uid_suffix),
        }
    }
}

/// Display text of a range: `劳动节假期` for off-days,
/// `上班(补劳动节假期)` for makeup workdays.
pub fn summary(range: &DateRange) -> String {
    if range.is_off_day {
        format!("{}假期", range.name)
    } else {
        format!("上班(补{}假期)", range.name)
    }
}

/// Render consolidated ranges as an iCalendar document.
pub fn render(ranges: &[DateRange], settings: &ExportSettings) -> String {
    let mut w = ContentWriter::default();
    w.line("BEGIN", "VCALENDAR");
    w.line("VERSION", "2.0");
    w.line("PRODID", &format!("-//{}//ZH", settings.uid_suffix));
    w.line("METHOD", "PUBLISH");
    w.line("CLASS", "PUBLIC");
    w.line("X-WR-CALNAME", &escape_text(&settings.calendar_name));
    w.line("X-WR-CALDESC", &escape_text(&settings.calendar_description));

    let offset = utc_offset(settings.utc_offset_hours);
    w.line("BEGIN", "VTIMEZONE");
    w.line("TZID", &settings.timezone_id);
    w.line("BEGIN", "STANDARD");
    w.line("DTSTART", "19700101T000000");
    w.line("TZOFFSETFROM", &offset);
    w.line("TZOFFSETTO", &offset);
    w.line("END", "STANDARD");
    w.line("END", "VTIMEZONE");

    for range in ranges {
        let event = Event::from_range(range, settings);
        w.line("BEGIN", "VEVENT");
        w.line("SUMMARY", &escape_text(&event.summary));
        w.line("DTSTART;VALUE=DATE", &event.start.to_basic_string());
        w.line("DTEND;VALUE=DATE", &event.end.to_basic_string());
        w.line("DTSTAMP", &format!("{}T000000Z", event.start.to_basic_string()));
        w.line("UID", &escape_text(&event.uid));
        w.line("END", "VEVENT");
    }
    w.line("END", "VCALENDAR");
    w.finish()
}

/// Sort `days` by date, consolidate, and render.
pub fn render_days(days: &[DayRecord], settings: &ExportSettings) -> String {
    let mut sorted = days.to_vec();
    sort_by_date(&mut sorted);
    render(&consolidate(&sorted), settings)
}

/// Render `days` and write the document to `path`.
pub fn write_ics(days: &[DayRecord], path: &Path, settings: &ExportSettings) -> Result<()> {
    let text = render_days(days, settings);
    std::fs::write(path, text)?;
    info!(path = %path.display(), days = days.len(), "wrote calendar");
    Ok(())
}

/// `+0800`-style offset.
fn utc_offset(hours: i8) -> String {
    let sign = if hours < 0 { '-' } else { '+' };
    format!("{sign}{:02}00", hours.unsigned_abs())
}

/// Escape a TEXT value.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}

/// Accumulates CRLF-terminated, folded content lines.
#[derive(Debug, Default)]
struct ContentWriter {
    out: String,
}

impl ContentWriter {
    fn line(&mut self, name: &str, value: &str) {
        let line = format!("{name}:{value}");
        let mut budget = MAX_LINE_OCTETS;
        let mut used = 0;
        for c in line.chars() {
            if used + c.len_utf8() > budget {
                self.out.push_str("\r\n ");
                // The leading space counts against the continuation line.
                budget = MAX_LINE_OCTETS - 1;
                used = 0;
            }
            self.out.push(c);
            used += c.len_utf8();
        }
        self.out.push_str("\r\n");
    }

    fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn labour_day() -> Vec<DateRange> {
        vec![
            DateRange::new(date(2019, 4, 28), date(2019, 4, 29), false, "劳动节").unwrap(),
            DateRange::new(date(2019, 5, 1), date(2019, 5, 5), true, "劳动节").unwrap(),
        ]
    }

    #[test]
    fn summaries() {
        let ranges = labour_day();
        assert_eq!(summary(&ranges[0]), "上班(补劳动节假期)");
        assert_eq!(summary(&ranges[1]), "劳动节假期");
    }

    #[test]
    fn event_fields() {
        let ranges = labour_day();
        let text = render(&ranges, &ExportSettings::default());
        assert!(text.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(text.ends_with("END:VCALENDAR\r\n"));
        assert!(text.contains("\r\nSUMMARY:劳动节假期\r\n"));
        assert!(text.contains("\r\nDTSTART;VALUE=DATE:20190501\r\n"));
        assert!(text.contains("\r\nDTEND;VALUE=DATE:20190505\r\n"));
        assert!(text.contains("\r\nUID:2019-05-01/2019-05-05/holiday-cn\r\n"));
        assert!(text.contains("\r\nTZID:Asia/Shanghai\r\n"));
        assert!(text.contains("\r\nTZOFFSETTO:+0800\r\n"));
        assert_eq!(text.matches("BEGIN:VEVENT").count(), 2);
    }

    #[test]
    fn rendering_is_deterministic() {
        let settings = ExportSettings::default();
        assert_eq!(render(&labour_day(), &settings), render(&labour_day(), &settings));
    }

    #[test]
    fn long_lines_fold_on_char_boundaries() {
        let text = render(&[], &ExportSettings::default());
        for line in text.split("\r\n") {
            assert!(line.len() <= MAX_LINE_OCTETS, "{line:?}");
        }
        let unfolded = text.replace("\r\n ", "");
        assert!(unfolded.contains("X-WR-CALDESC:中国法定节假日数据，自动每日抓取国务院公告。\r\n"));
    }

    #[test]
    fn text_values_are_escaped() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
        assert_eq!(escape_text("国庆节、中秋节"), "国庆节、中秋节");
    }

    #[test]
    fn offsets() {
        assert_eq!(utc_offset(8), "+0800");
        assert_eq!(utc_offset(-5), "-0500");
        assert_eq!(utc_offset(0), "+0000");
    }

    #[test]
    fn render_days_sorts_first() {
        let days = [
            DayRecord::off_day("元旦", date(2019, 1, 1)),
            DayRecord::off_day("元旦", date(2018, 12, 31)),
            DayRecord::off_day("元旦", date(2018, 12, 30)),
            DayRecord::workday("元旦", date(2018, 12, 29)),
        ];
        let text = render_days(&days, &ExportSettings::default());
        assert!(text.contains("UID:2018-12-29/2018-12-30/holiday-cn"));
        assert!(text.contains("UID:2018-12-30/2019-01-02/holiday-cn"));
        assert_eq!(text.matches("BEGIN:VEVENT").count(), 2);
    }
}
