//! # hc-calendar
//!
//! Turns parsed day records into published artefacts: consolidated date
//! ranges, yearly JSON data files, and iCalendar documents.
//!
//! ```
//! use hc_calendar::{consolidate, ics};
//! use hc_core::ExportSettings;
//! use hc_parse::parse_description;
//!
//! let mut days = parse_description("劳动节", "5月1日至4日放假调休，共4天。4月28日（星期日）、5月5日（星期日）上班。", 2019);
//! hc_time::sort_by_date(&mut days);
//! let ranges = consolidate(&days);
//! assert_eq!(ranges.len(), 3);
//!
//! let text = ics::render(&ranges, &ExportSettings::default());
//! assert!(text.contains("SUMMARY:劳动节假期\r\n"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Range consolidation.
pub mod consolidate;

/// Yearly JSON data files.
pub mod data;

/// iCalendar emitter.
pub mod ics;

/// Pooling of announcements and file updates.
pub mod update;

pub use consolidate::{consolidate, date_ranges, DateRanges};
pub use data::YearData;
pub use update::{
    default_years, fetch_holidays, update_data, update_main_ics, PaperSource, StaticPapers,
};
