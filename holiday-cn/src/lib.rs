//! # holiday-cn
//!
//! Chinese statutory holidays and makeup workdays, decoded from the State
//! Council's yearly announcements and published as JSON and iCalendar.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `hc-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! holiday-cn = "0.1"
//! ```
//!
//! ```rust
//! use holiday_cn::calendar::{fetch_holidays, StaticPapers};
//! use holiday_cn::time::{Calendar, China, Date};
//!
//! let papers = StaticPapers::new().with_paper(
//!     2019,
//!     "http://www.gov.cn/zhengce/content/2019-03/22/content_5375877.htm",
//!     "一、劳动节：5月1日至4日放假调休，共4天。4月28日（星期日）、5月5日（星期日）上班。",
//! );
//! let data = fetch_holidays(2019, &papers).unwrap();
//! let cal = China::from_records(data.days);
//!
//! assert!(cal.is_holiday(Date::from_ymd(2019, 5, 2).unwrap()));
//! assert!(cal.is_business_day(Date::from_ymd(2019, 5, 5).unwrap()));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error definitions and export settings.
pub use hc_core as core;

/// Date, day-record, range, and workday-calendar types.
pub use hc_time as time;

/// Announcement text decoding.
pub use hc_parse as parse;

/// Consolidation, emitters, and yearly updates.
pub use hc_calendar as calendar;
