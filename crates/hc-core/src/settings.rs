//! Export settings.
//!
//! [`ExportSettings`] carries everything the emitters need that is not part
//! of the holiday data itself: where files go, how the exported calendar
//! introduces itself, and which fixed timezone it declares. The parser and
//! consolidator never read it.
//!
//! Settings are plain values. They can be built in code with the `with_*`
//! setters or loaded from a JSON document in which every field is optional:
//!
//! ```
//! use hc_core::ExportSettings;
//!
//! let settings = ExportSettings::from_json_str(r#"{ "data_dir": "out" }"#).unwrap();
//! assert_eq!(settings.data_dir, std::path::PathBuf::from("out"));
//! assert_eq!(settings.utc_offset_hours, 8);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ensure;
use crate::errors::Result;

/// Configuration for the JSON and iCalendar emitters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory that receives `<year>.json`, `<year>.ics` and the merged
    /// calendar.
    pub data_dir: PathBuf,

    /// `X-WR-CALNAME` of exported calendars.
    pub calendar_name: String,

    /// `X-WR-CALDESC` of exported calendars.
    pub calendar_description: String,

    /// Trailing component of every event UID (`<start>/<end>/<suffix>`).
    pub uid_suffix: String,

    /// `TZID` of the single `VTIMEZONE` declared per calendar.
    pub timezone_id: String,

    /// Fixed offset of that timezone from UTC, in hours. No DST rules.
    pub utc_offset_hours: i8,

    /// Value written to the `$schema` key of yearly JSON files.
    pub schema_url: String,

    /// Prefix of the `$id` key; the file name `<year>.json` is appended.
    pub id_base_url: String,

    /// File name of the multi-year calendar inside `data_dir`.
    pub merged_calendar_file: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            calendar_name: "中国法定节假日".into(),
            calendar_description: "中国法定节假日数据，自动每日抓取国务院公告。".into(),
            uid_suffix: "holiday-cn".into(),
            timezone_id: "Asia/Shanghai".into(),
            utc_offset_hours: 8,
            schema_url: "https://raw.githubusercontent.com/drjiathu/holiday-cn/main/schema.json"
                .into(),
            id_base_url: "https://raw.githubusercontent.com/drjiathu/holiday-cn/main/".into(),
            merged_calendar_file: "holiday-cn.ics".into(),
        }
    }
}

impl ExportSettings {
    /// Parse settings from a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a JSON settings file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the invariants the emitters rely on.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.uid_suffix.is_empty(), "uid_suffix must not be empty");
        ensure!(!self.timezone_id.is_empty(), "timezone_id must not be empty");
        ensure!(
            (-14..=14).contains(&self.utc_offset_hours),
            "utc_offset_hours {} out of range [-14, 14]",
            self.utc_offset_hours
        );
        ensure!(
            !self.merged_calendar_file.is_empty(),
            "merged_calendar_file must not be empty"
        );
        Ok(())
    }

    /// Set the output directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the calendar display name.
    pub fn with_calendar_name(mut self, name: impl Into<String>) -> Self {
        self.calendar_name = name.into();
        self
    }

    /// Set the calendar description.
    pub fn with_calendar_description(mut self, description: impl Into<String>) -> Self {
        self.calendar_description = description.into();
        self
    }

    /// Set the UID suffix.
    pub fn with_uid_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.uid_suffix = suffix.into();
        self
    }

    /// Set the declared timezone.
    pub fn with_timezone(mut self, id: impl Into<String>, utc_offset_hours: i8) -> Self {
        self.timezone_id = id.into();
        self.utc_offset_hours = utc_offset_hours;
        self
    }

    /// Path of the yearly JSON data file.
    pub fn year_json_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(format!("{year}.json"))
    }

    /// Path of the yearly calendar file.
    pub fn year_ics_path(&self, year: u16) -> PathBuf {
        self.data_dir.join(format!("{year}.ics"))
    }

    /// Path of the multi-year calendar file.
    pub fn merged_ics_path(&self) -> PathBuf {
        self.data_dir.join(&self.merged_calendar_file)
    }

    /// `$id` of a yearly JSON file.
    pub fn year_id(&self, year: u16) -> String {
        format!("{}{year}.json", self.id_base_url)
    }
}
