//! Yearly JSON data files.
//!
//! Day-granular: every announced day is listed on its own, sorted by date,
//! without going through the consolidator.
//!
//! ```json
//! {
//!     "$schema": "https://…/schema.json",
//!     "$id": "https://…/2019.json",
//!     "year": 2019,
//!     "papers": ["http://www.gov.cn/…/content_5346276.htm"],
//!     "days": [
//!         { "name": "元旦", "date": "2018-12-29", "isOffDay": false }
//!     ]
//! }
//! ```

use std::path::Path;

use hc_core::errors::Result;
use hc_core::ExportSettings;
use hc_time::DayRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Holiday data of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearData {
    /// The announcement year.
    pub year: u16,
    /// Announcements the days were read from, in the order applied.
    pub papers: Vec<String>,
    /// Day records sorted by date.
    pub days: Vec<DayRecord>,
}

/// On-disk layout: `$schema` and `$id` ahead of the data fields.
#[derive(Serialize)]
struct Document<'a> {
    #[serde(rename = "$schema")]
    schema: &'a str,
    #[serde(rename = "$id")]
    id: String,
    #[serde(flatten)]
    data: &'a YearData,
}

impl YearData {
    /// Serialise as a pretty-printed document (4-space indent, raw UTF-8,
    /// trailing newline).
    pub fn to_json(&self, settings: &ExportSettings) -> Result<String> {
        let doc = Document {
            schema: &settings.schema_url,
            id: settings.year_id(self.year),
            data: self,
        };
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        doc.serialize(&mut ser)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| hc_core::Error::Serialization(e.to_string()))
    }

    /// Parse a document; `$schema` and `$id` are ignored.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Write `<data_dir>/<year>.json`.
    pub fn write(&self, path: &Path, settings: &ExportSettings) -> Result<()> {
        std::fs::write(path, self.to_json(settings)?)?;
        info!(path = %path.display(), days = self.days.len(), "wrote data file");
        Ok(())
    }

    /// Read a data file.
    pub fn read(path: &Path) -> Result<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }
}
