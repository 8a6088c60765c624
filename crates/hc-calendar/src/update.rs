//! Yearly pooling and file updates.
//!
//! Announcements reach this module through a [`PaperSource`]; retrieving
//! them over the network is left to the caller.

use std::collections::{BTreeMap, HashMap};
use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::Datelike;
use hc_core::errors::{Error, Result};
use hc_core::{fail, ExportSettings};
use hc_parse::extract_rules;
use hc_time::{Date, DayRecord};
use tracing::{debug, info};

use crate::data::YearData;
use crate::ics::write_ics;

/// First year with machine-readable announcements.
pub const FIRST_YEAR: u16 = 2007;

/// Provider of announcement texts.
pub trait PaperSource {
    /// URLs of the announcements concerning `year`, oldest first.
    fn paper_urls(&self, year: u16) -> Result<Vec<String>>;

    /// Plain text of the announcement at `url`.
    fn paper(&self, url: &str) -> Result<String>;
}

/// In-memory [`PaperSource`].
#[derive(Debug, Clone, Default)]
pub struct StaticPapers {
    urls: BTreeMap<u16, Vec<String>>,
    texts: HashMap<String, String>,
}

impl StaticPapers {
    /// An empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` as the paper at `url`, listed under `year`.
    pub fn with_paper(mut self, year: u16, url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        self.urls.entry(year).or_default().push(url.clone());
        self.texts.insert(url, text.into());
        self
    }
}

impl PaperSource for StaticPapers {
    fn paper_urls(&self, year: u16) -> Result<Vec<String>> {
        Ok(self.urls.get(&year).cloned().unwrap_or_default())
    }

    fn paper(&self, url: &str) -> Result<String> {
        self.texts
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Source(format!("no paper at {url}")))
    }
}

/// Collect the day records announced for `year`.
///
/// Papers are applied in the order the source lists them; when two papers
/// announce the same date, the later one wins.
pub fn fetch_holidays(year: u16, source: &dyn PaperSource) -> Result<YearData> {
    let papers = source.paper_urls(year)?;
    let mut pooled: BTreeMap<Date, DayRecord> = BTreeMap::new();
    for url in &papers {
        let text = source.paper(url)?;
        for rule in extract_rules(&text) {
            let days = rule.parse(year);
            debug!(url = %url, name = %rule.name, days = days.len(), "parsed rule");
            pooled.extend(days.into_iter().map(|d| (d.date, d)));
        }
    }
    info!(year, papers = papers.len(), days = pooled.len(), "fetched holidays");
    Ok(YearData {
        year,
        papers,
        days: pooled.into_values().collect(),
    })
}

/// Fetch `year` and write its JSON and iCalendar files.
///
/// Returns the paths written, JSON first. Settings are validated before
/// anything is written.
pub fn update_data(
    year: u16,
    source: &dyn PaperSource,
    settings: &ExportSettings,
) -> Result<Vec<PathBuf>> {
    settings.validate()?;
    std::fs::create_dir_all(&settings.data_dir)?;
    let data = fetch_holidays(year, source)?;
    let json_path = settings.year_json_path(year);
    data.write(&json_path, settings)?;
    let ics_path = settings.year_ics_path(year);
    write_ics(&data.days, &ics_path, settings)?;
    Ok(vec![json_path, ics_path])
}

/// Merge the yearly data files of `from..=to` into one calendar.
///
/// Years without a data file are skipped. A date present in several files
/// keeps the record of the latest year.
pub fn update_main_ics(from: u16, to: u16, settings: &ExportSettings) -> Result<PathBuf> {
    settings.validate()?;
    if from > to {
        fail!("empty year span {from}..={to}");
    }
    let mut pooled: BTreeMap<Date, DayRecord> = BTreeMap::new();
    for year in from..=to {
        let path = settings.year_json_path(year);
        if !path.is_file() {
            debug!(year, "no data file");
            continue;
        }
        let data = YearData::read(&path)?;
        pooled.extend(data.days.into_iter().map(|d| (d.date, d)));
    }
    let days: Vec<DayRecord> = pooled.into_values().collect();
    let path = settings.merged_ics_path();
    write_ics(&days, &path, settings)?;
    Ok(path)
}

/// Years to refresh, based on the current date in China (UTC+8).
///
/// This year and next, or every year since [`FIRST_YEAR`] when `all`.
pub fn default_years(all: bool) -> RangeInclusive<u16> {
    let now = chrono::Utc::now() + chrono::Duration::hours(8);
    let this_year = u16::try_from(now.year()).unwrap_or(u16::MAX - 1);
    years_from(this_year, all)
}

fn years_from(this_year: u16, all: bool) -> RangeInclusive<u16> {
    let first = if all { FIRST_YEAR.min(this_year) } else { this_year };
    first..=this_year + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_spans() {
        assert_eq!(years_from(2024, false), 2024..=2025);
        assert_eq!(years_from(2024, true), 2007..=2025);
    }

    #[test]
    fn default_span_covers_next_year() {
        let span = default_years(false);
        assert_eq!(span.end() - span.start(), 1);
        assert_eq!(*default_years(true).start(), FIRST_YEAR);
    }

    #[test]
    fn missing_paper_is_a_source_error() {
        let source = StaticPapers::new();
        assert!(matches!(source.paper("nowhere"), Err(Error::Source(_))));
        assert!(source.paper_urls(2019).unwrap().is_empty());
    }

    #[test]
    fn later_papers_overwrite_earlier_days() {
        let source = StaticPapers::new()
            .with_paper(2019, "a", "一、劳动节：5月1日放假，共1天。")
            .with_paper(2019, "b", "一、劳动节：5月1日至4日放假调休，共4天。");
        let data = fetch_holidays(2019, &source).unwrap();
        assert_eq!(data.papers, ["a", "b"]);
        assert_eq!(data.days.len(), 4);
        assert!(data.days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn reversed_span_is_rejected() {
        let settings = ExportSettings::default().with_data_dir("unused");
        assert!(matches!(
            update_main_ics(2020, 2019, &settings),
            Err(Error::Runtime(_))
        ));
    }

    #[test]
    fn invalid_settings_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ExportSettings::default()
            .with_data_dir(dir.path())
            .with_uid_suffix("");
        let source = StaticPapers::new().with_paper(2019, "a", "一、劳动节：5月1日放假。");
        assert!(matches!(
            update_data(2019, &source, &settings),
            Err(Error::Precondition(_))
        ));
        assert!(!settings.year_json_path(2019).exists());

        let settings = ExportSettings::default()
            .with_data_dir(dir.path())
            .with_timezone("", 8);
        assert!(matches!(
            update_main_ics(2019, 2019, &settings),
            Err(Error::Precondition(_))
        ));
        assert!(!settings.merged_ics_path().exists());
    }

    #[test]
    fn year_without_papers_is_empty() {
        let data = fetch_holidays(2030, &StaticPapers::new()).unwrap();
        assert!(data.papers.is_empty());
        assert!(data.days.is_empty());
    }
}
