//! Description parser.
//!
//! Turns one holiday description such as
//!
//! ```text
//! 2019年5月1日至4日放假调休，共4天。4月28日（星期日）、5月5日（星期日）上班。
//! ```
//!
//! into day records, in the context of the announcement year.
//!
//! The description is normalised, split into clauses at `，` `。` `；`, and
//! each clause is classified by the first matching rule:
//!
//! | clause                 | example                          | effect                         |
//! |------------------------|----------------------------------|--------------------------------|
//! | [`Clause::Count`]      | `共4天`                          | cross-checks the previous rest |
//! | [`Clause::Shift`]      | `1月4日调至1月2日`               | left side work, right side off |
//! | [`Clause::Rest`]       | `5月1日至4日放假调休`            | off-days                       |
//! | [`Clause::Work`]       | `4月28日（星期日）、5月5日上班`  | makeup workdays                |
//!
//! Inside a clause, date literals are scanned left to right. A literal is a
//! single day (`[Y年][M月]D日`) or a range (`… 至 …`), each end optionally
//! followed by a bracketed weekday annotation. A day-only literal takes month
//! and year from the previous date in the same description. A month-day
//! literal belongs to the announcement year, except that a December date
//! right after a January date belongs to the year before. Numbers too large
//! to read are invalid dates, never treated as absent.
//!
//! Nothing here is fatal. Clauses that match no rule, literals that do not
//! name a real date, ranges that end before they start, and repeated dates
//! are skipped and recorded as [`Anomaly`] values.

use std::collections::HashSet;
use std::fmt;

use hc_core::utilities::data_parsers::parse_decimal;
use hc_time::{Date, DayRecord, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{debug, warn};

use crate::text::{normalize, split_clauses};

static COUNT_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^共(?P<n>\d+)天$").expect("COUNT_CLAUSE should compile - this is a bug")
});

static SHIFT_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<work>.+)调至(?P<rest>.+)$")
        .expect("SHIFT_CLAUSE should compile - this is a bug")
});

static REST_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<dates>.+?)(?:放假|补休|调休|公休)+(?:\d+天)?$")
        .expect("REST_CLAUSE should compile - this is a bug")
});

static WORK_CLAUSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<dates>.+)上班$").expect("WORK_CLAUSE should compile - this is a bug")
});

static DATE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        (?:(?P<y1>\d+)年)?(?:(?P<m1>\d+)月)?(?P<d1>\d+)日
        (?:（(?P<w1>[^）]*)）)?
        (?:
            (?:至|-|—|－|~|～)
            (?:(?P<y2>\d+)年)?(?:(?P<m2>\d+)月)?(?P<d2>\d+)日
            (?:（(?P<w2>[^）]*)）)?
        )?",
    )
    .expect("DATE_LITERAL should compile - this is a bug")
});

/// One clause of a description, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause<'a> {
    /// `共N天`: stated length of the preceding holiday.
    Count(u32),
    /// `A调至B`: dates in A become workdays, dates in B off-days.
    Shift {
        /// Text holding the dates that become workdays.
        work: &'a str,
        /// Text holding the dates that become off-days.
        rest: &'a str,
    },
    /// `…放假` / `…调休` / `…补休` / `…公休`: off-days.
    Rest(&'a str),
    /// `…上班`: makeup workdays.
    Work(&'a str),
    /// Anything else, e.g. `与周末连休`.
    Unrecognized(&'a str),
}

impl<'a> Clause<'a> {
    /// Classify a normalised clause.
    pub fn classify(text: &'a str) -> Self {
        if let Some(n) = COUNT_CLAUSE
            .captures(text)
            .and_then(|c| parse_decimal(&c["n"]))
        {
            return Clause::Count(n);
        }
        if let Some(c) = SHIFT_CLAUSE.captures(text) {
            return Clause::Shift {
                work: group(&c, "work", text),
                rest: group(&c, "rest", text),
            };
        }
        if let Some(c) = REST_CLAUSE.captures(text) {
            return Clause::Rest(group(&c, "dates", text));
        }
        if let Some(c) = WORK_CLAUSE.captures(text) {
            return Clause::Work(group(&c, "dates", text));
        }
        Clause::Unrecognized(text)
    }
}

/// Borrow a named group from `text` with the haystack's lifetime.
fn group<'a>(caps: &Captures<'_>, name: &str, text: &'a str) -> &'a str {
    caps.name(name).map_or("", |m| &text[m.range()])
}

/// Something the parser skipped or found suspicious. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anomaly {
    /// A clause that matches no rule or holds no date literal.
    UnrecognizedClause {
        /// The clause text.
        clause: String,
    },
    /// A date literal that does not resolve to a valid date, or a range
    /// that ends before it starts.
    InvalidDate {
        /// The literal text.
        literal: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The weekday annotation disagrees with the computed date.
    WeekdayMismatch {
        /// The computed date.
        date: Date,
        /// The weekday the text claims.
        stated: Weekday,
    },
    /// `共N天` disagrees with the number of off-days just produced.
    CountMismatch {
        /// N as written.
        stated: u32,
        /// Off-days produced by the preceding rest clause.
        actual: usize,
    },
    /// A date already produced earlier in the same description.
    DuplicateDate {
        /// The repeated date.
        date: Date,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnrecognizedClause { clause } => write!(f, "unrecognized clause {clause:?}"),
            Anomaly::InvalidDate { literal, reason } => {
                write!(f, "invalid date literal {literal:?}: {reason}")
            }
            Anomaly::WeekdayMismatch { date, stated } => {
                write!(f, "{date} is a {}, text says {stated}", date.weekday())
            }
            Anomaly::CountMismatch { stated, actual } => {
                write!(f, "text says {stated} days, range covers {actual}")
            }
            Anomaly::DuplicateDate { date } => write!(f, "{date} appears more than once"),
        }
    }
}

/// Records and anomalies from one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Day records in clause order.
    pub records: Vec<DayRecord>,
    /// Everything skipped or suspicious, in the order met.
    pub anomalies: Vec<Anomaly>,
}

impl ParseReport {
    /// `true` when nothing was skipped or flagged.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Parser for the description of one holiday.
#[derive(Debug, Clone)]
pub struct DescriptionParser {
    name: String,
    description: String,
    year: u16,
}

impl DescriptionParser {
    /// Prepare to parse `description`, the text announced for holiday `name`
    /// in the announcement for `year`.
    pub fn new(name: impl Into<String>, description: &str, year: u16) -> Self {
        Self {
            name: name.into(),
            description: normalize(description),
            year,
        }
    }

    /// Holiday name attached to every record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description in normal form.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Day records, in the order their clauses appear.
    pub fn parse(&self) -> Vec<DayRecord> {
        self.parse_report().records
    }

    /// Day records plus everything that was skipped along the way.
    pub fn parse_report(&self) -> ParseReport {
        let mut pass = Pass::new(self);
        let mut last_rest: Option<usize> = None;
        for text in split_clauses(&self.description) {
            let clause = Clause::classify(text);
            last_rest = match clause {
                Clause::Count(stated) => {
                    if let Some(actual) = last_rest.filter(|&a| a != stated as usize) {
                        pass.flag(Anomaly::CountMismatch { stated, actual });
                    }
                    None
                }
                Clause::Shift { work, rest } => {
                    pass.emit(text, work, false);
                    pass.emit(text, rest, true);
                    None
                }
                Clause::Rest(dates) => Some(pass.emit(text, dates, true)),
                Clause::Work(dates) => {
                    pass.emit(text, dates, false);
                    None
                }
                Clause::Unrecognized(clause) => {
                    debug!(holiday = %self.name, clause, "skipping clause");
                    pass.report.anomalies.push(Anomaly::UnrecognizedClause {
                        clause: clause.to_string(),
                    });
                    None
                }
            };
        }
        pass.report
    }
}

/// Parse `description` for holiday `name` in `year`; anomalies are logged and
/// dropped.
pub fn parse_description(name: &str, description: &str, year: u16) -> Vec<DayRecord> {
    DescriptionParser::new(name, description, year).parse()
}

/// Mutable state of one parse.
struct Pass<'p> {
    parser: &'p DescriptionParser,
    last: Option<Date>,
    seen: HashSet<Date>,
    report: ParseReport,
}

impl<'p> Pass<'p> {
    fn new(parser: &'p DescriptionParser) -> Self {
        Self {
            parser,
            last: None,
            seen: HashSet::new(),
            report: ParseReport::default(),
        }
    }

    fn flag(&mut self, anomaly: Anomaly) {
        warn!(holiday = %self.parser.name, %anomaly, "description anomaly");
        self.report.anomalies.push(anomaly);
    }

    /// Emit every date literal in `fragment`; returns how many records were
    /// added.
    fn emit(&mut self, clause: &str, fragment: &str, is_off_day: bool) -> usize {
        let before = self.report.records.len();
        let mut literals = 0;
        for caps in DATE_LITERAL.captures_iter(fragment) {
            literals += 1;
            self.emit_literal(&caps, is_off_day);
        }
        if literals == 0 {
            debug!(holiday = %self.parser.name, clause, "clause holds no date");
            self.report.anomalies.push(Anomaly::UnrecognizedClause {
                clause: clause.to_string(),
            });
        }
        self.report.records.len() - before
    }

    fn emit_literal(&mut self, caps: &Captures<'_>, is_off_day: bool) {
        let literal = caps.get(0).map_or("", |m| m.as_str());
        let Some(start) = self.resolve(literal, caps, "y1", "m1", "d1", "w1") else {
            return;
        };
        if caps.name("d2").is_none() {
            self.push(start, is_off_day);
            return;
        }
        let Some(end) = self.resolve(literal, caps, "y2", "m2", "d2", "w2") else {
            return;
        };
        if end < start {
            self.flag(Anomaly::InvalidDate {
                literal: literal.to_string(),
                reason: format!("range ends ({end}) before it starts ({start})"),
            });
            return;
        }
        let mut day = start;
        loop {
            self.push(day, is_off_day);
            if day == end {
                break;
            }
            match day.succ() {
                Ok(next) => day = next,
                Err(_) => break,
            }
        }
    }

    /// Resolve one end of a literal, completing month and year from context.
    fn resolve(
        &mut self,
        literal: &str,
        caps: &Captures<'_>,
        year: &str,
        month: &str,
        day: &str,
        weekday: &str,
    ) -> Option<Date> {
        let field = |key: &str| caps.name(key).map(|m| m.as_str());
        let resolved = self.complete(field(year), field(month), field(day));
        let date = match resolved {
            Ok(date) => date,
            Err(reason) => {
                self.flag(Anomaly::InvalidDate {
                    literal: literal.to_string(),
                    reason,
                });
                return None;
            }
        };
        self.last = Some(date);
        if let Some(stated) = caps
            .name(weekday)
            .and_then(|m| Weekday::find_chinese(m.as_str()))
        {
            if stated != date.weekday() {
                self.flag(Anomaly::WeekdayMismatch { date, stated });
            }
        }
        Some(date)
    }

    /// Fill in a missing month and year.
    ///
    /// A day-only literal (`31日` in `2006年12月30日、31日`) takes both month
    /// and year from the previous date. A literal with a month but no year
    /// belongs to the announcement year, except that December right after a
    /// January date belongs to the year before.
    fn complete(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        day: Option<&str>,
    ) -> Result<Date, String> {
        let number = |text: Option<&str>| -> Result<Option<u32>, String> {
            text.map(|t| parse_decimal(t).ok_or_else(|| format!("{t} is out of range")))
                .transpose()
        };
        let (year, month, day) = (number(year)?, number(month)?, number(day)?);
        let day = day.ok_or("no day given")?;
        let (month, year) = match (month, self.last) {
            (None, None) => return Err("no month given and no earlier date to take it from".into()),
            (None, Some(last)) => (
                u32::from(last.month()),
                year.unwrap_or(u32::from(last.year())),
            ),
            (Some(m), last) => {
                let year = year.unwrap_or_else(|| match last {
                    Some(last) if m == 12 && last.month() == 1 => {
                        u32::from(last.year()).saturating_sub(1)
                    }
                    _ => u32::from(self.parser.year),
                });
                (m, year)
            }
        };
        let (Ok(y), Ok(m), Ok(d)) = (u16::try_from(year), u8::try_from(month), u8::try_from(day))
        else {
            return Err(format!("{year}-{month}-{day} is out of range"));
        };
        Date::from_ymd(y, m, d).map_err(|e| e.to_string())
    }

    fn push(&mut self, date: Date, is_off_day: bool) {
        if !self.seen.insert(date) {
            self.flag(Anomaly::DuplicateDate { date });
            return;
        }
        self.report.records.push(DayRecord {
            name: self.parser.name.clone(),
            date,
            is_off_day,
        });
    }
}
