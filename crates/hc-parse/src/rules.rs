//! Rule extraction: split an announcement into `(holiday, description)`
//! pairs.
//!
//! Yearly notices list one numbered entry per holiday:
//!
//! ```text
//! 一、元旦：2018年12月30日至2019年1月1日放假调休，共3天。2018年12月29日（星期六）上班。
//! 二、春节：2月4日至10日放假调休，共7天。2月2日（星期六）、2月3日（星期日）上班。
//! ```
//!
//! Adjustment notices cover a single holiday, named only in the heading
//! (`关于调整2019年劳动节假期安排的通知`), followed by bare description lines.
//! When a paper has no numbered entry at all it is read that way instead.

use std::collections::HashSet;

use hc_time::DayRecord;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::description::DescriptionParser;
use crate::text::normalize;

static NORMAL_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[一二三四五六七八九十]+、(?P<name>[^：]+?)：(?P<description>.+)$")
        .expect("NORMAL_ENTRY should compile - this is a bug")
});

static PATCH_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+年(?P<name>[^\d年，。、：（）]+?)假期")
        .expect("PATCH_HEADING should compile - this is a bug")
});

static ORDINAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[一二三四五六七八九十]+、")
        .expect("ORDINAL_PREFIX should compile - this is a bug")
});

static DESCRIPTION_HINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+月\d+日.*(?:放假|补休|调休|公休|上班)")
        .expect("DESCRIPTION_HINT should compile - this is a bug")
});

/// One holiday entry of an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Holiday name, e.g. `劳动节`.
    pub name: String,
    /// The holiday's description, in normal form.
    pub description: String,
}

impl Rule {
    /// Parse the description against the announcement year.
    pub fn parse(&self, year: u16) -> Vec<DayRecord> {
        DescriptionParser::new(self.name.as_str(), &self.description, year).parse()
    }
}

impl From<Rule> for (String, String) {
    fn from(rule: Rule) -> Self {
        (rule.name, rule.description)
    }
}

#[derive(Debug, Clone)]
enum Mode {
    Numbered,
    Adjustment { name: Option<String> },
}

/// Lazy iterator over the rules of one paper, in document order.
#[derive(Debug, Clone)]
pub struct Rules {
    lines: std::vec::IntoIter<String>,
    mode: Mode,
}

/// Extract the holiday entries of `paper`, the plain text of one
/// announcement.
///
/// Duplicate lines are ignored. A paper with nothing recognisable yields an
/// empty iterator.
pub fn extract_rules(paper: &str) -> Rules {
    let mut seen = HashSet::new();
    let lines: Vec<String> = paper
        .lines()
        .map(normalize)
        .filter(|line| !line.is_empty() && seen.insert(line.clone()))
        .collect();
    let mode = if lines.iter().any(|l| NORMAL_ENTRY.is_match(l)) {
        Mode::Numbered
    } else {
        Mode::Adjustment { name: None }
    };
    Rules {
        lines: lines.into_iter(),
        mode,
    }
}

impl Iterator for Rules {
    type Item = Rule;

    fn next(&mut self) -> Option<Rule> {
        for line in self.lines.by_ref() {
            match &mut self.mode {
                Mode::Numbered => {
                    let Some(caps) = NORMAL_ENTRY.captures(&line) else {
                        continue;
                    };
                    let (name, description) = (&caps["name"], &caps["description"]);
                    if !DESCRIPTION_HINT.is_match(description) {
                        debug!(name, description, "skipping entry without dates");
                        continue;
                    }
                    return Some(Rule {
                        name: name.to_string(),
                        description: description.to_string(),
                    });
                }
                Mode::Adjustment { name } => {
                    let body = ORDINAL_PREFIX.replace(&line, "");
                    if !DESCRIPTION_HINT.is_match(&body) {
                        // Numbered prose never names the holiday.
                        if !ORDINAL_PREFIX.is_match(&line) {
                            if let Some(caps) = PATCH_HEADING.captures(&line) {
                                *name = Some(caps["name"].to_string());
                            }
                        }
                        continue;
                    }
                    if name.is_none() {
                        *name = PATCH_HEADING
                            .captures(&body)
                            .map(|caps| caps["name"].to_string());
                    }
                    let Some(current) = name.as_deref() else {
                        continue;
                    };
                    return Some(Rule {
                        name: current.to_string(),
                        description: body.into_owned(),
                    });
                }
            }
        }
        None
    }
}
