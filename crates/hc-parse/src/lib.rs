//! # hc-parse
//!
//! Decoding of State Council holiday announcements.
//!
//! [`extract_rules`] splits the plain text of an announcement into
//! `(holiday, description)` entries; [`DescriptionParser`] turns each
//! description into day records for the announcement year.
//!
//! ```
//! use hc_parse::{extract_rules, DescriptionParser};
//!
//! let paper = "一、劳动节：5月1日至4日放假调休，共4天。4月28日（星期日）、5月5日（星期日）上班。";
//! let rule = extract_rules(paper).next().unwrap();
//! let days = DescriptionParser::new(rule.name, &rule.description, 2019).parse();
//! assert_eq!(days.len(), 6);
//! assert_eq!(days.iter().filter(|d| d.is_off_day).count(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Description parser and its clause/anomaly types.
pub mod description;

/// Rule extraction from announcement text.
pub mod rules;

/// Text normalisation and clause splitting.
pub mod text;

pub use description::{parse_description, Anomaly, Clause, DescriptionParser, ParseReport};
pub use rules::{extract_rules, Rule, Rules};
