//! `Weekday` — day-of-week enum, including the Chinese spellings used in
//! announcement annotations such as `（星期日）`.

/// Day of the week, numbered 1–7 (Monday = 1, Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weekday {
    /// Monday (1).
    Monday = 1,
    /// Tuesday (2).
    Tuesday = 2,
    /// Wednesday (3).
    Wednesday = 3,
    /// Thursday (4).
    Thursday = 4,
    /// Friday (5).
    Friday = 5,
    /// Saturday (6).
    Saturday = 6,
    /// Sunday (7).
    Sunday = 7,
}

impl Weekday {
    /// Construct from the ordinal (1 = Monday … 7 = Sunday).
    ///
    /// Returns `None` if the value is out of range.
    pub fn from_ordinal(n: u8) -> Option<Self> {
        match n {
            1 => Some(Weekday::Monday),
            2 => Some(Weekday::Tuesday),
            3 => Some(Weekday::Wednesday),
            4 => Some(Weekday::Thursday),
            5 => Some(Weekday::Friday),
            6 => Some(Weekday::Saturday),
            7 => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Find a Chinese weekday name (`星期三`, `周六`, `礼拜天`, …) anywhere
    /// in `text`.
    ///
    /// Annotations can carry other material, e.g. `农历正月初九，星期日`, so
    /// the first prefix followed by a weekday character wins.
    pub fn find_chinese(text: &str) -> Option<Self> {
        const PREFIXES: [&str; 3] = ["星期", "礼拜", "周"];
        for (i, _) in text.char_indices() {
            let rest = &text[i..];
            for prefix in PREFIXES {
                if let Some(tail) = rest.strip_prefix(prefix) {
                    if let Some(w) = tail.chars().next().and_then(Self::from_chinese_char) {
                        return Some(w);
                    }
                }
            }
        }
        None
    }

    fn from_chinese_char(c: char) -> Option<Self> {
        match c {
            '一' => Some(Weekday::Monday),
            '二' => Some(Weekday::Tuesday),
            '三' => Some(Weekday::Wednesday),
            '四' => Some(Weekday::Thursday),
            '五' => Some(Weekday::Friday),
            '六' => Some(Weekday::Saturday),
            '日' | '天' => Some(Weekday::Sunday),
            _ => None,
        }
    }

    /// Return `true` if this is Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        matches!(self, Weekday::Saturday | Weekday::Sunday)
    }

    /// Return the ordinal (1 = Monday … 7 = Sunday).
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// The `星期X` spelling.
    pub fn chinese_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "星期一",
            Weekday::Tuesday => "星期二",
            Weekday::Wednesday => "星期三",
            Weekday::Thursday => "星期四",
            Weekday::Friday => "星期五",
            Weekday::Saturday => "星期六",
            Weekday::Sunday => "星期日",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}
