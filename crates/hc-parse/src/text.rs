//! Text normalisation for announcement prose.
//!
//! Announcements mix full-width and half-width punctuation and digits, and
//! pages scraped from HTML carry stray spaces. Everything downstream matches
//! against the normal form produced here: ASCII digits, full-width brackets
//! and clause punctuation, no whitespace.

/// Clause terminators: comma, full stop, semicolon.
const CLAUSE_BREAKS: [char; 3] = ['，', '。', '；'];

/// Bring `text` into the normal form the grammar is written against.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '\u{200b}' | '\u{feff}'))
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '(' => '（',
            ')' => '）',
            ',' => '，',
            ';' => '；',
            ':' => '：',
            other => other,
        })
        .collect()
}

/// Split normalised text into clauses at `，` `。` `；`.
///
/// Breaks inside `（…）` are kept, so an annotation like
/// `（农历正月初九，星期日）` stays attached to its date. Empty clauses are
/// dropped.
pub fn split_clauses(text: &str) -> Vec<&str> {
    let mut clauses = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '（' => depth += 1,
            '）' => depth = depth.saturating_sub(1),
            c if depth == 0 && CLAUSE_BREAKS.contains(&c) => {
                if start < i {
                    clauses.push(&text[start..i]);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if start < text.len() {
        clauses.push(&text[start..]);
    }
    clauses
}
