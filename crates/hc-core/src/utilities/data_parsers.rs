//! Literal parsing helpers.
//!
//! Date-like values arrive either as ISO 8601 strings (data files, config) or
//! as numbers pulled out of announcement text. These helpers turn both into
//! plain integers; range checking is left to `Date`.

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// Returns `(year, month, day)` on success. Only the extended format with
/// a four-digit year and two-digit month and day is accepted.
pub fn parse_iso_date(s: &str) -> Option<(u16, u8, u8)> {
    let s = s.trim();
    let mut parts = s.split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }
    if !s.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return None;
    }
    Some((y.parse().ok()?, m.parse().ok()?, d.parse().ok()?))
}

/// Parse a decimal number written with ASCII or full-width digits.
///
/// Announcement text occasionally mixes `２０１９` with `2019`.
pub fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for c in s.chars() {
        let digit = match c {
            '0'..='9' => c as u32 - '0' as u32,
            '０'..='９' => c as u32 - '０' as u32,
            _ => return None,
        };
        value = value.checked_mul(10)?.checked_add(digit)?;
    }
    Some(value)
}
