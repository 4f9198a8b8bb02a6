//! Timestamp parsing for message headers.
//!
//! Headers carry timestamps such as `Monday, 1 January 2024 at 10:00 UTC`.
//! Some exports append three extra characters to the zone (`UTC+01`,
//! `GMTxyz`), so a failed parse is retried once with the last three
//! characters removed and the rest read as the bare abbreviation. Numeric
//! offsets are never applied: `UTC+01` is UTC wall-clock time and
//! `UTC+01:00` is rejected. Nothing else is normalized.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::error::TimestampError;

/// chrono format of everything before the zone token.
const HEADER_FORMAT: &str = "%A, %d %B %Y at %H:%M";

/// Number of trailing characters dropped by the fallback attempt.
const FALLBACK_TRIM_CHARS: usize = 3;

/// Zone abbreviations understood by [`parse_timestamp`], in hours east of UTC.
///
/// Abbreviations that mean different offsets in different regions (IST,
/// CST) resolve to the single entry listed here.
const ZONE_ABBREVIATIONS: &[(&str, i32)] = &[
    ("UTC", 0),
    ("GMT", 0),
    ("Z", 0),
    ("WET", 0),
    ("BST", 1),
    ("IST", 1),
    ("CET", 1),
    ("WEST", 1),
    ("CEST", 2),
    ("EET", 2),
    ("EEST", 3),
    ("MSK", 3),
    ("JST", 9),
    ("EST", -5),
    ("EDT", -4),
    ("CST", -6),
    ("CDT", -5),
    ("MST", -7),
    ("MDT", -6),
    ("PST", -8),
    ("PDT", -7),
];

/// Parses a message header timestamp into an absolute instant.
///
/// # Example
///
/// ```rust
/// use chatlens::parsing::parse_timestamp;
///
/// let primary = parse_timestamp("Monday, 01 January 2024 at 10:00 GMT")?;
/// let fallback = parse_timestamp("Monday, 01 January 2024 at 10:00 GMTxyz")?;
/// assert_eq!(primary, fallback);
/// # Ok::<(), chatlens::error::TimestampError>(())
/// ```
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    parse_exact(text)
        .or_else(|| parse_exact(drop_last_chars(text, FALLBACK_TRIM_CHARS)))
        .ok_or_else(|| TimestampError::new(text))
}

fn parse_exact(text: &str) -> Option<DateTime<FixedOffset>> {
    let (local, zone) = text.rsplit_once(' ')?;
    let offset = resolve_zone(zone)?;
    let naive = NaiveDateTime::parse_from_str(local, HEADER_FORMAT).ok()?;
    offset.from_local_datetime(&naive).single()
}

fn drop_last_chars(text: &str, count: usize) -> &str {
    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &text[..idx],
        None => "",
    }
}

/// Resolves a zone abbreviation from [`ZONE_ABBREVIATIONS`] to a fixed
/// offset. Numeric forms such as `UTC+1` are not zones.
pub fn resolve_zone(zone: &str) -> Option<FixedOffset> {
    let &(_, hours) = ZONE_ABBREVIATIONS.iter().find(|(abbr, _)| *abbr == zone)?;
    FixedOffset::east_opt(hours * 3600)
}
