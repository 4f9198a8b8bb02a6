//! Message volume tabulations.
//!
//! Everything here is a plain count over a message slice. Dates are the
//! calendar date of each timestamp in the offset it was exported with, and
//! weeks run Sunday to Saturday.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::message::{Message, senders};

/// Message count and share of one sender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SenderStat {
    pub sender: String,
    pub messages: usize,
    /// Percentage of all messages, 0 to 100.
    pub share_percent: f64,
}

/// Average message length of one sender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserAverages {
    pub sender: String,
    pub messages: usize,
    /// Whitespace-separated words per message.
    pub avg_words: f64,
    /// Alphabetic characters per message.
    pub avg_letters: f64,
}

/// Counts per sender, most active first (ties by name).
pub fn sender_counts(messages: &[Message]) -> Vec<SenderStat> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for message in messages {
        *counts.entry(message.sender.as_str()).or_default() += 1;
    }

    let total = messages.len();
    let mut stats: Vec<SenderStat> = counts
        .into_iter()
        .map(|(sender, count)| SenderStat {
            sender: sender.to_string(),
            messages: count,
            share_percent: count as f64 / total as f64 * 100.0,
        })
        .collect();
    stats.sort_by(|a, b| b.messages.cmp(&a.messages).then_with(|| a.sender.cmp(&b.sender)));
    stats
}

/// First (Sunday) and last (Saturday) day of the week containing `date`.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::week_range;
/// use chrono::NaiveDate;
///
/// let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
/// let (start, end) = week_range(wednesday);
/// assert_eq!(start, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
/// assert_eq!(end, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
/// ```
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let back = u64::from(date.weekday().num_days_from_sunday());
    let start = date - Days::new(back);
    (start, start + Days::new(6))
}

fn day_of(message: &Message) -> NaiveDate {
    message.timestamp.date_naive()
}

fn week_of(message: &Message) -> NaiveDate {
    week_range(day_of(message)).0
}

fn count_by(messages: &[Message], key: fn(&Message) -> NaiveDate) -> BTreeMap<NaiveDate, usize> {
    let mut counts = BTreeMap::new();
    for message in messages {
        *counts.entry(key(message)).or_default() += 1;
    }
    counts
}

fn count_by_user(
    messages: &[Message],
    key: fn(&Message) -> NaiveDate,
) -> BTreeMap<String, BTreeMap<NaiveDate, usize>> {
    let mut users: BTreeMap<String, BTreeMap<NaiveDate, usize>> = senders(messages)
        .into_iter()
        .map(|s| (s.to_string(), BTreeMap::new()))
        .collect();

    for message in messages {
        if let Some(days) = users.get_mut(&message.sender) {
            *days.entry(key(message)).or_default() += 1;
        }
    }
    users
}

/// Messages per calendar day.
pub fn messages_by_day(messages: &[Message]) -> BTreeMap<NaiveDate, usize> {
    count_by(messages, day_of)
}

/// Messages per week, keyed by the Sunday the week starts on.
pub fn messages_by_week(messages: &[Message]) -> BTreeMap<NaiveDate, usize> {
    count_by(messages, week_of)
}

/// Messages per calendar day, one series per sender.
pub fn messages_by_user_by_day(
    messages: &[Message],
) -> BTreeMap<String, BTreeMap<NaiveDate, usize>> {
    count_by_user(messages, day_of)
}

/// Messages per week, one series per sender.
pub fn messages_by_user_by_week(
    messages: &[Message],
) -> BTreeMap<String, BTreeMap<NaiveDate, usize>> {
    count_by_user(messages, week_of)
}

/// Average words and letters per message for each sender, by name.
pub fn user_averages(messages: &[Message]) -> Vec<UserAverages> {
    #[derive(Default)]
    struct Totals {
        messages: usize,
        words: usize,
        letters: usize,
    }

    let mut totals: BTreeMap<&str, Totals> = BTreeMap::new();
    for message in messages {
        let entry = totals.entry(message.sender.as_str()).or_default();
        entry.messages += 1;
        entry.words += message.body.split_whitespace().count();
        entry.letters += message.body.chars().filter(|c| c.is_alphabetic()).count();
    }

    totals
        .into_iter()
        .map(|(sender, t)| UserAverages {
            sender: sender.to_string(),
            messages: t.messages,
            avg_words: t.words as f64 / t.messages as f64,
            avg_letters: t.letters as f64 / t.messages as f64,
        })
        .collect()
}

// ============================================================================
// Time series
// ============================================================================

/// Which time series to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    /// All messages per day.
    #[default]
    Day,
    /// All messages per week.
    Week,
    /// Per-sender messages per day.
    UserDay,
    /// Per-sender messages per week.
    UserWeek,
}

impl SeriesKind {
    /// Returns `true` for the per-sender kinds.
    pub fn is_per_user(&self) -> bool {
        matches!(self, SeriesKind::UserDay | SeriesKind::UserWeek)
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SeriesKind::Day => "day",
            SeriesKind::Week => "week",
            SeriesKind::UserDay => "user-day",
            SeriesKind::UserWeek => "user-week",
        };
        f.write_str(name)
    }
}

impl FromStr for SeriesKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(SeriesKind::Day),
            "week" => Ok(SeriesKind::Week),
            "user-day" => Ok(SeriesKind::UserDay),
            "user-week" => Ok(SeriesKind::UserWeek),
            _ => Err(format!(
                "Unknown series: '{}'. Expected one of: day, week, user-day, user-week",
                s
            )),
        }
    }
}

/// One row of a time series.
///
/// `sender` is `None` for the whole-conversation series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    pub date: NaiveDate,
    pub count: usize,
}

/// Flattens the chosen tabulation into rows ordered by sender, then date.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::{SeriesKind, build_series};
/// use chatlens::Message;
/// use chrono::DateTime;
///
/// let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
/// let messages = vec![
///     Message::new("Ann", "b", at("2024-01-02T09:00:00Z")),
///     Message::new("Bob", "a", at("2024-01-01T09:00:00Z")),
/// ];
///
/// let rows = build_series(&messages, SeriesKind::Week);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].count, 2);
/// ```
pub fn build_series(messages: &[Message], kind: SeriesKind) -> Vec<SeriesPoint> {
    let whole = |counts: BTreeMap<NaiveDate, usize>| -> Vec<SeriesPoint> {
        counts
            .into_iter()
            .map(|(date, count)| SeriesPoint {
                sender: None,
                date,
                count,
            })
            .collect()
    };
    let per_user = |users: BTreeMap<String, BTreeMap<NaiveDate, usize>>| -> Vec<SeriesPoint> {
        users
            .into_iter()
            .flat_map(|(sender, counts)| {
                counts.into_iter().map(move |(date, count)| SeriesPoint {
                    sender: Some(sender.clone()),
                    date,
                    count,
                })
            })
            .collect()
    };

    match kind {
        SeriesKind::Day => whole(messages_by_day(messages)),
        SeriesKind::Week => whole(messages_by_week(messages)),
        SeriesKind::UserDay => per_user(messages_by_user_by_day(messages)),
        SeriesKind::UserWeek => per_user(messages_by_user_by_week(messages)),
    }
}
