//! Break and streak detection.
//!
//! A *break* is a pair of consecutive messages more than
//! [`BREAK_THRESHOLD_HOURS`] apart. The newer message of the pair "started"
//! the conversation again and the older one "ended" it. A *streak* is the
//! time between two breaks, in whole days.
//!
//! The analysis is a single pass over adjacent pairs of a newest-first
//! message slice, exactly as exported.
//!
//! # Example
//!
//! ```rust
//! use chatlens::analysis::analyze_breaks;
//! use chatlens::Message;
//! use chrono::DateTime;
//!
//! let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
//! let messages = vec![
//!     Message::new("Ann", "hey, sorry", at("2024-01-02T22:00:00Z")),
//!     Message::new("Bob", "good night", at("2024-01-01T10:00:00Z")),
//! ];
//!
//! let stats = analyze_breaks(&messages);
//! assert_eq!(stats.longest_gap_hours, 36);
//! assert_eq!(stats.gap_initiators["Ann"], 1);
//! assert_eq!(stats.gap_closers["Bob"], 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Serialize;

use crate::message::{Message, senders};

/// Gaps strictly longer than this many hours count as breaks.
pub const BREAK_THRESHOLD_HOURS: i64 = 10;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;

/// Result of [`analyze_breaks`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BreakStats {
    /// Longest distance between two consecutive messages, in whole hours.
    pub longest_gap_hours: i64,

    /// Longest span between two breaks, in whole days.
    pub longest_streak_days: i64,

    /// Start of the longest streak. `None` until a streak longer than zero
    /// days has been found.
    pub longest_streak_start: Option<DateTime<FixedOffset>>,

    /// How often each sender broke a silence. Every sender is present.
    pub gap_initiators: BTreeMap<String, usize>,

    /// How often each sender had the last word before a silence. Every
    /// sender is present.
    pub gap_closers: BTreeMap<String, usize>,
}

impl BreakStats {
    /// Empty stats with every sender of `messages` seeded at zero.
    fn seeded(messages: &[Message]) -> Self {
        let zeroes: BTreeMap<String, usize> = senders(messages)
            .into_iter()
            .map(|s| (s.to_string(), 0))
            .collect();

        Self {
            gap_initiators: zeroes.clone(),
            gap_closers: zeroes,
            ..Self::default()
        }
    }

    /// Longest gap in whole days.
    pub fn longest_gap_days(&self) -> i64 {
        self.longest_gap_hours.div_euclid(24)
    }

    /// Calendar date the longest streak started on, in the offset the
    /// message was exported with.
    pub fn longest_streak_start_date(&self) -> Option<NaiveDate> {
        self.longest_streak_start.map(|ts| ts.date_naive())
    }

    /// Senders ranked by how many silences they broke.
    pub fn ranked_initiators(&self) -> Vec<(&str, usize)> {
        rank(&self.gap_initiators)
    }

    /// Senders ranked by how many silences they left.
    pub fn ranked_closers(&self) -> Vec<(&str, usize)> {
        rank(&self.gap_closers)
    }
}

/// Orders by count, highest first; ties by name.
fn rank(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
}

/// Whole hours from `older` to `newer`.
///
/// The span is split into whole days and leftover seconds, and the hours
/// are `days * 24 + seconds / 3600`. For non-negative spans this truncates:
/// 25h30m gives 25.
pub fn gap_hours(newer: DateTime<FixedOffset>, older: DateTime<FixedOffset>) -> i64 {
    let seconds = newer.signed_duration_since(older).num_seconds();
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    let leftover = seconds.rem_euclid(SECONDS_PER_DAY);
    days * 24 + leftover / SECONDS_PER_HOUR
}

/// Computes break statistics over a newest-first message slice.
///
/// Fewer than two messages produce zero stats and no streak start.
pub fn analyze_breaks(messages: &[Message]) -> BreakStats {
    let mut stats = BreakStats::seeded(messages);

    let Some(mut streak_start) = messages.get(1) else {
        return stats;
    };

    for pair in messages.windows(2) {
        let (newer, older) = (&pair[0], &pair[1]);
        let hours = gap_hours(newer.timestamp, older.timestamp);
        stats.longest_gap_hours = stats.longest_gap_hours.max(hours);

        if hours <= BREAK_THRESHOLD_HOURS {
            continue;
        }

        *stats.gap_initiators.entry(newer.sender.clone()).or_default() += 1;
        *stats.gap_closers.entry(older.sender.clone()).or_default() += 1;

        let streak_days = gap_hours(streak_start.timestamp, older.timestamp).div_euclid(24);
        if streak_days > stats.longest_streak_days {
            stats.longest_streak_days = streak_days;
            stats.longest_streak_start = Some(streak_start.timestamp);
        }
        streak_start = older;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn msg(sender: &str, ts: &str) -> Message {
        Message::new(sender, "", at(ts))
    }

    #[test]
    fn test_gap_hours_truncates() {
        let older = at("2024-01-01T00:00:00Z");
        let newer = older + Duration::hours(25) + Duration::minutes(30);
        assert_eq!(gap_hours(newer, older), 25);
    }

    #[test]
    fn test_gap_hours_across_offsets() {
        let newer = at("2024-01-01T12:00:00+02:00");
        let older = at("2024-01-01T08:00:00Z");
        assert_eq!(gap_hours(newer, older), 2);
    }

    #[test]
    fn test_gap_hours_negative_span_floors() {
        let a = at("2024-01-01T00:00:00Z");
        let b = a + Duration::minutes(90);
        assert_eq!(gap_hours(a, b), -2);
    }

    #[test]
    fn test_empty_and_single() {
        let stats = analyze_breaks(&[]);
        assert_eq!(stats, BreakStats::default());

        let stats = analyze_breaks(&[msg("Ann", "2024-01-01T00:00:00Z")]);
        assert_eq!(stats.longest_gap_hours, 0);
        assert_eq!(stats.longest_streak_days, 0);
        assert_eq!(stats.longest_streak_start, None);
        assert_eq!(stats.gap_initiators["Ann"], 0);
        assert_eq!(stats.gap_closers["Ann"], 0);
    }

    #[test]
    fn test_single_break_attribution() {
        let messages = vec![
            msg("Ann", "2024-01-02T22:00:00Z"),
            msg("Bob", "2024-01-01T10:00:00Z"),
        ];
        let stats = analyze_breaks(&messages);

        assert_eq!(stats.longest_gap_hours, 36);
        assert_eq!(stats.gap_initiators["Ann"], 1);
        assert_eq!(stats.gap_initiators["Bob"], 0);
        assert_eq!(stats.gap_closers["Bob"], 1);
        assert_eq!(stats.gap_closers["Ann"], 0);
        assert_eq!(stats.longest_streak_days, 0);
        assert_eq!(stats.longest_streak_start, None);
    }

    #[test]
    fn test_exactly_threshold_is_not_a_break() {
        let messages = vec![
            msg("Ann", "2024-01-01T10:00:00Z"),
            msg("Bob", "2024-01-01T00:00:00Z"),
        ];
        let stats = analyze_breaks(&messages);
        assert_eq!(stats.longest_gap_hours, 10);
        assert_eq!(stats.gap_initiators["Ann"], 0);
    }

    #[test]
    fn test_streak_between_breaks() {
        let messages = vec![
            msg("Ann", "2024-01-20T12:00:00Z"),
            msg("Bob", "2024-01-10T12:00:00Z"),
            msg("Bob", "2024-01-10T08:00:00Z"),
            msg("Ann", "2024-01-08T09:00:00Z"),
            msg("Bob", "2024-01-08T05:00:00Z"),
            msg("Ann", "2024-01-08T01:00:00Z"),
            msg("Bob", "2024-01-01T00:00:00Z"),
        ];
        let stats = analyze_breaks(&messages);

        assert_eq!(stats.longest_gap_hours, 240);
        assert_eq!(stats.gap_initiators["Ann"], 2);
        assert_eq!(stats.gap_initiators["Bob"], 1);
        assert_eq!(stats.gap_closers["Bob"], 2);
        assert_eq!(stats.gap_closers["Ann"], 1);

        // 2024-01-10 12:00 back to 2024-01-08 09:00 is two days; the later
        // stretch from 2024-01-08 09:00 back to 2024-01-01 is seven.
        assert_eq!(stats.longest_streak_days, 7);
        assert_eq!(stats.longest_streak_start, Some(at("2024-01-08T09:00:00Z")));
        assert_eq!(
            stats.longest_streak_start_date(),
            NaiveDate::from_ymd_opt(2024, 1, 8)
        );
    }

    #[test]
    fn test_longest_gap_days() {
        let stats = BreakStats {
            longest_gap_hours: 49,
            ..BreakStats::default()
        };
        assert_eq!(stats.longest_gap_days(), 2);
    }

    #[test]
    fn test_ranking_orders_by_count_then_name() {
        let messages = vec![
            msg("Cid", "2024-01-05T00:00:00Z"),
            msg("Ann", "2024-01-04T00:00:00Z"),
            msg("Bob", "2024-01-03T00:00:00Z"),
            msg("Ann", "2024-01-02T00:00:00Z"),
            msg("Bob", "2024-01-01T00:00:00Z"),
        ];
        let stats = analyze_breaks(&messages);

        assert_eq!(
            stats.ranked_initiators(),
            vec![("Ann", 2), ("Bob", 1), ("Cid", 1)]
        );
        assert_eq!(
            stats.ranked_closers(),
            vec![("Ann", 2), ("Bob", 2), ("Cid", 0)]
        );
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let messages = vec![
            msg("Ann", "2024-01-03T00:00:00Z"),
            msg("Bob", "2024-01-02T00:00:00Z"),
            msg("Ann", "2024-01-01T23:00:00Z"),
        ];
        assert_eq!(analyze_breaks(&messages), analyze_breaks(&messages));
    }
}
