//! Plain-text rendering of analysis results for the terminal.
//!
//! Every function returns a `String` ending in a newline; nothing here
//! prints.

use crate::analysis::{BreakStats, SenderStat, UserAverages, WordCount};
use crate::library::{BatchReport, ConversationEntry};
use crate::message::Conversation;

/// Width the conversation name is cut to in listings.
const LISTING_NAME_CHARS: usize = 18;

/// First word of a display name.
///
/// ```rust
/// use chatlens::report::first_name;
///
/// assert_eq!(first_name("Jane Doe"), "Jane");
/// assert_eq!(first_name("Deleted"), "Deleted");
/// ```
pub fn first_name(name: &str) -> &str {
    name.split(' ').next().unwrap_or(name)
}

pub fn conversation_header(conversation: &Conversation) -> String {
    format!(
        "Conversation with {}\nTotal messages: {}\n",
        conversation.name,
        conversation.len()
    )
}

pub fn listing(entries: &[ConversationEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let name: String = entry.name.chars().take(LISTING_NAME_CHARS).collect();
        out.push_str(&format!(
            "{:<20} Size: {:.2}KB, Filename: {}\n",
            name,
            entry.size_bytes as f64 / 1024.0,
            entry.filename
        ));
    }
    out
}

pub fn user_stats(stats: &[SenderStat]) -> String {
    let mut out = String::from("User Stats:\n");
    for stat in stats {
        out.push_str(&format!(
            "{:<18} - {:<6} ({:.2}%)\n",
            stat.sender, stat.messages, stat.share_percent
        ));
    }
    out
}

/// Word frequency table headed by the requested count, which can exceed the
/// number of rows that passed the filters.
pub fn top_words(words: &[WordCount], top_n: usize) -> String {
    let mut out = format!("Top {top_n} Words:\n");
    for word in words {
        out.push_str(&format!("{:<8} - {}\n", word.word, word.count));
    }
    out
}

pub fn user_averages(averages: &[UserAverages]) -> String {
    let mut out = String::from("Averages per message:\n");
    for avg in averages {
        out.push_str(&format!(
            "{:<18} - {:.2} words, {:.2} letters\n",
            avg.sender, avg.avg_words, avg.avg_letters
        ));
    }
    out
}

/// Who broke and who left silences, plus the longest gap and streak.
pub fn breaks(stats: &BreakStats) -> String {
    let mut out = String::from("Conversations started by:\n");
    for (sender, count) in stats.ranked_initiators() {
        out.push_str(&format!("{:<9} - {}\n", first_name(sender), count));
    }

    out.push_str("\nConversations ended by:\n");
    for (sender, count) in stats.ranked_closers() {
        out.push_str(&format!("{:<9} - {}\n", first_name(sender), count));
    }

    out.push_str(&format!(
        "\nThe longest break was {} days\n",
        stats.longest_gap_days()
    ));
    match stats.longest_streak_start {
        Some(start) => out.push_str(&format!(
            "The longest streak was {} days, starting {}\n",
            stats.longest_streak_days,
            start.format("%Y-%m-%d %H:%M %:z")
        )),
        None => out.push_str("No streak between breaks\n"),
    }
    out
}

pub fn batch_summary(report: &BatchReport) -> String {
    let mut out = format!(
        "Parsed {}, already cached {}, failed {}\n",
        report.parsed.len(),
        report.cached.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        out.push_str(&format!("  {}: {}\n", failure.filename, failure.error));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_breaks;
    use crate::error::{ChatlensError, TimestampError};
    use crate::library::DocumentFailure;
    use crate::message::Message;
    use chrono::DateTime;

    #[test]
    fn test_first_name() {
        assert_eq!(first_name("Jane Mary Doe"), "Jane");
        assert_eq!(first_name(""), "");
    }

    #[test]
    fn test_listing_cuts_name() {
        let entries = [ConversationEntry {
            name: "A Very Long Conversation Name".into(),
            size_bytes: 2048,
            filename: "760.html".into(),
        }];
        let text = listing(&entries);
        assert!(text.starts_with("A Very Long Conver "));
        assert!(text.contains("Size: 2.00KB, Filename: 760.html"));
    }

    #[test]
    fn test_user_stats() {
        let text = user_stats(&[SenderStat {
            sender: "Ann".into(),
            messages: 3,
            share_percent: 60.0,
        }]);
        assert!(text.contains("Ann                - 3      (60.00%)"));
    }

    #[test]
    fn test_top_words_header_shows_requested_count() {
        let text = top_words(
            &[WordCount {
                word: "hello".into(),
                count: 7,
            }],
            20,
        );
        assert!(text.starts_with("Top 20 Words:\n"));
        assert!(text.contains("hello    - 7"));

        assert_eq!(top_words(&[], 5), "Top 5 Words:\n");
    }

    #[test]
    fn test_breaks_uses_first_names() {
        let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
        let messages = vec![
            Message::new("Ann Smith", "", at("2024-01-02T22:00:00Z")),
            Message::new("Bob Jones", "", at("2024-01-01T10:00:00Z")),
        ];
        let text = breaks(&analyze_breaks(&messages));

        assert!(text.contains("Ann       - 1"));
        assert!(text.contains("Bob       - 0"));
        assert!(text.contains("The longest break was 1 days"));
        assert!(text.contains("No streak between breaks"));
    }

    #[test]
    fn test_batch_summary_lists_failures() {
        let report = BatchReport {
            parsed: vec!["1".into()],
            cached: vec![],
            failures: vec![DocumentFailure {
                filename: "2.html".into(),
                error: ChatlensError::message(4, TimestampError::new("???")),
            }],
        };
        let text = batch_summary(&report);
        assert!(text.starts_with("Parsed 1, already cached 0, failed 1"));
        assert!(text.contains("2.html"));
        assert!(text.contains("#4"));
    }
}
