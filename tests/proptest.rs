//! Property-based tests for chatlens.
//!
//! These tests generate random inputs to find edge cases.

use chatlens::analysis::{
    BREAK_THRESHOLD_HOURS, analyze_breaks, gap_hours, normalize_word, top_words, week_range,
};
use chatlens::config::WordConfig;
use chatlens::parser::{parse_document, read_title};
use chatlens::{Conversation, Message};
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Weekday};
use proptest::prelude::*;

fn base_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 30, 12, 0, 0)
        .unwrap()
}

fn arb_sender() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice".to_string(),
        "Bob Smith".to_string(),
        "Łukasz".to_string(),
        "Иван".to_string(),
        "Deleted".to_string(),
    ])
}

fn arb_body() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Hello".to_string(),
        "cześć, dzięki.".to_string(),
        "How are you?".to_string(),
        "Привет мир".to_string(),
        String::new(),
        "🎉🔥 emoji".to_string(),
        "Special;chars\"here\nnewline".to_string(),
    ])
}

/// Newest-first messages with gaps of up to three days.
fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec((arb_sender(), arb_body(), 0i64..72 * 60), 0..max_len).prop_map(
        |items| {
            let mut ts = base_time();
            items
                .into_iter()
                .map(|(sender, body, gap_minutes)| {
                    let message = Message::new(sender, body, ts);
                    ts -= Duration::minutes(gap_minutes);
                    message
                })
                .collect()
        },
    )
}

/// Renders messages as an export document. Bodies are escaped so they stay
/// one text run.
fn render(messages: &[Message]) -> String {
    let mut doc = String::from("<html><head><title>Conversation with Someone</title></head><body>");
    for m in messages {
        let user = if m.sender == "Deleted" { "" } else { m.sender.as_str() };
        let body = m.body.replace('&', "&amp;").replace('<', "&lt;");
        doc.push_str(&format!(
            r#"<div class="message"><div class="message_header"><span class="user">{}</span><span class="meta">{} UTC</span></div></div><p>{}</p>"#,
            user,
            m.timestamp.format("%A, %d %B %Y at %H:%M"),
            body
        ));
    }
    doc.push_str("</body></html>");
    doc
}

proptest! {
    #[test]
    fn parse_never_panics(input in any::<String>()) {
        let _ = parse_document(&input);
        let _ = read_title(&input);
    }

    #[test]
    fn parse_is_deterministic(messages in arb_messages(30)) {
        let doc = render(&messages);
        let first = parse_document(&doc).unwrap();
        let second = parse_document(&doc).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rendered_documents_parse_back(messages in arb_messages(30)) {
        let conversation = parse_document(&render(&messages)).unwrap();

        // Empty bodies produce no text event, so those messages are lost.
        let expected: Vec<_> = messages.iter().filter(|m| !m.body.is_empty()).collect();
        prop_assert_eq!(conversation.len(), expected.len());
        for (got, want) in conversation.messages.iter().zip(expected) {
            prop_assert_eq!(&got.body, &want.body);
            prop_assert_eq!(got.timestamp, want.timestamp);
        }
    }

    #[test]
    fn json_round_trip(messages in arb_messages(30)) {
        let conversation = Conversation::new("Someone", messages);
        let json = serde_json::to_string(&conversation).unwrap();
        let parsed: Conversation = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(conversation, parsed);
    }

    #[test]
    fn break_attribution_balances(messages in arb_messages(50)) {
        let stats = analyze_breaks(&messages);

        let breaks = messages
            .windows(2)
            .filter(|p| gap_hours(p[0].timestamp, p[1].timestamp) > BREAK_THRESHOLD_HOURS)
            .count();
        prop_assert_eq!(stats.gap_initiators.values().sum::<usize>(), breaks);
        prop_assert_eq!(stats.gap_closers.values().sum::<usize>(), breaks);

        for m in &messages {
            prop_assert!(stats.gap_initiators.contains_key(&m.sender));
            prop_assert!(stats.gap_closers.contains_key(&m.sender));
        }
        for pair in messages.windows(2) {
            let gap = gap_hours(pair[0].timestamp, pair[1].timestamp);
            prop_assert!(stats.longest_gap_hours >= gap);
        }
        prop_assert_eq!(stats.longest_streak_start.is_some(), stats.longest_streak_days > 0);
    }

    #[test]
    fn gap_hours_truncates(minutes in 0i64..100_000) {
        let older = base_time();
        let newer = older + Duration::minutes(minutes);
        prop_assert_eq!(gap_hours(newer, older), minutes / 60);
    }

    #[test]
    fn week_starts_on_sunday(days in 0i64..3650) {
        let date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(days);
        let (start, end) = week_range(date);
        prop_assert_eq!(start.weekday(), Weekday::Sun);
        prop_assert_eq!(end.weekday(), Weekday::Sat);
        prop_assert!(start <= date && date <= end);
    }

    #[test]
    fn top_words_respects_config(
        messages in arb_messages(40),
        top_n in 0usize..10,
        min_count in 0usize..4,
    ) {
        let config = WordConfig::new().with_top_n(top_n).with_min_count(min_count);
        let words = top_words(&messages, &config);

        prop_assert!(words.len() <= top_n);
        prop_assert!(words.iter().all(|w| w.count > min_count));
        prop_assert!(words.windows(2).all(|p| p[0].count >= p[1].count));
    }

    #[test]
    fn normalized_words_are_stripped_and_folded(word in any::<String>()) {
        let normalized = normalize_word(&word);
        prop_assert!(!normalized.contains([' ', ',', '.']));
        prop_assert!(!normalized.contains(['ą', 'ę', 'ć', 'ó', 'ń', 'ż', 'ź', 'ś', 'ł']));
    }
}
