//! Word frequency.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::config::WordConfig;
use crate::message::Message;

/// Characters removed from every word after lower-casing.
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ ,.]").expect("valid punctuation pattern"));

/// Diacritics folded to ASCII. Nothing outside this table is normalized.
const FOLDS: &[(char, char)] = &[
    ('ą', 'a'),
    ('ę', 'e'),
    ('ć', 'c'),
    ('ó', 'o'),
    ('ń', 'n'),
    ('ż', 'z'),
    ('ź', 'z'),
    ('ś', 's'),
    ('ł', 'l'),
];

/// A word and how often it appeared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Lower-cases `word`, strips spaces, commas and periods, and folds the
/// diacritics in [`FOLDS`].
pub fn normalize_word(word: &str) -> String {
    let lowered = word.to_lowercase();
    PUNCTUATION
        .replace_all(&lowered, "")
        .chars()
        .map(fold_char)
        .collect()
}

fn fold_char(c: char) -> char {
    FOLDS
        .iter()
        .find(|(from, _)| *from == c)
        .map_or(c, |&(_, to)| to)
}

/// Most frequent words across all message bodies.
///
/// Words are whitespace-separated tokens longer than
/// [`WordConfig::min_length`] characters, measured before normalization.
/// The [`WordConfig::top_n`] most frequent are taken (ties by word), then
/// anything seen [`WordConfig::min_count`] times or fewer is dropped.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::top_words;
/// use chatlens::config::WordConfig;
/// use chatlens::Message;
/// use chrono::DateTime;
///
/// let ts = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap();
/// let messages: Vec<_> = (0..3).map(|_| Message::new("Ann", "Cześć, cześć!", ts)).collect();
///
/// let config = WordConfig::new().with_min_count(0);
/// let words = top_words(&messages, &config);
/// assert_eq!(words[0].word, "czesc");
/// assert_eq!(words[0].count, 3);
/// assert_eq!(words[1].word, "czesc!");
/// ```
pub fn top_words(messages: &[Message], config: &WordConfig) -> Vec<WordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for message in messages {
        for word in message.body.split_whitespace() {
            if word.chars().count() > config.min_length {
                *counts.entry(normalize_word(word)).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(config.top_n);
    ranked.retain(|w| w.count > config.min_count);
    ranked
}
