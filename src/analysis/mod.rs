//! Statistics over a conversation's messages.
//!
//! All functions take a newest-first `&[Message]` slice as produced by the
//! parser and never reorder it.
//!
//! - [`breaks`] - gaps, streaks and who starts or ends them
//! - [`stats`] - message counts per sender, day and week
//! - [`words`] - word frequency

pub mod breaks;
pub mod stats;
pub mod words;

pub use breaks::{BREAK_THRESHOLD_HOURS, BreakStats, analyze_breaks, gap_hours};
pub use stats::{
    SenderStat, SeriesKind, SeriesPoint, UserAverages, build_series, messages_by_day,
    messages_by_user_by_day, messages_by_user_by_week, messages_by_week, sender_counts,
    user_averages, week_range,
};
pub use words::{WordCount, normalize_word, top_words};
