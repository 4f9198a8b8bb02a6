//! # Chatlens
//!
//! A Rust library for turning exported HTML chat archives into message
//! records and descriptive statistics about the conversation.
//!
//! ## Overview
//!
//! An export is one HTML document per conversation, newest message first.
//! Chatlens:
//! - **parses** a document into a [`Conversation`] with a tolerant
//!   tokenizer and a message boundary state machine
//! - **caches** parsed conversations as JSON so large exports are scanned
//!   once
//! - **analyzes** the messages: silences longer than 10 hours and who ends
//!   or breaks them, the longest streak between silences, per-sender counts,
//!   word frequency and averages
//! - **exports** daily or weekly message counts as CSV or JSON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let conversation = parse_file("messages/760.html".as_ref())?;
//!     let breaks = analyze_breaks(&conversation.messages);
//!
//!     println!("Longest break: {} days", breaks.longest_gap_days());
//!     for (sender, count) in breaks.ranked_initiators() {
//!         println!("{sender} started {count} conversations");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## A Whole Export
//!
//! ```rust,no_run
//! use chatlens::prelude::*;
//!
//! let mut library = Library::open(LibraryConfig::default());
//! let report = library.load_all()?;
//! for failure in &report.failures {
//!     eprintln!("{}: {}", failure.filename, failure.error);
//! }
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`parse_document`](parser::parse_document),
//!   [`parse_file`](parser::parse_file), [`read_title`](parser::read_title)
//! - [`parsing`] - the tokenizer, the message builder and timestamp parsing
//! - [`analysis`] - breaks and streaks, tabulations, word frequency
//! - [`store`] - [`ConversationStore`](store::ConversationStore) with JSON
//!   file and in-memory implementations
//! - [`library`] - listing, cached opening and batch parsing of a directory
//! - [`output`] and [`format`] - CSV and JSON series writers
//! - [`report`] - plain-text rendering for the terminal
//! - [`config`] - [`LibraryConfig`](config::LibraryConfig),
//!   [`WordConfig`](config::WordConfig), [`OutputConfig`](config::OutputConfig)
//! - [`cli`] - CLI argument types (feature `cli`)
//! - [`error`] - [`ChatlensError`] and [`Result`]
//!
//! ## Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `csv-output` | CSV series writer | `csv` |
//! | `cli` | Argument types for the binary | `clap`, `tracing-subscriber` |
//! | `full` | Everything above (default) | |
//! | `gen-test` | Synthetic export generator binary | `rand` |

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod library;
pub mod message;
pub mod output;
pub mod parser;
pub mod parsing;
pub mod report;
pub mod store;

// Re-export the main types at the crate root for convenience
pub use error::{ChatlensError, Result};
pub use message::{Conversation, Message};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Conversation, Message};

    pub use crate::error::{ChatlensError, Result};

    pub use crate::parser::{parse_document, parse_file, read_title};

    pub use crate::analysis::{
        BreakStats, SeriesKind, analyze_breaks, build_series, sender_counts, top_words,
        user_averages,
    };

    pub use crate::config::{LibraryConfig, OutputConfig, WordConfig};

    pub use crate::store::{ConversationStore, JsonFileStore, MemoryStore};

    pub use crate::library::{BatchReport, Library, load_all};

    pub use crate::format::{OutputFormat, write_series};
}
