//! Document parsing building blocks.
//!
//! - [`scanner`] - lenient HTML tokenizer pushing events into a [`MarkupSink`]
//! - [`builder`] - the message boundary state machine and the title-only sink
//! - [`timestamp`] - header timestamp parsing
//!
//! Most callers want the entry points in [`crate::parser`] instead.

pub mod builder;
pub mod scanner;
pub mod timestamp;

pub use builder::{MessageRecordBuilder, TITLE_PREFIX_CHARS, TitleSink, conversation_name};
pub use scanner::{Flow, MarkupSink, ScanOutcome, Tag, scan};
pub use timestamp::{parse_timestamp, resolve_zone};
