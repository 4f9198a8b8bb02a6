//! Message boundary reconstruction.
//!
//! Exported documents have no per-message wrapper. A message is recognised
//! from the shape of the markup around it:
//!
//! ```text
//! <div class="message"><div class="message_header">
//!   <span class="user">Jane Doe</span>
//!   <span class="meta">Monday, 1 January 2024 at 10:00 UTC</span>
//! </div></div>
//! <p>Hello!</p>
//! ```
//!
//! Two closing `div`s in a row mark the end of a header, and the first
//! paragraph after a header is the body. The message is committed on the
//! closing tag that follows the body text.
//!
//! The heuristic has a known failure mode: a stray or malformed block can
//! put the header detector out of step with the document, and the remaining
//! messages come out shifted or missing. That is not corrected here.

use std::convert::Infallible;

use tracing::trace;

use crate::error::{ChatlensError, Result};
use crate::message::{Conversation, DELETED_SENDER, Message};
use crate::parsing::scanner::{Flow, MarkupSink, Tag};
use crate::parsing::timestamp::parse_timestamp;

/// Length of the boilerplate in front of the conversation name in the
/// document title (`"Conversation with "`).
pub const TITLE_PREFIX_CHARS: usize = 18;

/// Strips the fixed title prefix, counting characters rather than bytes.
pub fn conversation_name(title: &str) -> String {
    title.chars().skip(TITLE_PREFIX_CHARS).collect()
}

/// Which field the next text run belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PendingField {
    #[default]
    None,
    Title,
    Sender,
    Timestamp,
    Body,
}

/// Accumulates scanner events into the messages of one conversation.
///
/// A builder is good for a single document; [`finish`](Self::finish)
/// consumes it.
#[derive(Debug, Default)]
pub struct MessageRecordBuilder {
    pending: PendingField,
    header_seen: bool,
    commit_pending: bool,
    last_end_was_div: bool,

    name: Option<String>,
    sender: String,
    timestamp_text: String,
    body: String,

    messages: Vec<Message>,
}

impl MessageRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages committed so far.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consumes the builder and returns the conversation.
    ///
    /// A document without a title yields an empty name.
    pub fn finish(self) -> Conversation {
        Conversation::new(self.name.unwrap_or_default(), self.messages)
    }

    fn commit(&mut self) -> Result<()> {
        let index = self.messages.len();
        let timestamp = parse_timestamp(&self.timestamp_text)
            .map_err(|source| ChatlensError::message(index, source))?;

        // Sender and timestamp carry over to a following message whose header
        // omits them; the body never does.
        let body = std::mem::take(&mut self.body);
        self.messages
            .push(Message::new(self.sender.clone(), body, timestamp));
        trace!(index, sender = %self.sender, "message committed");

        self.pending = PendingField::None;
        self.commit_pending = false;
        Ok(())
    }
}

impl MarkupSink for MessageRecordBuilder {
    type Error = ChatlensError;

    fn start_tag(&mut self, tag: &Tag) -> Result<Flow> {
        match tag.name.as_str() {
            "title" => self.pending = PendingField::Title,
            "span" if tag.class_is("user") => self.pending = PendingField::Sender,
            "span" if tag.class_is("meta") => self.pending = PendingField::Timestamp,
            "p" if self.header_seen => self.pending = PendingField::Body,
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn text(&mut self, text: &str) -> Result<Flow> {
        match std::mem::take(&mut self.pending) {
            PendingField::None => {}
            PendingField::Title => self.name = Some(conversation_name(text)),
            PendingField::Sender => self.sender = text.to_string(),
            PendingField::Timestamp => self.timestamp_text = text.to_string(),
            PendingField::Body => {
                self.body = text.to_string();
                self.header_seen = false;
                self.commit_pending = true;
            }
        }
        Ok(Flow::Continue)
    }

    fn end_tag(&mut self, name: &str) -> Result<Flow> {
        let is_div = name == "div";
        if is_div && self.last_end_was_div {
            self.header_seen = true;
        }

        if self.pending == PendingField::Sender {
            self.pending = PendingField::None;
            self.sender = DELETED_SENDER.to_string();
        }

        if self.commit_pending {
            self.commit()?;
        }

        self.last_end_was_div = is_div;
        Ok(Flow::Continue)
    }
}

/// Captures only the document title and halts the scan as soon as it has
/// been read.
#[derive(Debug, Default)]
pub struct TitleSink {
    awaiting: bool,
    name: Option<String>,
}

impl TitleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation name, if a title was seen.
    pub fn into_name(self) -> Option<String> {
        self.name
    }
}

impl MarkupSink for TitleSink {
    type Error = Infallible;

    fn start_tag(&mut self, tag: &Tag) -> std::result::Result<Flow, Infallible> {
        if tag.name == "title" {
            self.awaiting = true;
        }
        Ok(Flow::Continue)
    }

    fn text(&mut self, text: &str) -> std::result::Result<Flow, Infallible> {
        if !self.awaiting {
            return Ok(Flow::Continue);
        }
        self.name = Some(conversation_name(text));
        Ok(Flow::Halt)
    }

    fn end_tag(&mut self, _name: &str) -> std::result::Result<Flow, Infallible> {
        Ok(Flow::Continue)
    }
}
