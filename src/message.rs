//! Message and conversation records.
//!
//! A [`Conversation`] is what one exported document turns into: the name of
//! the other party and the messages in document order. Exports list the most
//! recent message first, and nothing in this crate reorders them.
//!
//! # Serialization
//!
//! Both types round-trip through serde without loss. Timestamps keep the
//! offset they were parsed with (RFC 3339 on the wire).
//!
//! ```
//! use chatlens::{Conversation, Message};
//! use chrono::DateTime;
//!
//! let ts = DateTime::parse_from_rfc3339("2024-01-01T10:00:00+00:00").unwrap();
//! let conversation = Conversation::new("Jane Doe", vec![Message::new("Bob", "Hi", ts)]);
//!
//! let json = serde_json::to_string(&conversation)?;
//! let parsed: Conversation = serde_json::from_str(&json)?;
//! assert_eq!(conversation, parsed);
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Sender name used when a message header carries an empty user span,
/// typically because the account was removed.
pub const DELETED_SENDER: &str = "Deleted";

/// A single chat entry.
///
/// Messages are created by the scanner once their timestamp has parsed
/// successfully; there is no partially built message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author, or [`DELETED_SENDER`].
    pub sender: String,

    /// Text of the first paragraph after the message header.
    pub body: String,

    /// When the message was sent, with the offset of the zone it was
    /// exported in.
    pub timestamp: DateTime<FixedOffset>,
}

impl Message {
    /// Creates a new message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatlens::Message;
    /// use chrono::DateTime;
    ///
    /// let ts = DateTime::parse_from_rfc3339("2024-06-15T12:00:00+02:00").unwrap();
    /// let msg = Message::new("Alice", "Hello!", ts);
    /// assert_eq!(msg.sender(), "Alice");
    /// assert_eq!(msg.body(), "Hello!");
    /// ```
    pub fn new(
        sender: impl Into<String>,
        body: impl Into<String>,
        timestamp: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            sender: sender.into(),
            body: body.into(),
            timestamp,
        }
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the timestamp.
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Returns `true` if the sender is the deleted-account sentinel.
    pub fn is_from_deleted_user(&self) -> bool {
        self.sender == DELETED_SENDER
    }
}

/// One chat thread: a name and its messages, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Conversation name derived from the document title.
    pub name: String,

    /// Messages in document order (most recent first).
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(name: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            name: name.into(),
            messages,
        }
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Distinct senders, sorted by name.
    pub fn senders(&self) -> BTreeSet<&str> {
        senders(&self.messages)
    }
}

/// Distinct senders of a message slice, sorted by name.
pub fn senders(messages: &[Message]) -> BTreeSet<&str> {
    messages.iter().map(|m| m.sender.as_str()).collect()
}
