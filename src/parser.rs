//! Entry points for turning an exported document into a [`Conversation`].
//!
//! # Example
//!
//! ```rust
//! use chatlens::parser::{parse_document, read_title};
//!
//! let html = r#"<html><head><title>Conversation with Jane Doe</title></head><body>
//! <div class="message"><div class="message_header"><span class="user">Jane Doe</span><span class="meta">Monday, 1 January 2024 at 10:00 UTC</span></div></div><p>Hi!</p>
//! </body></html>"#;
//!
//! let conversation = parse_document(html)?;
//! assert_eq!(conversation.name, "Jane Doe");
//! assert_eq!(conversation.messages[0].body, "Hi!");
//!
//! assert_eq!(read_title(html).as_deref(), Some("Jane Doe"));
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ChatlensError, Result};
use crate::message::Conversation;
use crate::parsing::{MessageRecordBuilder, TitleSink, scan};

/// Parses a whole document.
///
/// Markup problems never fail the parse; they only lose messages. The one
/// error is a message whose timestamp cannot be read, reported as
/// [`ChatlensError::Message`].
pub fn parse_document(content: &str) -> Result<Conversation> {
    let mut builder = MessageRecordBuilder::new();
    scan(content, &mut builder)?;
    Ok(builder.finish())
}

/// Reads and parses a document file.
///
/// Any error is wrapped in [`ChatlensError::Document`] with the file path.
pub fn parse_file(path: &Path) -> Result<Conversation> {
    debug!(path = %path.display(), "parsing document");
    let conversation = fs::read_to_string(path)
        .map_err(ChatlensError::from)
        .and_then(|content| parse_document(&content))
        .map_err(|e| ChatlensError::document(path, e))?;

    debug!(
        path = %path.display(),
        name = %conversation.name,
        messages = conversation.len(),
        "document parsed"
    );
    Ok(conversation)
}

/// Reads only the conversation name, stopping at the title.
pub fn read_title(content: &str) -> Option<String> {
    let mut sink = TitleSink::new();
    match scan(content, &mut sink) {
        Ok(_) => sink.into_name(),
        Err(never) => match never {},
    }
}

/// Reads only the conversation name of a document file.
pub fn read_title_file(path: &Path) -> Result<Option<String>> {
    let content = fs::read_to_string(path)?;
    Ok(read_title(&content))
}
