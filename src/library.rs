//! A directory of exported documents backed by a [`ConversationStore`].
//!
//! The free functions work on any directory and store; [`Library`] bundles
//! them with a [`LibraryConfig`] for the usual layout of one messages folder
//! and one cache folder.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlens::config::LibraryConfig;
//! use chatlens::library::Library;
//!
//! let mut library = Library::open(LibraryConfig::default());
//!
//! for entry in library.conversations()? {
//!     println!("{} ({} bytes) {}", entry.name, entry.size_bytes, entry.filename);
//! }
//!
//! let conversation = library.conversation("760.html")?;
//! println!("{} messages", conversation.len());
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LibraryConfig;
use crate::error::{ChatlensError, Result};
use crate::message::Conversation;
use crate::parser::{parse_file, read_title_file};
use crate::store::{ConversationStore, JsonFileStore};

/// One row of a conversation listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationEntry {
    /// Conversation name from the document title.
    pub name: String,
    /// Document size on disk.
    pub size_bytes: u64,
    /// Document file name, as passed to `--file`.
    pub filename: String,
}

/// A document that could not be parsed during [`load_all`].
#[derive(Debug)]
pub struct DocumentFailure {
    pub filename: String,
    pub error: ChatlensError,
}

/// Outcome of [`load_all`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Identifiers parsed and saved by this run.
    pub parsed: Vec<String>,
    /// Identifiers skipped because the store already had them.
    pub cached: Vec<String>,
    /// Documents that failed; the batch continued past each of them.
    pub failures: Vec<DocumentFailure>,
}

impl BatchReport {
    /// Returns `true` if no document failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of documents looked at.
    pub fn total(&self) -> usize {
        self.parsed.len() + self.cached.len() + self.failures.len()
    }
}

/// Store identifier of a document: its file name without the extension.
///
/// ```rust
/// use chatlens::library::document_id;
/// use std::path::Path;
///
/// assert_eq!(document_id(Path::new("messages/760.html")).as_deref(), Some("760"));
/// ```
pub fn document_id(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Regular files directly inside `dir`, sorted by file name.
pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ChatlensError::not_found(dir));
    }

    let mut documents = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            documents.push(entry.path());
        }
    }
    documents.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(documents)
}

/// Lists every titled document in `dir`, smallest first.
///
/// Only the title of each document is read. Documents without a title or
/// that cannot be read are skipped.
pub fn list_conversations(dir: &Path) -> Result<Vec<ConversationEntry>> {
    let mut entries = Vec::new();
    for path in list_documents(dir)? {
        let title = match read_title_file(&path) {
            Ok(Some(title)) => title,
            Ok(None) => {
                debug!(path = %path.display(), "no title, skipping");
                continue;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable document, skipping");
                continue;
            }
        };

        entries.push(ConversationEntry {
            name: title,
            size_bytes: fs::metadata(&path)?.len(),
            filename: file_name(&path),
        });
    }

    entries.sort_by(|a, b| {
        a.size_bytes
            .cmp(&b.size_bytes)
            .then_with(|| a.filename.cmp(&b.filename))
    });
    Ok(entries)
}

/// Returns the conversation for `path`, from the store if present, otherwise
/// by parsing the document and saving the result.
pub fn open_conversation<S: ConversationStore>(path: &Path, store: &mut S) -> Result<Conversation> {
    let id = document_id(path).ok_or_else(|| ChatlensError::not_found(path))?;

    if let Some(conversation) = store.load(&id)? {
        info!(id = %id, "loaded from cache");
        return Ok(conversation);
    }

    if !path.is_file() {
        return Err(ChatlensError::not_found(path));
    }

    let conversation = parse_file(path)?;
    store.save(&id, &conversation)?;
    info!(id = %id, messages = conversation.len(), "parsed and saved");
    Ok(conversation)
}

/// Parses every document in `dir` that the store does not have yet.
///
/// A document that fails to parse is recorded in
/// [`BatchReport::failures`] and the batch moves on. Only errors listing the
/// directory or writing to the store abort it.
pub fn load_all<S: ConversationStore>(dir: &Path, store: &mut S) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for path in list_documents(dir)? {
        let Some(id) = document_id(&path) else {
            continue;
        };

        if store.contains(&id) {
            debug!(id = %id, "already cached");
            report.cached.push(id);
            continue;
        }

        match parse_file(&path) {
            Ok(conversation) => {
                store.save(&id, &conversation)?;
                info!(id = %id, messages = conversation.len(), "parsed");
                report.parsed.push(id);
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "document failed, continuing");
                report.failures.push(DocumentFailure {
                    filename: file_name(&path),
                    error,
                });
            }
        }
    }

    Ok(report)
}

/// A messages directory and the store its conversations are cached in.
#[derive(Debug, Clone)]
pub struct Library<S = JsonFileStore> {
    config: LibraryConfig,
    store: S,
}

impl Library<JsonFileStore> {
    /// Uses a [`JsonFileStore`] in `config.cache_dir`.
    pub fn open(config: LibraryConfig) -> Self {
        let store = JsonFileStore::new(config.cache_dir.clone());
        Self { config, store }
    }
}

impl<S: ConversationStore> Library<S> {
    pub fn with_store(config: LibraryConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// See [`list_documents`].
    pub fn documents(&self) -> Result<Vec<PathBuf>> {
        list_documents(&self.config.messages_dir)
    }

    /// See [`list_conversations`].
    pub fn conversations(&self) -> Result<Vec<ConversationEntry>> {
        list_conversations(&self.config.messages_dir)
    }

    /// Opens the document `filename` in the messages directory.
    pub fn conversation(&mut self, filename: &str) -> Result<Conversation> {
        let path = self.config.messages_dir.join(filename);
        open_conversation(&path, &mut self.store)
    }

    /// See [`load_all`].
    pub fn load_all(&mut self) -> Result<BatchReport> {
        load_all(&self.config.messages_dir, &mut self.store)
    }
}
