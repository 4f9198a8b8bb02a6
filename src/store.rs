//! Persistence of parsed conversations.
//!
//! A [`ConversationStore`] maps a conversation identifier (the document file
//! name without its extension) to a [`Conversation`]. Two implementations are
//! provided:
//!
//! - [`JsonFileStore`] - one JSON file per conversation in a cache directory
//! - [`MemoryStore`] - a map, for tests and one-off runs
//!
//! # Example
//!
//! ```rust
//! use chatlens::store::{ConversationStore, MemoryStore};
//! use chatlens::Conversation;
//!
//! let mut store = MemoryStore::new();
//! store.save("760", &Conversation::new("Jane Doe", vec![]))?;
//!
//! assert!(store.contains("760"));
//! assert_eq!(store.load("760")?.unwrap().name, "Jane Doe");
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::message::Conversation;

/// Suffix appended to the identifier to form the cache file name.
pub const CACHE_FILE_SUFFIX: &str = "_data.json";

/// Storage for parsed conversations.
pub trait ConversationStore {
    /// Returns the stored conversation, or `None` if there is none.
    fn load(&self, id: &str) -> Result<Option<Conversation>>;

    /// Stores `conversation` under `id`, replacing any previous entry.
    fn save(&mut self, id: &str, conversation: &Conversation) -> Result<()>;

    /// Returns `true` if `id` has a stored conversation.
    fn contains(&self, id: &str) -> bool;
}

/// Stores each conversation as `<cache_dir>/<id>_data.json`.
///
/// The directory is created on the first save. Writes go to a temporary file
/// that is then renamed over the target, so a crash never leaves a truncated
/// entry behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `id`.
    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}{CACHE_FILE_SUFFIX}"))
    }
}

impl ConversationStore for JsonFileStore {
    fn load(&self, id: &str) -> Result<Option<Conversation>> {
        let path = self.path_for(id);
        if !path.is_file() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let conversation = serde_json::from_str(&json)?;
        debug!(path = %path.display(), "loaded cached conversation");
        Ok(Some(conversation))
    }

    fn save(&mut self, id: &str, conversation: &Conversation) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(id);
        let temp = path.with_extension("json.tmp");
        fs::write(&temp, serde_json::to_vec(conversation)?)?;
        fs::rename(&temp, &path)?;

        debug!(path = %path.display(), messages = conversation.len(), "saved conversation");
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.path_for(id).is_file()
    }
}

/// Keeps conversations in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Conversation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored conversations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ConversationStore for MemoryStore {
    fn load(&self, id: &str) -> Result<Option<Conversation>> {
        Ok(self.entries.get(id).cloned())
    }

    fn save(&mut self, id: &str, conversation: &Conversation) -> Result<()> {
        self.entries.insert(id.to_string(), conversation.clone());
        Ok(())
    }

    fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;
    use chrono::DateTime;
    use tempfile::tempdir;

    fn sample() -> Conversation {
        let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
        Conversation::new(
            "Zoë Łukasiewicz",
            vec![
                Message::new(
                    "Ann",
                    "zażółć \"gęślą\"\njaźń",
                    at("2024-03-31T02:30:00+02:00"),
                ),
                Message::new("Deleted", "", at("2024-03-30T23:59:00-05:00")),
            ],
        )
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("saved"));

        assert!(!store.contains("760"));
        assert_eq!(store.load("760").unwrap(), None);

        store.save("760", &sample()).unwrap();
        assert!(store.contains("760"));
        assert!(dir.path().join("saved/760_data.json").is_file());
        assert_eq!(store.load("760").unwrap(), Some(sample()));
    }

    #[test]
    fn test_json_store_preserves_offsets() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save("x", &sample()).unwrap();

        let loaded = store.load("x").unwrap().unwrap();
        assert_eq!(loaded.messages[0].timestamp.offset().local_minus_utc(), 7200);
        assert_eq!(loaded.messages[1].timestamp.offset().local_minus_utc(), -18000);
    }

    #[test]
    fn test_json_store_overwrites() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());
        store.save("x", &sample()).unwrap();
        store.save("x", &Conversation::new("Other", vec![])).unwrap();

        assert_eq!(store.load("x").unwrap().unwrap().name, "Other");
        assert!(!dir.path().join("x_data.json.tmp").exists());
    }

    #[test]
    fn test_json_store_corrupt_entry_is_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad_data.json"), "{not json").unwrap();
        let store = JsonFileStore::new(dir.path());

        let err = store.load("bad").unwrap_err();
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.save("a", &sample()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains("a"));
        assert!(!store.contains("b"));
        assert_eq!(store.load("a").unwrap(), Some(sample()));
        assert_eq!(store.load("b").unwrap(), None);
    }
}
