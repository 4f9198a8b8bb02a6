//! Configuration types for the library.
//!
//! Plain structs with builder-style setters and serde support, usable
//! without the CLI:
//!
//! - [`LibraryConfig`] - where exports are read from and the cache lives
//! - [`WordConfig`] - word frequency thresholds
//! - [`OutputConfig`] - how time series are written
//!
//! The analysis constants (the 10-hour break threshold, the title prefix
//! length) are fixed and not part of any config.
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{LibraryConfig, WordConfig};
//!
//! let library = LibraryConfig::new()
//!     .with_messages_dir("export/messages")
//!     .with_cache_dir("/tmp/chatlens");
//!
//! let words = WordConfig::new().with_top_n(30);
//! assert_eq!(words.min_length, 3);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directories used by [`crate::library`].
///
/// # Example
///
/// ```rust
/// use chatlens::config::LibraryConfig;
/// use std::path::Path;
///
/// let config = LibraryConfig::default();
/// assert_eq!(config.messages_dir, Path::new("./messages"));
/// assert_eq!(config.cache_dir, Path::new("./saved"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding one exported document per conversation
    /// (default: `./messages`)
    pub messages_dir: PathBuf,

    /// Directory for parsed conversations (default: `./saved`)
    pub cache_dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            messages_dir: PathBuf::from("./messages"),
            cache_dir: PathBuf::from("./saved"),
        }
    }
}

impl LibraryConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the messages directory.
    #[must_use]
    pub fn with_messages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.messages_dir = dir.into();
        self
    }

    /// Sets the cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }
}

/// Thresholds for [`crate::analysis::top_words`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordConfig {
    /// Words must be longer than this many characters (default: 3)
    pub min_length: usize,

    /// How many of the most frequent words to consider (default: 15)
    pub top_n: usize,

    /// Words seen this many times or fewer are dropped (default: 5)
    pub min_count: usize,
}

impl Default for WordConfig {
    fn default() -> Self {
        Self {
            min_length: 3,
            top_n: 15,
            min_count: 5,
        }
    }
}

impl WordConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    #[must_use]
    pub fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }
}

/// Settings for time-series output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV field delimiter (default: `;`)
    pub delimiter: u8,

    /// Pretty-print JSON output (default: true)
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            pretty: true,
        }
    }
}

impl OutputConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the CSV delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables pretty JSON.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
