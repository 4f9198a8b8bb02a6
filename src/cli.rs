//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`SeriesArg`] and [`FormatArg`] - value enums mapped onto the library's
//!   [`SeriesKind`] and [`OutputFormat`]
//!
//! Available with the `cli` feature.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::analysis::SeriesKind;
use crate::config::{LibraryConfig, WordConfig};
use crate::format::OutputFormat;

/// Statistics for exported HTML chat conversations: who talks most, who
/// breaks the silence, and how long the streaks last.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens                          list conversations, smallest first
    chatlens -f 760.html              break and streak report
    chatlens -f 760.html --users --words 20
    chatlens -f 760.html --series week -o weekly.csv
    chatlens -A                       parse everything into the cache")]
pub struct Args {
    /// Parse every document into the cache
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Analyze one document from the messages directory
    #[arg(short, long, value_name = "NAME")]
    pub file: Option<String>,

    /// Directory with the exported documents [default: ./messages]
    #[arg(long, value_name = "DIR")]
    pub messages_dir: Option<PathBuf>,

    /// Directory for parsed conversations [default: ./saved]
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Print message counts per sender
    #[arg(long)]
    pub users: bool,

    /// Print the N most frequent words
    #[arg(long, value_name = "N")]
    pub words: Option<usize>,

    /// Print average words and letters per message
    #[arg(long)]
    pub averages: bool,

    /// Skip the break and streak report
    #[arg(long)]
    pub no_breaks: bool,

    /// Export a time series
    #[arg(long, value_enum, value_name = "KIND")]
    pub series: Option<SeriesArg>,

    /// Where to write the series (stdout if omitted)
    #[arg(short, long, value_name = "PATH", requires = "series")]
    pub output: Option<PathBuf>,

    /// Series format; inferred from the output extension if omitted
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Directories from the command line, defaults from [`LibraryConfig`].
    pub fn library_config(&self) -> LibraryConfig {
        let mut config = LibraryConfig::new();
        if let Some(dir) = &self.messages_dir {
            config = config.with_messages_dir(dir.clone());
        }
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_dir(dir.clone());
        }
        config
    }

    /// Word settings, if `--words` was given.
    pub fn word_config(&self) -> Option<WordConfig> {
        self.words.map(|n| WordConfig::new().with_top_n(n))
    }

    /// Log filter directive for the verbosity level.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Time series choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SeriesArg {
    /// All messages per day
    Day,
    /// All messages per week (weeks start on Sunday)
    Week,
    /// Per-sender messages per day
    UserDay,
    /// Per-sender messages per week
    UserWeek,
}

impl From<SeriesArg> for SeriesKind {
    fn from(arg: SeriesArg) -> SeriesKind {
        match arg {
            SeriesArg::Day => SeriesKind::Day,
            SeriesArg::Week => SeriesKind::Week,
            SeriesArg::UserDay => SeriesKind::UserDay,
            SeriesArg::UserWeek => SeriesKind::UserWeek,
        }
    }
}

/// Series output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum FormatArg {
    /// Semicolon-delimited CSV
    Csv,
    /// JSON array
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> OutputFormat {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}
