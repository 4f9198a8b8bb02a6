//! Time-series writers.
//!
//! - [`write_csv`] / [`to_csv`] - delimited rows, `;` by default (requires
//!   the `csv-output` feature)
//! - [`write_json`] / [`to_json`] - a JSON array, pretty by default
//!
//! Most callers go through [`crate::format::write_series`], which picks the
//! writer from an [`OutputFormat`](crate::format::OutputFormat).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::analysis::{SeriesKind, build_series};
//! use chatlens::config::OutputConfig;
//! use chatlens::output::to_csv;
//! use chatlens::Message;
//! use chrono::DateTime;
//!
//! let ts = DateTime::parse_from_rfc3339("2024-01-01T10:00:00Z").unwrap();
//! let rows = build_series(&[Message::new("Ann", "hi", ts)], SeriesKind::Day);
//!
//! let csv = to_csv(&rows, &OutputConfig::new())?;
//! assert_eq!(csv, "Date;Count\n2024-01-01;1\n");
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, write_json};
