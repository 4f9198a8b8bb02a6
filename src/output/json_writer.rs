//! JSON output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::config::OutputConfig;
use crate::error::Result;

/// Writes any serializable value (usually a `&[SeriesPoint]`) as JSON.
///
/// # Format
/// ```json
/// [
///   { "date": "2024-01-01", "count": 3 },
///   { "sender": "Ann", "date": "2024-01-01", "count": 2 }
/// ]
/// ```
///
/// The `sender` key is present only for per-sender series.
pub fn write_json<T: Serialize + ?Sized>(
    value: &T,
    path: &Path,
    config: &OutputConfig,
) -> Result<()> {
    let json = to_json(value, config)?;
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    Ok(())
}

/// Same as [`write_json`], returned as a string without a trailing newline.
pub fn to_json<T: Serialize + ?Sized>(value: &T, config: &OutputConfig) -> Result<String> {
    let json = if config.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
