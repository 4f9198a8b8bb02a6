//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analysis::SeriesPoint;
use crate::config::OutputConfig;
use crate::error::{ChatlensError, Result};

/// Writes series rows as CSV.
///
/// # Format
/// - Delimiter: [`OutputConfig::delimiter`]
/// - Columns: `Date`, `Count`, with a leading `Sender` column when any row
///   belongs to a sender
/// - Dates: `YYYY-MM-DD`
pub fn write_csv(points: &[SeriesPoint], path: &Path, config: &OutputConfig) -> Result<()> {
    let file = File::create(path)?;
    write_records(points, file, config)
}

/// Same rows as [`write_csv`], returned as a string.
pub fn to_csv(points: &[SeriesPoint], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(points, &mut buffer, config)?;
    String::from_utf8(buffer)
        .map_err(|e| ChatlensError::invalid_format("CSV output", e.to_string()))
}

fn write_records<W: Write>(points: &[SeriesPoint], out: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(out);

    let per_user = points.iter().any(|p| p.sender.is_some());
    if per_user {
        writer.write_record(["Sender", "Date", "Count"])?;
    } else {
        writer.write_record(["Date", "Count"])?;
    }

    for point in points {
        let date = point.date.format("%Y-%m-%d").to_string();
        let count = point.count.to_string();
        if per_user {
            let sender = point.sender.as_deref().unwrap_or_default();
            writer.write_record([sender, date.as_str(), count.as_str()])?;
        } else {
            writer.write_record([date.as_str(), count.as_str()])?;
        }
    }

    writer.flush()?;
    Ok(())
}
