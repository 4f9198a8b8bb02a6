//! Output format selection for time series.
//!
//! # Example
//!
//! ```rust
//! use chatlens::format::OutputFormat;
//! use std::path::Path;
//!
//! let format = OutputFormat::from_path(Path::new("weekly.json"))?;
//! assert_eq!(format, OutputFormat::Json);
//! # Ok::<(), chatlens::ChatlensError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::SeriesPoint;
use crate::config::OutputConfig;
use crate::error::{ChatlensError, Result};

/// Output format for time series.
///
/// ```rust
/// use chatlens::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("json").unwrap();
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited rows, semicolon by default.
    #[default]
    Csv,

    /// JSON array of rows.
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json"]
    }

    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ChatlensError::invalid_format(
                "output path",
                format!(
                    "Unknown file extension: '.{}'. Expected one of: {}",
                    ext,
                    Self::all_names().join(", ")
                ),
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes series rows to `path` in `format`.
///
/// Fails with [`ChatlensError::InvalidFormat`] if CSV is requested without
/// the `csv-output` feature.
#[allow(unused_variables)]
pub fn write_series(
    points: &[SeriesPoint],
    path: &Path,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv(points, path, config),
        OutputFormat::Json => crate::output::write_json(points, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Renders series rows as a string in `format`.
#[allow(unused_variables)]
pub fn series_to_string(
    points: &[SeriesPoint],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::to_csv(points, config),
        OutputFormat::Json => crate::output::to_json(points, config),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

fn missing_feature(format: OutputFormat) -> ChatlensError {
    ChatlensError::invalid_format(
        "output format",
        format!("{format} output requires the 'csv-output' feature to be enabled"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn rows() -> Vec<SeriesPoint> {
        vec![SeriesPoint {
            sender: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
            count: 4,
        }]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("jsonl").is_err());
    }

    #[test]
    fn test_format_display_and_extension() {
        assert_eq!(OutputFormat::Csv.to_string(), "CSV");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out/series.CSV")).unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("series.json")).unwrap(),
            OutputFormat::Json
        );
        assert!(OutputFormat::from_path(Path::new("series.txt")).is_err());
        assert!(OutputFormat::from_path(Path::new("series")).is_err());
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Json).unwrap(), "\"json\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_series_to_string_json() {
        let json = series_to_string(&rows(), OutputFormat::Json, &OutputConfig::new()).unwrap();
        assert!(json.contains("\"2024-01-07\""));
    }

    #[cfg(feature = "csv-output")]
    #[test]
    fn test_write_series_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        write_series(&rows(), &path, OutputFormat::Csv, &OutputConfig::new()).unwrap();
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "Date;Count\n2024-01-07;4\n"
        );
    }
}
