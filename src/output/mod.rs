//! Table writers.
//!
//! One transformed dataset becomes three files, one per table, named
//! `messages`, `participants`, and `reactions` with the chosen format's
//! extension.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatframe::output::{OutputFormat, write_dataset};
//!
//! let dataset = chatframe::transform_file("message_1.json".as_ref())?;
//! write_dataset(&dataset, "tables".as_ref(), OutputFormat::Csv)?;
//! # Ok::<(), chatframe::ChatframeError>(())
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
mod json_writer;
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{messages_to_csv, participants_to_csv, reactions_to_csv};
pub use json_writer::table_to_json;
pub use jsonl_writer::table_to_jsonl;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChatframeError, Result};
use crate::tables::Dataset;

/// File stems of the three tables, in the order [`write_dataset`] returns
/// their paths.
pub const TABLE_NAMES: [&str; 3] = ["messages", "participants", "reactions"];

/// Output format for the generated tables.
///
/// - [`Csv`](OutputFormat::Csv) - One spreadsheet-friendly file per table
/// - [`Json`](OutputFormat::Json) - Structured array, good for APIs
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON per line, ideal for data pipelines
///
/// # Example
///
/// ```rust
/// use chatframe::output::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("jsonl").unwrap();
/// assert_eq!(format, OutputFormat::Jsonl);
/// assert_eq!(format.extension(), "jsonl");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with comma delimiter (default)
    ///
    /// Structured content values (media lists, shares, stickers) appear
    /// as compact JSON inside the `content` column.
    #[default]
    Csv,

    /// JSON array of rows
    ///
    /// Standard JSON format, suitable for APIs and structured processing.
    Json,

    /// JSON Lines - one JSON object per line
    ///
    /// Ideal for streaming and data pipelines. Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatframe::output::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::Csv.extension(), "csv");
    /// assert_eq!(OutputFormat::Json.extension(), "json");
    /// assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
    /// ```
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes all three tables of a dataset into a directory.
///
/// File names are fixed by [`TABLE_NAMES`], with the format's extension
/// appended. The directory is created if missing. Returns the written
/// paths in table order.
///
/// # Example
///
/// ```rust,no_run
/// use chatframe::output::{OutputFormat, write_dataset};
///
/// let dataset = chatframe::transform_str(r#"{"participants": [], "messages": []}"#)?;
/// let paths = write_dataset(&dataset, "tables".as_ref(), OutputFormat::Jsonl)?;
/// assert_eq!(paths.len(), 3);
/// # Ok::<(), chatframe::ChatframeError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The tables cannot be serialized or written
pub fn write_dataset(dataset: &Dataset, dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let paths: Vec<PathBuf> = TABLE_NAMES
        .iter()
        .map(|table| dir.join(format!("{table}.{}", format.extension())))
        .collect();

    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => {
            fs::write(&paths[0], messages_to_csv(&dataset.messages)?)?;
            fs::write(&paths[1], participants_to_csv(&dataset.participants)?)?;
            fs::write(&paths[2], reactions_to_csv(&dataset.reactions)?)?;
        }
        OutputFormat::Json => {
            fs::write(&paths[0], table_to_json(&dataset.messages)?)?;
            fs::write(&paths[1], table_to_json(&dataset.participants)?)?;
            fs::write(&paths[2], table_to_json(&dataset.reactions)?)?;
        }
        OutputFormat::Jsonl => {
            fs::write(&paths[0], table_to_jsonl(&dataset.messages)?)?;
            fs::write(&paths[1], table_to_jsonl(&dataset.participants)?)?;
            fs::write(&paths[2], table_to_jsonl(&dataset.reactions)?)?;
        }
        #[allow(unreachable_patterns)]
        _ => {
            return Err(ChatframeError::unsupported_format(
                format.to_string(),
                "csv-output",
            ));
        }
    }

    Ok(paths)
}
