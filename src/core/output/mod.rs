//! Output writers.
//!
//! - [`write_csv`] / [`to_csv`] - extracted records as comma-separated CSV
//! - [`read_reactions_csv`] / [`read_messages_csv`] - load them back
//! - [`write_table`] - insight tables ([`TableRow`]) as CSV or JSON
//! - [`write_json`] / [`to_json`] - JSON arrays, requires `json-output` feature
//!
//! Every writer renders the full output first and then replaces the target
//! through a temporary file in the same directory.
//!
//! # Example
//!
//! ```rust,no_run
//! use fbinsights::core::output::{read_messages_csv, write_csv};
//! use fbinsights::MessageRecord;
//!
//! let messages = vec![MessageRecord::new("1 May 2020 09:00", "Alice", "Hi!")];
//! write_csv(&messages, "message.csv".as_ref())?;
//! assert_eq!(read_messages_csv("message.csv".as_ref())?, messages);
//! # Ok::<(), fbinsights::InsightsError>(())
//! ```

mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::{InsightsError, Result};
use crate::format::OutputFormat;

pub use csv_writer::{CsvRow, read_messages_csv, read_reactions_csv, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};

/// Writes `content` to a temporary sibling of `path`, then renames it over `path`.
pub(crate) fn persist_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Insight table rows with a fixed column layout.
///
/// `COLUMNS` must list the serialized field names in declaration order.
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// Serializes table rows to a CSV string.
///
/// The header is written even when there are no rows.
pub fn table_to_csv<T: TableRow>(rows: &[T]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| InsightsError::Io(std::io::Error::other(e.to_string())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes an insight table in the requested format.
pub fn write_table<T: TableRow>(rows: &[T], output_path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => persist_atomically(output_path, table_to_csv(rows)?.as_bytes()),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => write_json(rows, output_path),
        #[cfg(not(feature = "json-output"))]
        OutputFormat::Json => Err(InsightsError::invalid_config(
            "JSON output requires the `json-output` feature",
        )),
    }
}
