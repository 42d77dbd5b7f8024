//! CSV output writer and reader for extracted records.

use std::fs::File;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::persist_atomically;
use crate::error::{InsightsError, Result};
use crate::parser::DocumentKind;
use crate::record::{MessageRecord, ReactionRecord};

/// Records with a fixed CSV layout.
pub trait CsvRow {
    /// Column names, in order.
    fn header() -> &'static [&'static str];

    /// Field values, in column order.
    fn fields(&self) -> Vec<&str>;
}

impl CsvRow for ReactionRecord {
    fn header() -> &'static [&'static str] {
        &ReactionRecord::HEADER
    }

    fn fields(&self) -> Vec<&str> {
        self.to_row().to_vec()
    }
}

impl CsvRow for MessageRecord {
    fn header() -> &'static [&'static str] {
        &MessageRecord::HEADER
    }

    fn fields(&self) -> Vec<&str> {
        self.to_row().to_vec()
    }
}

/// Serializes records to a CSV string.
///
/// # Format
/// - Delimiter: `,`
/// - Header row always present, even without records
/// - Standard quoting for commas, quotes and newlines
/// - Encoding: UTF-8
pub fn to_csv<R: CsvRow>(records: &[R]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(R::header())?;
    for record in records {
        writer.write_record(record.fields())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| InsightsError::Io(io::Error::other(e.to_string())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes records to `output_path`.
///
/// The whole file is rendered first and then moved into place, so a failure
/// never leaves a truncated CSV behind.
pub fn write_csv<R: CsvRow>(records: &[R], output_path: &Path) -> Result<()> {
    let content = to_csv(records)?;
    persist_atomically(output_path, content.as_bytes())
}

fn read_csv<R: DeserializeOwned>(kind: DocumentKind, path: &Path) -> Result<Vec<R>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InsightsError::source_not_found(kind, path),
        _ => InsightsError::Io(e),
    })?;

    let mut reader = csv::Reader::from_reader(file);
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Loads a reactions CSV written by [`write_csv`].
pub fn read_reactions_csv(path: &Path) -> Result<Vec<ReactionRecord>> {
    read_csv(DocumentKind::Reactions, path)
}

/// Loads a conversation CSV written by [`write_csv`].
pub fn read_messages_csv(path: &Path) -> Result<Vec<MessageRecord>> {
    read_csv(DocumentKind::Messages, path)
}
