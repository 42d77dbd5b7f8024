//! JSON output writer for insight tables.

use std::path::Path;

use serde::Serialize;

use super::persist_atomically;
use crate::error::Result;

/// Serializes rows to a pretty-printed JSON array.
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Writes rows as a JSON array to `output_path`.
pub fn write_json<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let content = to_json(rows)?;
    persist_atomically(output_path, content.as_bytes())
}
