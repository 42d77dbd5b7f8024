//! Output format for insight tables.
//!
//! Extracted records are always written as CSV, which is what the export's
//! downstream tooling reads. Aggregated tables can also be written as JSON.
//!
//! # Example
//!
//! ```rust
//! use fbinsights::format::OutputFormat;
//!
//! let format = OutputFormat::Json;
//! assert_eq!(format.extension(), "json");
//! assert_eq!(format.file_name("hourly"), "hourly.json");
//! ```

use serde::{Deserialize, Serialize};

/// Output format for insight tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Comma-separated values with a header row (default)
    #[default]
    Csv,

    /// Pretty-printed JSON array of row objects
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

    /// Appends this format's extension to a file stem.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension())
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
