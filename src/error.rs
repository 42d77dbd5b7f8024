//! Unified error types for fbinsights.
//!
//! [`InsightsError`] covers every failure that escapes a document: missing
//! source files, unreadable content, CSV/JSON I/O and invalid configuration.
//! Problems confined to a single markup block are described by
//! [`BlockDefect`] and are normally recovered locally by the extractors.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::DocumentKind;

/// A specialized [`Result`] type for fbinsights operations.
///
/// # Example
///
/// ```rust
/// use fbinsights::error::Result;
/// use fbinsights::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, InsightsError>;

/// The error type for all fbinsights operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InsightsError {
    /// An I/O error occurred while reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The expected source document does not exist.
    ///
    /// This usually means the export root or the layout is wrong, not that
    /// the data is bad.
    #[error("{kind} source not found: {}", path.display())]
    SourceNotFound {
        /// Which extractor was looking for the file
        kind: DocumentKind,
        /// The path that was expected to exist
        path: PathBuf,
    },

    /// The document is not valid UTF-8 and cannot be parsed as markup.
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Encoding {
        /// The offending file
        path: PathBuf,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A located block could not be turned into a record.
    ///
    /// Only produced in strict mode; by default such blocks are skipped.
    #[error("Malformed {kind} block #{index}: {defect}")]
    MalformedBlock {
        /// The document kind being extracted
        kind: DocumentKind,
        /// Zero-based position of the block among located blocks
        index: usize,
        /// What was wrong with it
        defect: BlockDefect,
    },

    /// Invalid date in a filter or a record timestamp.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The string that failed to parse
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// Configuration values that cannot be combined.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The finished temporary output could not be moved into place.
    #[error("Failed to persist output: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Per-block problems found while walking a located block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockDefect {
    /// The reaction card has no sentence element.
    MissingSentence,
    /// The sentence matched none of the known surface forms.
    PatternMismatch(String),
    /// The reaction card has no image, or the image has no `src`.
    MissingImage,
    /// The image `src` carries no `<token>.png` stem.
    UnrecognizedImage(String),
    /// The block has no timestamp element.
    MissingTimestamp,
    /// A required field was present but empty after trimming.
    EmptyField(&'static str),
}

impl fmt::Display for BlockDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockDefect::MissingSentence => write!(f, "no reaction sentence"),
            BlockDefect::PatternMismatch(sentence) => {
                write!(f, "sentence matches no known form: {sentence:?}")
            }
            BlockDefect::MissingImage => write!(f, "no reaction image"),
            BlockDefect::UnrecognizedImage(src) => {
                write!(f, "cannot read reaction kind from {src:?}")
            }
            BlockDefect::MissingTimestamp => write!(f, "no timestamp"),
            BlockDefect::EmptyField(name) => write!(f, "empty {name}"),
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl InsightsError {
    /// Creates a source-not-found error.
    pub fn source_not_found(kind: DocumentKind, path: impl Into<PathBuf>) -> Self {
        InsightsError::SourceNotFound {
            kind,
            path: path.into(),
        }
    }

    /// Creates a malformed-block error.
    pub fn malformed_block(kind: DocumentKind, index: usize, defect: BlockDefect) -> Self {
        InsightsError::MalformedBlock {
            kind,
            index,
            defect,
        }
    }

    /// Creates an invalid filter date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        InsightsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid record timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>) -> Self {
        InsightsError::InvalidDate {
            input: input.into(),
            expected: "D Month YYYY HH:MM",
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        InsightsError::InvalidConfig(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, InsightsError::Io(_))
    }

    /// Returns `true` if the source document was missing.
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, InsightsError::SourceNotFound { .. })
    }

    /// Returns `true` if this is a strict-mode block failure.
    pub fn is_malformed_block(&self) -> bool {
        matches!(self, InsightsError::MalformedBlock { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, InsightsError::InvalidDate { .. })
    }
}
