//! Unified extractor trait for export documents.
//!
//! Every extractor turns one HTML document into an ordered list of records.
//! Blocks that cannot be turned into a record are reported in the returned
//! [`Extraction`] rather than aborting the document.
//!
//! # Example
//!
//! ```rust
//! use fbinsights::parser::Extractor;
//! use fbinsights::parsers::MessageExtractor;
//!
//! let html = r#"<div role="main">
//!   <div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
//!     <div class="_3-96 _2pio _2lek _2lel">Alice</div>
//!     <div class="_3-96 _2let"><div><div></div><div>Hello!</div></div></div>
//!     <div class="_3-94 _2lem">1 May 2020 09:00</div>
//!   </div>
//! </div>"#;
//!
//! let extraction = MessageExtractor::new().extract_str(html)?;
//! assert_eq!(extraction.records[0].body, "Hello!");
//! # Ok::<(), fbinsights::InsightsError>(())
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{BlockDefect, InsightsError, Result};

/// The kinds of document found in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Likes and reactions on posts and comments
    Reactions,
    /// One conversation of the inbox
    Messages,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Reactions => write!(f, "reactions"),
            DocumentKind::Messages => write!(f, "messages"),
        }
    }
}

/// A block that was located but produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBlock {
    /// Zero-based position among located blocks
    pub index: usize,
    pub defect: BlockDefect,
}

/// Result of extracting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<T> {
    /// Records in document order
    pub records: Vec<T>,
    /// Located blocks that were skipped, in document order
    pub skipped: Vec<SkippedBlock>,
}

impl<T> Extraction<T> {
    /// Number of blocks located in the document.
    pub fn located(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    pub fn into_records(self) -> Vec<T> {
        self.records
    }
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Turns one export document into records.
pub trait Extractor {
    /// The record type produced.
    type Record;

    /// Human-readable name of the extractor.
    fn name(&self) -> &'static str;

    fn kind(&self) -> DocumentKind;

    /// Extracts records from a parsed document.
    ///
    /// # Errors
    ///
    /// Only in strict mode, with [`InsightsError::MalformedBlock`] for the
    /// first block that cannot be turned into a record.
    fn extract_document(&self, document: &Html) -> Result<Extraction<Self::Record>>;

    /// Parses markup from a string and extracts it.
    fn extract_str(&self, content: &str) -> Result<Extraction<Self::Record>> {
        let document = Html::parse_document(content);
        self.extract_document(&document)
    }

    /// Reads, parses and extracts a document file.
    ///
    /// # Errors
    ///
    /// [`InsightsError::SourceNotFound`] if the file does not exist and
    /// [`InsightsError::Encoding`] if it is not UTF-8.
    fn extract_file(&self, path: &Path) -> Result<Extraction<Self::Record>> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InsightsError::source_not_found(self.kind(), path),
            _ => InsightsError::Io(e),
        })?;
        let content = String::from_utf8(bytes).map_err(|source| InsightsError::Encoding {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), extractor = self.name(), "parsing document");
        self.extract_str(&content)
    }
}

/// Applies `build` to every located block, skipping or failing on defects.
pub(crate) fn collect_blocks<'a, T>(
    kind: DocumentKind,
    blocks: impl Iterator<Item = ElementRef<'a>>,
    skip_invalid: bool,
    build: impl Fn(ElementRef<'a>) -> std::result::Result<T, BlockDefect>,
) -> Result<Extraction<T>> {
    let mut extraction = Extraction::default();

    for (index, block) in blocks.enumerate() {
        match build(block) {
            Ok(record) => extraction.records.push(record),
            Err(defect) if skip_invalid => {
                warn!(%kind, index, %defect, "skipping block");
                extraction.skipped.push(SkippedBlock { index, defect });
            }
            Err(defect) => return Err(InsightsError::malformed_block(kind, index, defect)),
        }
    }

    debug!(
        %kind,
        records = extraction.records.len(),
        skipped = extraction.skipped.len(),
        "document extracted"
    );
    Ok(extraction)
}
