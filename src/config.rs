//! Configuration types for extractors, archive layout and insights.
//!
//! Plain structs with builder methods, free of any CLI framework so they can
//! be used from library code and deserialized from a settings file.
//!
//! - [`ReactionConfig`] - reaction extraction settings
//! - [`MessageConfig`] - message extraction settings
//! - [`ArchiveLayout`] - where documents live inside an export
//! - [`InsightsConfig`] - aggregation window and top-N settings
//!
//! # Example
//!
//! ```rust
//! use fbinsights::config::MessageConfig;
//! use fbinsights::parsers::MessageExtractor;
//!
//! let config = MessageConfig::new()
//!     .with_skip_invalid(false)
//!     .with_unknown_sentinel("?");
//!
//! let extractor = MessageExtractor::with_config(config);
//! ```

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InsightsError, Result};
use crate::format::OutputFormat;
use crate::record::UNKNOWN;

/// Configuration for reaction extraction.
///
/// # Example
///
/// ```rust
/// use fbinsights::config::ReactionConfig;
///
/// let strict = ReactionConfig::new().with_skip_invalid(false);
/// assert!(!strict.skip_invalid);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionConfig {
    /// Skip malformed cards instead of failing the document (default: true)
    pub skip_invalid: bool,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self { skip_invalid: true }
    }
}

impl ReactionConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip malformed cards.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }
}

/// Configuration for message extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageConfig {
    /// Skip blocks without a timestamp instead of failing the document (default: true)
    pub skip_invalid: bool,

    /// Value used when sender or text cannot be recovered (default: `"unknown"`)
    pub unknown_sentinel: String,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            skip_invalid: true,
            unknown_sentinel: UNKNOWN.to_string(),
        }
    }
}

impl MessageConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to skip blocks without a timestamp.
    #[must_use]
    pub fn with_skip_invalid(mut self, skip: bool) -> Self {
        self.skip_invalid = skip;
        self
    }

    /// Sets the placeholder for unrecoverable fields.
    #[must_use]
    pub fn with_unknown_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.unknown_sentinel = sentinel.into();
        self
    }
}

/// File and directory names inside an export root.
///
/// Defaults match the HTML flavour of the export:
///
/// ```text
/// <root>/likes_and_reactions/posts_and_comments.html
/// <root>/messages/inbox/<conversation>/message.html
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveLayout {
    pub reactions_dir: PathBuf,
    pub reactions_document: String,
    pub reactions_csv: String,
    pub messages_dir: PathBuf,
    pub inbox_dir: String,
    pub message_document: String,
    pub message_csv: String,
    /// Sub-directory (of the reactions/messages dir) receiving insight tables
    pub insights_dir: String,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            reactions_dir: PathBuf::from("likes_and_reactions"),
            reactions_document: "posts_and_comments.html".to_string(),
            reactions_csv: "posts_and_comments.csv".to_string(),
            messages_dir: PathBuf::from("messages"),
            inbox_dir: "inbox".to_string(),
            message_document: "message.html".to_string(),
            message_csv: "message.csv".to_string(),
            insights_dir: "insights".to_string(),
        }
    }
}

impl ArchiveLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the name of each conversation's HTML document.
    #[must_use]
    pub fn with_message_document(mut self, name: impl Into<String>) -> Self {
        self.message_document = name.into();
        self
    }

    /// Overrides the name of the reactions HTML document.
    #[must_use]
    pub fn with_reactions_document(mut self, name: impl Into<String>) -> Self {
        self.reactions_document = name.into();
        self
    }

    pub fn reactions_document_path(&self, root: &Path) -> PathBuf {
        root.join(&self.reactions_dir).join(&self.reactions_document)
    }

    pub fn reactions_csv_path(&self, root: &Path) -> PathBuf {
        root.join(&self.reactions_dir).join(&self.reactions_csv)
    }

    pub fn inbox_path(&self, root: &Path) -> PathBuf {
        root.join(&self.messages_dir).join(&self.inbox_dir)
    }

    pub fn reactions_insights_path(&self, root: &Path) -> PathBuf {
        root.join(&self.reactions_dir).join(&self.insights_dir)
    }

    pub fn messages_insights_path(&self, root: &Path) -> PathBuf {
        root.join(&self.messages_dir).join(&self.insights_dir)
    }
}

/// Settings for the aggregation tables.
///
/// # Example
///
/// ```rust
/// use fbinsights::config::InsightsConfig;
///
/// let config = InsightsConfig::new().with_days(30).with_top(Some(10)).yearly();
/// assert_eq!(config.days, 30);
/// assert!(config.yearly);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsConfig {
    /// Trailing window, in days, ending at the most recent message (default: 365)
    pub days: i64,

    /// Number of posters kept in like statistics; `None` keeps all (default: 20)
    pub top: Option<usize>,

    /// Split like statistics per calendar year (default: false)
    pub yearly: bool,

    /// Restrict yearly statistics to this inclusive year range
    pub years: Option<(i32, i32)>,

    /// Use the overall top posters for every year (default: false)
    pub fixed_top: bool,

    /// Table output format (default: CSV)
    pub format: OutputFormat,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            days: 365,
            top: Some(20),
            yearly: false,
            years: None,
            fixed_top: false,
            format: OutputFormat::Csv,
        }
    }
}

impl InsightsConfig {
    /// Years accepted in a year range.
    pub const YEARS: RangeInclusive<i32> = 1900..=9999;

    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    #[must_use]
    pub fn with_top(mut self, top: Option<usize>) -> Self {
        self.top = top;
        self
    }

    /// Enables per-year like statistics.
    #[must_use]
    pub fn yearly(mut self) -> Self {
        self.yearly = true;
        self
    }

    /// Enables per-year like statistics over a fixed range of years.
    #[must_use]
    pub fn with_years(mut self, start: i32, end: i32) -> Self {
        self.yearly = true;
        self.years = Some((start, end));
        self
    }

    #[must_use]
    pub fn with_fixed_top(mut self, fixed: bool) -> Self {
        self.fixed_top = fixed;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Checks that the window and the year range can be aggregated.
    ///
    /// # Errors
    ///
    /// [`InsightsError::InvalidConfig`] for negative `days`, or for a year
    /// range that is inverted or reaches outside [`InsightsConfig::YEARS`].
    pub fn validate(&self) -> Result<()> {
        if self.days < 0 {
            return Err(InsightsError::invalid_config("days must not be negative"));
        }
        if let Some((start, end)) = self.years {
            if start > end {
                return Err(InsightsError::invalid_config(format!(
                    "years {} {}: start is after end",
                    start, end
                )));
            }
            if !Self::YEARS.contains(&start) || !Self::YEARS.contains(&end) {
                return Err(InsightsError::invalid_config(format!(
                    "years {} {}: must lie within {}..={}",
                    start,
                    end,
                    Self::YEARS.start(),
                    Self::YEARS.end()
                )));
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reaction_config_default() {
        assert!(ReactionConfig::default().skip_invalid);
    }

    #[test]
    fn test_message_config_builder() {
        let config = MessageConfig::new()
            .with_skip_invalid(false)
            .with_unknown_sentinel("n/a");
        assert!(!config.skip_invalid);
        assert_eq!(config.unknown_sentinel, "n/a");
    }

    #[test]
    fn test_message_config_default_sentinel() {
        assert_eq!(MessageConfig::default().unknown_sentinel, "unknown");
    }

    #[test]
    fn test_layout_paths() {
        let layout = ArchiveLayout::default();
        let root = Path::new("/data/export");
        assert_eq!(
            layout.reactions_document_path(root),
            PathBuf::from("/data/export/likes_and_reactions/posts_and_comments.html")
        );
        assert_eq!(
            layout.reactions_csv_path(root),
            PathBuf::from("/data/export/likes_and_reactions/posts_and_comments.csv")
        );
        assert_eq!(
            layout.inbox_path(root),
            PathBuf::from("/data/export/messages/inbox")
        );
        assert_eq!(
            layout.messages_insights_path(root),
            PathBuf::from("/data/export/messages/insights")
        );
    }

    #[test]
    fn test_layout_overrides() {
        let layout = ArchiveLayout::new()
            .with_message_document("message_1.html")
            .with_reactions_document("likes.html");
        assert_eq!(layout.message_document, "message_1.html");
        assert!(
            layout
                .reactions_document_path(Path::new("r"))
                .ends_with("likes.html")
        );
    }

    #[test]
    fn test_insights_config_years() {
        let config = InsightsConfig::new().with_years(2018, 2020);
        assert!(config.yearly);
        assert_eq!(config.years, Some((2018, 2020)));
        assert_eq!(config.top, Some(20));
    }

    #[test]
    fn test_insights_config_validate() {
        assert!(InsightsConfig::default().validate().is_ok());
        assert!(InsightsConfig::new().with_days(i64::MAX).validate().is_ok());
        assert!(InsightsConfig::new().with_years(2004, 2024).validate().is_ok());

        for bad in [
            InsightsConfig::new().with_days(-1),
            InsightsConfig::new().with_years(2021, 2019),
            InsightsConfig::new().with_years(-2_000_000_000, 2_000_000_000),
            InsightsConfig::new().with_years(2020, 10_000),
        ] {
            let err = bad.validate().unwrap_err();
            assert!(matches!(err, InsightsError::InvalidConfig(_)), "{bad:?}");
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = MessageConfig::new().with_unknown_sentinel("?");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MessageConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.unknown_sentinel, "?");
    }
}
