//! Record types produced by the extractors.
//!
//! Both record kinds keep the timestamp exactly as it is displayed in the
//! export (for example `"3 January 2021 14:05"`). Turning it into a
//! [`NaiveDateTime`] is left to the consumers, through
//! [`parse_display_timestamp`].
//!
//! # Example
//!
//! ```
//! use fbinsights::{MessageRecord, ReactionRecord};
//!
//! let like = ReactionRecord::new("3 January 2021 14:05", "love", "Alice", "Bob");
//! assert_eq!(like.reaction_kind, "love");
//!
//! let msg = MessageRecord::new("1 May 2020 09:00", "Alice", "Hi!");
//! assert!(!msg.is_unknown_sender(fbinsights::record::UNKNOWN));
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{InsightsError, Result};

/// Placeholder for fields that cannot be recovered from the markup.
pub const UNKNOWN: &str = "unknown";

/// chrono format of the timestamps shown in the export.
pub const DISPLAY_FORMAT: &str = "%d %B %Y %H:%M";

/// One like or reaction on somebody's post or comment.
///
/// Serialized with the CSV column names `time, reaction, liker, poster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// Display timestamp, e.g. `3 January 2021 14:05`.
    #[serde(rename = "time")]
    pub timestamp: String,

    /// Reaction type taken from the image name (`like`, `love`, `haha`, ...).
    #[serde(rename = "reaction")]
    pub reaction_kind: String,

    /// Who reacted.
    #[serde(rename = "liker")]
    pub actor: String,

    /// Whose content was reacted to.
    #[serde(rename = "poster")]
    pub target: String,
}

impl ReactionRecord {
    /// CSV header, in column order.
    pub const HEADER: [&'static str; 4] = ["time", "reaction", "liker", "poster"];

    pub fn new(
        timestamp: impl Into<String>,
        reaction_kind: impl Into<String>,
        actor: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            reaction_kind: reaction_kind.into(),
            actor: actor.into(),
            target: target.into(),
        }
    }

    /// Returns the fields in CSV column order.
    pub fn to_row(&self) -> [&str; 4] {
        [
            &self.timestamp,
            &self.reaction_kind,
            &self.actor,
            &self.target,
        ]
    }

    /// Parses the display timestamp.
    pub fn datetime(&self) -> Result<NaiveDateTime> {
        parse_display_timestamp(&self.timestamp)
    }
}

/// One message of a conversation.
///
/// Serialized with the CSV column names `time, sender, text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Display timestamp. Always present.
    #[serde(rename = "time")]
    pub timestamp: String,

    /// Author name, or [`UNKNOWN`] when the export omitted it.
    ///
    /// The export drops the name on consecutive messages from the same
    /// person; see [`fill_unknown_senders`](crate::core::processor::fill_unknown_senders).
    pub sender: String,

    /// Text content, or [`UNKNOWN`] for media-only messages.
    #[serde(rename = "text")]
    pub body: String,
}

impl MessageRecord {
    /// CSV header, in column order.
    pub const HEADER: [&'static str; 3] = ["time", "sender", "text"];

    pub fn new(
        timestamp: impl Into<String>,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            sender: sender.into(),
            body: body.into(),
        }
    }

    /// Returns the fields in CSV column order.
    pub fn to_row(&self) -> [&str; 3] {
        [&self.timestamp, &self.sender, &self.body]
    }

    /// Parses the display timestamp.
    pub fn datetime(&self) -> Result<NaiveDateTime> {
        parse_display_timestamp(&self.timestamp)
    }

    /// Whether the sender is `sentinel`, the placeholder the extractor used.
    pub fn is_unknown_sender(&self, sentinel: &str) -> bool {
        self.sender == sentinel
    }
}

/// Parses a display timestamp such as `"3 January 2021 14:05"`.
///
/// # Example
///
/// ```
/// use chrono::{Datelike, Timelike};
/// use fbinsights::record::parse_display_timestamp;
///
/// let dt = parse_display_timestamp("3 January 2021 14:05")?;
/// assert_eq!((dt.year(), dt.month(), dt.day()), (2021, 1, 3));
/// assert_eq!((dt.hour(), dt.minute()), (14, 5));
/// # Ok::<(), fbinsights::InsightsError>(())
/// ```
pub fn parse_display_timestamp(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), DISPLAY_FORMAT)
        .map_err(|_| InsightsError::invalid_timestamp(input))
}
