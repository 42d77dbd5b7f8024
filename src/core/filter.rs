//! Filter records by date range and person.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering record collections.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Records on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Records on or before date |
//! | Person | [`with_sender`](FilterConfig::with_sender) | Message sender, or reacted-to poster |
//!
//! # Examples
//!
//! ```
//! use fbinsights::core::filter::{FilterConfig, apply_filters};
//! use fbinsights::MessageRecord;
//!
//! # fn main() -> fbinsights::Result<()> {
//! let messages = vec![
//!     MessageRecord::new("1 January 2024 12:00", "Alice", "Old"),
//!     MessageRecord::new("15 June 2024 12:00", "Alice", "New"),
//!     MessageRecord::new("15 June 2024 12:05", "Bob", "Hi"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("alice");
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body, "New");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Records whose timestamp cannot be parsed are **excluded** when date filters are active
//! - Person matching is case-insensitive for ASCII characters
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{InsightsError, Result};
use crate::record::{MessageRecord, ReactionRecord, parse_display_timestamp};

/// Records that can be filtered by date and person.
pub trait Filterable {
    /// The display timestamp as found in the export.
    fn display_timestamp(&self) -> &str;

    /// The person the sender filter is matched against.
    fn person(&self) -> &str;
}

impl Filterable for MessageRecord {
    fn display_timestamp(&self) -> &str {
        &self.timestamp
    }

    fn person(&self) -> &str {
        &self.sender
    }
}

impl Filterable for ReactionRecord {
    fn display_timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Reactions are filtered by whose content was reacted to.
    fn person(&self) -> &str {
        &self.target
    }
}

/// Configuration for filtering records by date and person.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Include only records on or after this moment.
    pub after: Option<NaiveDateTime>,

    /// Include only records on or before this moment.
    pub before: Option<NaiveDateTime>,

    /// Include only records of this person (case-insensitive).
    pub sender: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        let start = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| InsightsError::invalid_date(date_str))?;
        self.after = Some(start);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`InsightsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        let date = parse_filter_date(date_str)?;
        // End of the day to include the full day
        let end = date
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| InsightsError::invalid_date(date_str))?;
        self.before = Some(end);
        Ok(self)
    }

    /// Sets the person filter.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.sender.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    fn matches<R: Filterable>(&self, record: &R) -> bool {
        if let Some(ref sender) = self.sender {
            if !record.person().eq_ignore_ascii_case(sender) {
                return false;
            }
        }

        if self.has_date_filter() {
            let Ok(ts) = parse_display_timestamp(record.display_timestamp()) else {
                return false;
            };
            if self.after.is_some_and(|after| ts < after) {
                return false;
            }
            if self.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    }
}

fn parse_filter_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| InsightsError::invalid_date(date_str))
}

/// Filters records, keeping those that match every active filter.
///
/// If no filters are active, returns the input unchanged.
pub fn apply_filters<R: Filterable>(records: Vec<R>, config: &FilterConfig) -> Vec<R> {
    if !config.is_active() {
        return records;
    }

    records
        .into_iter()
        .filter(|record| config.matches(record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(sender: &str, body: &str, ts: &str) -> MessageRecord {
        MessageRecord::new(ts, sender, body)
    }

    #[test]
    fn test_filter_by_sender() {
        let messages = vec![
            msg("Alice", "Hello", "1 May 2020 09:00"),
            msg("Bob", "Hi", "1 May 2020 09:01"),
            msg("alice", "Bye", "1 May 2020 09:02"),
        ];

        let config = FilterConfig::new().with_sender("Alice");
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 2);
        assert!(
            filtered
                .iter()
                .all(|m| m.sender.eq_ignore_ascii_case("Alice"))
        );
    }

    #[test]
    fn test_filter_by_date_after() {
        let messages = vec![
            msg("Alice", "Old", "1 January 2024 12:00"),
            msg("Alice", "New", "15 June 2024 12:00"),
        ];

        let config = FilterConfig::new().with_date_from("2024-06-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "New");
    }

    #[test]
    fn test_filter_by_date_before_is_inclusive() {
        let messages = vec![
            msg("Alice", "Edge", "1 March 2024 23:59"),
            msg("Alice", "After", "2 March 2024 00:00"),
        ];

        let config = FilterConfig::new().with_date_to("2024-03-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "Edge");
    }

    #[test]
    fn test_unparsable_timestamp_excluded_when_date_filter() {
        let messages = vec![
            msg("Alice", "With date", "15 June 2024 12:00"),
            msg("Alice", "Bad date", "yesterday"),
        ];

        let config = FilterConfig::new().with_date_from("2024-01-01").unwrap();
        let filtered = apply_filters(messages, &config);

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].body, "With date");
    }

    #[test]
    fn test_unparsable_timestamp_kept_without_date_filter() {
        let messages = vec![msg("Alice", "Bad date", "yesterday")];
        let filtered = apply_filters(messages, &FilterConfig::new().with_sender("alice"));
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_reactions_filtered_by_poster() {
        let reactions = vec![
            ReactionRecord::new("1 May 2020 09:00", "like", "Me", "Bob"),
            ReactionRecord::new("1 May 2020 09:01", "love", "Me", "Carol"),
        ];
        let filtered = apply_filters(reactions, &FilterConfig::new().with_sender("carol"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].reaction_kind, "love");
    }

    #[test]
    fn test_invalid_date_format() {
        let result = FilterConfig::new().with_date_from("01-01-2024");
        assert!(matches!(result, Err(InsightsError::InvalidDate { .. })));
    }

    #[test]
    fn test_is_active() {
        assert!(!FilterConfig::new().is_active());
        assert!(FilterConfig::new().with_sender("Alice").is_active());
        assert!(
            FilterConfig::new()
                .with_date_to("2024-01-01")
                .unwrap()
                .is_active()
        );
    }
}
