//! Aggregated views over extracted records.
//!
//! Every function here is pure: records in, rows out. The rows derive
//! [`Serialize`](serde::Serialize) and are written with
//! [`write_table`](crate::core::output::write_table).
//!
//! - [`messages`] - timelines, daily counts, sender counts, hourly and weekly
//!   distributions, most active conversation per day
//! - [`reactions`] - top reacted-to posters, overall or per year, and counts
//!   per reaction kind

pub mod messages;
pub mod reactions;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::record::MessageRecord;

pub use messages::{
    Conversation, ConversationMessage, DailyCount, HourlyCount, MostActive, SenderCount,
    TimelinePoint, WeekdayCount, conversation_timeline, daily_counts, gather,
    hourly_distribution, most_active_per_day, sender_counts, weekly_distribution,
};
pub use reactions::{KindCount, PosterCount, like_statistics, reaction_kind_counts};

/// A message with its timestamp parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedMessage {
    pub at: NaiveDateTime,
    pub sender: String,
}

/// Parses message timestamps and sorts chronologically.
///
/// Records with an unparsable timestamp are left out and logged.
pub fn timed_messages(records: &[MessageRecord]) -> Vec<TimedMessage> {
    let mut timed: Vec<TimedMessage> = records
        .iter()
        .filter_map(|record| match record.datetime() {
            Ok(at) => Some(TimedMessage {
                at,
                sender: record.sender.clone(),
            }),
            Err(e) => {
                warn!(error = %e, "ignoring message");
                None
            }
        })
        .collect();
    timed.sort_by_key(|m| m.at);
    timed
}

/// First day of a trailing window of `days` days ending at `last`, never
/// earlier than `first`.
///
/// A window longer than chrono can represent covers everything.
pub fn window_start(first: NaiveDate, last: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|span| last.checked_sub_signed(span))
        .map_or(first, |start| start.max(first))
}

/// Formats a minute of the day as `HH:MM`.
///
/// ```
/// use fbinsights::insights::minutes_to_hhmm;
///
/// assert_eq!(minutes_to_hhmm(0), "00:00");
/// assert_eq!(minutes_to_hhmm(845), "14:05");
/// ```
pub fn minutes_to_hhmm(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
