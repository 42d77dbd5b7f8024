//! Message aggregates: per conversation and across the whole inbox.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use super::{TimedMessage, minutes_to_hhmm, timed_messages, window_start};
use crate::core::output::TableRow;
use crate::record::MessageRecord;

/// The messages of one conversation, named after its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub name: String,
    pub messages: Vec<MessageRecord>,
}

impl Conversation {
    pub fn new(name: impl Into<String>, messages: Vec<MessageRecord>) -> Self {
        Self {
            name: name.into(),
            messages,
        }
    }
}

/// A timed message tagged with the conversation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationMessage {
    pub conversation: String,
    pub at: NaiveDateTime,
    pub sender: String,
}

/// One point of a conversation's activity scatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub time: String,
    pub minute_of_day: u32,
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub sender: String,
    pub messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SenderCount {
    pub sender: String,
    pub messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub label: String,
    pub messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub weekday: String,
    pub messages: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MostActive {
    pub date: NaiveDate,
    pub conversation: String,
    pub messages: usize,
}

impl TableRow for TimelinePoint {
    const COLUMNS: &'static [&'static str] = &["date", "time", "minute_of_day", "sender"];
}

impl TableRow for DailyCount {
    const COLUMNS: &'static [&'static str] = &["date", "sender", "messages"];
}

impl TableRow for SenderCount {
    const COLUMNS: &'static [&'static str] = &["sender", "messages"];
}

impl TableRow for HourlyCount {
    const COLUMNS: &'static [&'static str] = &["hour", "label", "messages"];
}

impl TableRow for WeekdayCount {
    const COLUMNS: &'static [&'static str] = &["weekday", "messages"];
}

impl TableRow for MostActive {
    const COLUMNS: &'static [&'static str] = &["date", "conversation", "messages"];
}

/// Restricts chronologically sorted messages to the last `days` days.
fn trailing_window(timed: Vec<TimedMessage>, days: i64) -> (Vec<TimedMessage>, Option<(NaiveDate, NaiveDate)>) {
    let (Some(first), Some(last)) = (timed.first(), timed.last()) else {
        return (timed, None);
    };
    let last_date = last.at.date();
    let start = window_start(first.at.date(), last_date, days);
    let windowed: Vec<TimedMessage> = timed
        .into_iter()
        .filter(|m| m.at.date() >= start)
        .collect();
    (windowed, Some((start, last_date)))
}

/// Every message of the last `days` days as a `(date, time of day, sender)`
/// point, in chronological order.
///
/// The window ends at the most recent message.
pub fn conversation_timeline(records: &[MessageRecord], days: i64) -> Vec<TimelinePoint> {
    let (windowed, _) = trailing_window(timed_messages(records), days);

    windowed
        .into_iter()
        .map(|m| {
            let minute_of_day = m.at.hour() * 60 + m.at.minute();
            TimelinePoint {
                date: m.at.date(),
                time: minutes_to_hhmm(minute_of_day),
                minute_of_day,
                sender: m.sender,
            }
        })
        .collect()
}

/// Messages per day and sender over the last `days` days.
///
/// Dense: every date of the window gets one row per sender, zero when the
/// sender was silent that day. Senders appear in order of their first message.
pub fn daily_counts(records: &[MessageRecord], days: i64) -> Vec<DailyCount> {
    let (windowed, range) = trailing_window(timed_messages(records), days);
    let Some((start, end)) = range else {
        return Vec::new();
    };

    let mut senders: Vec<&str> = Vec::new();
    let mut counts: HashMap<(NaiveDate, &str), usize> = HashMap::new();
    for m in &windowed {
        if !senders.contains(&m.sender.as_str()) {
            senders.push(&m.sender);
        }
        *counts.entry((m.at.date(), m.sender.as_str())).or_insert(0) += 1;
    }

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .flat_map(|date| {
            senders.iter().map(move |sender| (date, *sender))
        })
        .map(|(date, sender)| DailyCount {
            date,
            sender: sender.to_string(),
            messages: counts.get(&(date, sender)).copied().unwrap_or(0),
        })
        .collect()
}

/// Total messages per sender, most active first, ties by name.
///
/// Counts every record, including those whose timestamp does not parse.
pub fn sender_counts(records: &[MessageRecord]) -> Vec<SenderCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.sender.as_str()).or_insert(0) += 1;
    }

    let mut rows: Vec<SenderCount> = counts
        .into_iter()
        .map(|(sender, messages)| SenderCount {
            sender: sender.to_string(),
            messages,
        })
        .collect();
    // BTreeMap order is by name, and the sort is stable
    rows.sort_by(|a, b| b.messages.cmp(&a.messages));
    rows
}

/// Message counts per hour of the day, always 24 rows.
pub fn hourly_distribution<I>(times: I) -> Vec<HourlyCount>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut buckets = [0usize; 24];
    for at in times {
        buckets[at.hour() as usize] += 1;
    }

    (0u32..)
        .zip(buckets)
        .map(|(hour, messages)| HourlyCount {
            hour,
            label: minutes_to_hhmm(hour * 60),
            messages,
        })
        .collect()
}

/// Message counts per day of the week, always 7 rows starting on Monday.
pub fn weekly_distribution<I>(times: I) -> Vec<WeekdayCount>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut buckets = [0usize; 7];
    for at in times {
        buckets[at.weekday().num_days_from_monday() as usize] += 1;
    }

    let days = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    days.into_iter()
        .zip(buckets)
        .map(|(day, messages)| WeekdayCount {
            weekday: weekday_name(day).to_string(),
            messages,
        })
        .collect()
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Folds every conversation's timed messages into one sequence.
///
/// Each step takes the accumulated sequence and returns it extended with
/// the next conversation, in the order given.
pub fn gather(conversations: &[Conversation]) -> Vec<ConversationMessage> {
    conversations.iter().fold(Vec::new(), |mut acc, conversation| {
        acc.extend(
            timed_messages(&conversation.messages)
                .into_iter()
                .map(|m| ConversationMessage {
                    conversation: conversation.name.clone(),
                    at: m.at,
                    sender: m.sender,
                }),
        );
        acc
    })
}

/// For each day with at least one message, the conversation with the most
/// messages that day. Ties go to the alphabetically first conversation.
pub fn most_active_per_day(messages: &[ConversationMessage]) -> Vec<MostActive> {
    let mut per_day: BTreeMap<NaiveDate, BTreeMap<&str, usize>> = BTreeMap::new();
    for m in messages {
        *per_day
            .entry(m.at.date())
            .or_default()
            .entry(m.conversation.as_str())
            .or_insert(0) += 1;
    }

    per_day
        .into_iter()
        .filter_map(|(date, counts)| {
            // max_by_key keeps the last maximum, so walk names in reverse
            counts
                .into_iter()
                .rev()
                .max_by_key(|(_, count)| *count)
                .map(|(conversation, messages)| MostActive {
                    date,
                    conversation: conversation.to_string(),
                    messages,
                })
        })
        .collect()
}
