//! Post-extraction processing: sender carry-forward and statistics.

use crate::parser::Extraction;
use crate::record::MessageRecord;

/// Replaces unknown senders with the closest preceding known sender.
///
/// The export prints the sender once per run of consecutive messages, so
/// the extractor records the rest as `sentinel`. Unknown senders before the
/// first known one are left as they are.
///
/// # Example
///
/// ```
/// use fbinsights::core::processor::fill_unknown_senders;
/// use fbinsights::MessageRecord;
/// use fbinsights::record::UNKNOWN;
///
/// let messages = vec![
///     MessageRecord::new("1 May 2020 09:00", "Alice", "Hi"),
///     MessageRecord::new("1 May 2020 09:01", UNKNOWN, "How are you?"),
///     MessageRecord::new("1 May 2020 09:02", "Bob", "Fine"),
/// ];
///
/// let filled = fill_unknown_senders(messages, UNKNOWN);
/// assert_eq!(filled[1].sender, "Alice");
/// ```
pub fn fill_unknown_senders(messages: Vec<MessageRecord>, sentinel: &str) -> Vec<MessageRecord> {
    let mut last_known: Option<String> = None;

    messages
        .into_iter()
        .map(|msg| {
            if msg.is_unknown_sender(sentinel) {
                match &last_known {
                    Some(sender) => MessageRecord {
                        sender: sender.clone(),
                        ..msg
                    },
                    None => msg,
                }
            } else {
                last_known = Some(msg.sender.clone());
                msg
            }
        })
        .collect()
}

/// Statistics about one extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessingStats {
    /// Blocks located in the document
    pub located: usize,
    /// Records produced
    pub extracted: usize,
    /// Blocks skipped because of a defect
    pub skipped: usize,
}

impl ProcessingStats {
    pub fn new(extracted: usize, skipped: usize) -> Self {
        Self {
            located: extracted + skipped,
            extracted,
            skipped,
        }
    }

    pub fn from_extraction<T>(extraction: &Extraction<T>) -> Self {
        Self::new(extraction.records.len(), extraction.skipped.len())
    }

    /// Percentage of located blocks that were skipped.
    pub fn skip_ratio(&self) -> f64 {
        if self.located == 0 {
            return 0.0;
        }
        (self.skipped as f64 / self.located as f64) * 100.0
    }

    /// Adds another document's statistics.
    #[must_use]
    pub fn combine(self, other: ProcessingStats) -> Self {
        Self {
            located: self.located + other.located,
            extracted: self.extracted + other.extracted,
            skipped: self.skipped + other.skipped,
        }
    }
}
