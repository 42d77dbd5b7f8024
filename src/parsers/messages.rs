//! Conversation extractor.
//!
//! Message blocks are the direct children of `div[role="main"]`. The sender
//! label is omitted on consecutive messages from the same person, and media
//! messages have no text node; both degrade to the unknown sentinel. Only a
//! missing timestamp disqualifies a block.
//!
//! Document order is kept as is. The export lists newest messages first;
//! sorting is up to the consumer.

use std::sync::LazyLock;

use scraper::{ElementRef, Html};

use crate::config::MessageConfig;
use crate::error::{BlockDefect, Result};
use crate::parser::{DocumentKind, Extraction, Extractor, collect_blocks};
use crate::parsing::markup::{BODY_CANDIDATES, HEADLINE, MESSAGE_BLOCK, TIMESTAMP};
use crate::parsing::{first_text, nth_text};
use crate::record::MessageRecord;

/// Extractor for `messages/inbox/<conversation>/message.html`.
///
/// # Example
///
/// ```rust,no_run
/// use fbinsights::parser::Extractor;
/// use fbinsights::parsers::MessageExtractor;
///
/// let extractor = MessageExtractor::new();
/// let extraction = extractor.extract_file("message.html".as_ref())?;
/// for msg in &extraction.records {
///     println!("{} {}: {}", msg.timestamp, msg.sender, msg.body);
/// }
/// # Ok::<(), fbinsights::InsightsError>(())
/// ```
pub struct MessageExtractor {
    config: MessageConfig,
}

static DEFAULT_EXTRACTOR: LazyLock<MessageExtractor> = LazyLock::new(MessageExtractor::new);

impl MessageExtractor {
    /// Creates a new extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: MessageConfig::default(),
        }
    }

    /// Creates an extractor with custom configuration.
    pub fn with_config(config: MessageConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &MessageConfig {
        &self.config
    }

    fn message_from_block(
        &self,
        block: ElementRef<'_>,
    ) -> std::result::Result<MessageRecord, BlockDefect> {
        let timestamp = first_text(block, &TIMESTAMP).ok_or(BlockDefect::MissingTimestamp)?;
        let timestamp = timestamp.trim();
        if timestamp.is_empty() {
            return Err(BlockDefect::EmptyField("time"));
        }

        let sender = first_text(block, &HEADLINE)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.config.unknown_sentinel.clone());

        let body = nth_text(block, &BODY_CANDIDATES, 1)
            .unwrap_or_else(|| self.config.unknown_sentinel.clone());

        Ok(MessageRecord::new(timestamp, sender, body))
    }
}

impl Default for MessageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for MessageExtractor {
    type Record = MessageRecord;

    fn name(&self) -> &'static str {
        "Messages"
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Messages
    }

    fn extract_document(&self, document: &Html) -> Result<Extraction<MessageRecord>> {
        collect_blocks(
            DocumentKind::Messages,
            document.select(&MESSAGE_BLOCK),
            self.config.skip_invalid,
            |block| self.message_from_block(block),
        )
    }
}

/// Extracts every message block of a document that has a timestamp.
pub fn extract_messages(document: &Html) -> Vec<MessageRecord> {
    DEFAULT_EXTRACTOR
        .extract_document(document)
        .map(Extraction::into_records)
        .unwrap_or_default()
}
