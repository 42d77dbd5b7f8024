//! Likes and reactions extractor.
//!
//! Each reaction card carries a sentence (`Alice liked Bob's post.`), an
//! icon whose file name is the reaction kind (`.../love.png`) and the
//! display timestamp. A card is emitted only when all four fields are
//! recovered.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html};

use crate::config::ReactionConfig;
use crate::error::{BlockDefect, Result};
use crate::parser::{DocumentKind, Extraction, Extractor, collect_blocks};
use crate::parsing::SentenceInterpreter;
use crate::parsing::markup::{HEADLINE, REACTION_CARD, REACTION_IMAGE, TIMESTAMP};
use crate::parsing::{first_attr, first_text};
use crate::record::ReactionRecord;

/// Extractor for `likes_and_reactions/posts_and_comments.html`.
///
/// # Example
///
/// ```rust,no_run
/// use fbinsights::parser::Extractor;
/// use fbinsights::parsers::ReactionExtractor;
///
/// let extractor = ReactionExtractor::new();
/// let extraction = extractor.extract_file("posts_and_comments.html".as_ref())?;
/// println!("{} reactions", extraction.records.len());
/// # Ok::<(), fbinsights::InsightsError>(())
/// ```
pub struct ReactionExtractor {
    config: ReactionConfig,
    interpreter: SentenceInterpreter,
}

/// Word-character token right before `.png` in the icon path.
static ICON_STEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\.png").unwrap_or_else(|e| panic!("invalid icon pattern: {e}"))
});

static DEFAULT_EXTRACTOR: LazyLock<ReactionExtractor> = LazyLock::new(ReactionExtractor::new);

impl ReactionExtractor {
    /// Creates a new extractor with default configuration.
    pub fn new() -> Self {
        Self::with_config(ReactionConfig::default())
    }

    /// Creates an extractor with custom configuration.
    pub fn with_config(config: ReactionConfig) -> Self {
        Self {
            config,
            interpreter: SentenceInterpreter::standard(),
        }
    }

    /// Replaces the sentence interpreter.
    #[must_use]
    pub fn with_interpreter(mut self, interpreter: SentenceInterpreter) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ReactionConfig {
        &self.config
    }

    fn reaction_from_card(
        &self,
        card: ElementRef<'_>,
    ) -> std::result::Result<ReactionRecord, BlockDefect> {
        let sentence = first_text(card, &HEADLINE).ok_or(BlockDefect::MissingSentence)?;
        let parties = self
            .interpreter
            .interpret(&sentence)
            .ok_or_else(|| BlockDefect::PatternMismatch(sentence.trim().to_string()))?;

        let src = first_attr(card, &REACTION_IMAGE, "src").ok_or(BlockDefect::MissingImage)?;
        let reaction_kind = ICON_STEM
            .captures(src)
            .map(|caps| caps[1].to_string())
            .ok_or_else(|| BlockDefect::UnrecognizedImage(src.to_string()))?;

        let timestamp = first_text(card, &TIMESTAMP).ok_or(BlockDefect::MissingTimestamp)?;
        let timestamp = timestamp.trim();
        if timestamp.is_empty() {
            return Err(BlockDefect::EmptyField("time"));
        }

        Ok(ReactionRecord::new(
            timestamp,
            reaction_kind,
            parties.actor,
            parties.target,
        ))
    }
}

impl Default for ReactionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ReactionExtractor {
    type Record = ReactionRecord;

    fn name(&self) -> &'static str {
        "Reactions"
    }

    fn kind(&self) -> DocumentKind {
        DocumentKind::Reactions
    }

    fn extract_document(&self, document: &Html) -> Result<Extraction<ReactionRecord>> {
        collect_blocks(
            DocumentKind::Reactions,
            document.select(&REACTION_CARD),
            self.config.skip_invalid,
            |card| self.reaction_from_card(card),
        )
    }
}

/// Extracts every well-formed reaction of a document, skipping the rest.
pub fn extract_reactions(document: &Html) -> Vec<ReactionRecord> {
    DEFAULT_EXTRACTOR
        .extract_document(document)
        .map(Extraction::into_records)
        .unwrap_or_default()
}
