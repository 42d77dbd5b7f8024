//! Extraction and insights over a whole export directory.
//!
//! [`Archive`] ties an export root to an [`ArchiveLayout`] and the extractor
//! settings. Each document's records are written as a CSV next to the
//! document. Insight tables go to the `insights` sub-directory of the
//! reactions or messages directory.
//!
//! A failing conversation never stops the inbox: its error is recorded in
//! the [`BatchReport`] and the next conversation is processed.
//!
//! # Example
//!
//! ```rust,no_run
//! use fbinsights::archive::Archive;
//!
//! let archive = Archive::new("facebook-export");
//! let report = archive.extract_messages()?;
//! for failed in &report.failed {
//!     eprintln!("{}: {}", failed.name, failed.error);
//! }
//! # Ok::<(), fbinsights::InsightsError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::config::{ArchiveLayout, InsightsConfig, MessageConfig, ReactionConfig};
use crate::core::filter::{FilterConfig, apply_filters};
use crate::core::output::{read_messages_csv, read_reactions_csv, write_csv, write_table};
use crate::core::processor::{ProcessingStats, fill_unknown_senders};
use crate::error::{InsightsError, Result};
use crate::insights::{
    Conversation, conversation_timeline, daily_counts, gather, hourly_distribution,
    like_statistics, most_active_per_day, reaction_kind_counts, sender_counts,
    weekly_distribution,
};
use crate::parser::{DocumentKind, Extractor};
use crate::parsers::{MessageExtractor, ReactionExtractor};
use crate::record::ReactionRecord;

/// A document that was extracted and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Conversation directory name, or the reactions document name
    pub name: String,
    pub csv_path: PathBuf,
    pub stats: ProcessingStats,
}

/// A conversation that could not be extracted.
#[derive(Debug)]
pub struct FailedConversation {
    pub name: String,
    pub error: InsightsError,
}

/// Outcome of extracting every conversation of the inbox.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<ExtractedDocument>,
    pub failed: Vec<FailedConversation>,
}

impl BatchReport {
    /// True when no conversation failed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Statistics summed over every extracted conversation.
    pub fn stats(&self) -> ProcessingStats {
        self.succeeded
            .iter()
            .fold(ProcessingStats::default(), |acc, doc| acc.combine(doc.stats))
    }
}

/// Message-side options that only matter for insights.
#[derive(Debug, Clone, Default)]
pub struct MessageInsightsOptions {
    /// Carry known senders into unknown slots before aggregating
    pub fill_senders: bool,
    pub filter: FilterConfig,
}

/// An export root and how to read it.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
    layout: ArchiveLayout,
    reactions: ReactionConfig,
    messages: MessageConfig,
}

impl Archive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: ArchiveLayout::default(),
            reactions: ReactionConfig::default(),
            messages: MessageConfig::default(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: ArchiveLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_reaction_config(mut self, config: ReactionConfig) -> Self {
        self.reactions = config;
        self
    }

    #[must_use]
    pub fn with_message_config(mut self, config: MessageConfig) -> Self {
        self.messages = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &ArchiveLayout {
        &self.layout
    }

    /// Extracts the reactions document and writes its CSV.
    ///
    /// # Errors
    ///
    /// Propagates every failure, including a missing document.
    pub fn extract_reactions(&self) -> Result<ExtractedDocument> {
        let source = self.layout.reactions_document_path(&self.root);
        let output = self.layout.reactions_csv_path(&self.root);

        let extraction = ReactionExtractor::with_config(self.reactions.clone()).extract_file(&source)?;
        let stats = ProcessingStats::from_extraction(&extraction);
        write_csv(&extraction.records, &output)?;
        info!(path = %output.display(), records = stats.extracted, "reactions written");

        Ok(ExtractedDocument {
            name: self.layout.reactions_document.clone(),
            csv_path: output,
            stats,
        })
    }

    /// Conversation directories of the inbox, sorted by name.
    ///
    /// # Errors
    ///
    /// [`InsightsError::SourceNotFound`] if the inbox directory is missing.
    pub fn conversation_dirs(&self) -> Result<Vec<PathBuf>> {
        let inbox = self.layout.inbox_path(&self.root);
        let entries = fs::read_dir(&inbox).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => InsightsError::source_not_found(DocumentKind::Messages, &inbox),
            _ => InsightsError::Io(e),
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// Extracts one conversation directory and writes its CSV.
    pub fn extract_conversation(&self, dir: &Path) -> Result<ExtractedDocument> {
        let source = dir.join(&self.layout.message_document);
        let output = dir.join(&self.layout.message_csv);

        let extraction = MessageExtractor::with_config(self.messages.clone()).extract_file(&source)?;
        let stats = ProcessingStats::from_extraction(&extraction);
        write_csv(&extraction.records, &output)?;

        Ok(ExtractedDocument {
            name: conversation_name(dir),
            csv_path: output,
            stats,
        })
    }

    /// Extracts every conversation of the inbox.
    ///
    /// Conversations are independent: a failure is logged and recorded in
    /// the report, and the batch moves on.
    ///
    /// # Errors
    ///
    /// Only when the inbox itself cannot be listed.
    pub fn extract_messages(&self) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for dir in self.conversation_dirs()? {
            let name = conversation_name(&dir);
            match self.extract_conversation(&dir) {
                Ok(doc) => {
                    info!(conversation = %name, records = doc.stats.extracted, "conversation written");
                    report.succeeded.push(doc);
                }
                Err(e) => {
                    error!(conversation = %name, error = %e, "conversation failed");
                    report.failed.push(FailedConversation { name, error: e });
                }
            }
        }

        Ok(report)
    }

    /// Loads the reactions CSV written by [`extract_reactions`](Self::extract_reactions).
    pub fn load_reactions(&self) -> Result<Vec<ReactionRecord>> {
        read_reactions_csv(&self.layout.reactions_csv_path(&self.root))
    }

    /// Loads every conversation CSV of the inbox, sorted by name.
    ///
    /// Conversations without a CSV are left out with a warning.
    pub fn load_conversations(&self) -> Result<Vec<Conversation>> {
        let mut conversations = Vec::new();
        for dir in self.conversation_dirs()? {
            let name = conversation_name(&dir);
            match read_messages_csv(&dir.join(&self.layout.message_csv)) {
                Ok(messages) => conversations.push(Conversation::new(name, messages)),
                Err(e) if e.is_source_not_found() => {
                    warn!(conversation = %name, "no extracted messages");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(conversations)
    }

    /// Writes the reaction tables and returns their paths.
    ///
    /// - `like_statistics` - see [`like_statistics`]
    /// - `reaction_kinds` - see [`reaction_kind_counts`]
    pub fn write_reaction_insights(
        &self,
        config: &InsightsConfig,
        filter: &FilterConfig,
    ) -> Result<Vec<PathBuf>> {
        let records = apply_filters(self.load_reactions()?, filter);
        let dir = self.layout.reactions_insights_path(&self.root);
        let format = config.format;

        let likes = dir.join(format.file_name("like_statistics"));
        write_table(&like_statistics(&records, config)?, &likes, format)?;

        let kinds = dir.join(format.file_name("reaction_kinds"));
        write_table(&reaction_kind_counts(&records), &kinds, format)?;

        Ok(vec![likes, kinds])
    }

    /// Writes the message tables and returns their paths.
    ///
    /// Per conversation: `<name>_timeline`, `<name>_daily` and `<name>_senders`.
    /// Over the whole inbox: `hourly`, `weekly` and `most_active`.
    pub fn write_message_insights(
        &self,
        config: &InsightsConfig,
        options: &MessageInsightsOptions,
    ) -> Result<Vec<PathBuf>> {
        let sentinel = self.messages.unknown_sentinel.as_str();
        let conversations: Vec<Conversation> = self
            .load_conversations()?
            .into_iter()
            .map(|conversation| {
                let messages = if options.fill_senders {
                    fill_unknown_senders(conversation.messages, sentinel)
                } else {
                    conversation.messages
                };
                Conversation::new(conversation.name, apply_filters(messages, &options.filter))
            })
            .collect();

        let dir = self.layout.messages_insights_path(&self.root);
        let format = config.format;
        let mut written = Vec::new();

        for conversation in &conversations {
            let stem = |table: &str| dir.join(format.file_name(&format!("{}_{}", conversation.name, table)));

            let path = stem("timeline");
            write_table(&conversation_timeline(&conversation.messages, config.days), &path, format)?;
            written.push(path);

            let path = stem("daily");
            write_table(&daily_counts(&conversation.messages, config.days), &path, format)?;
            written.push(path);

            let path = stem("senders");
            write_table(&sender_counts(&conversation.messages), &path, format)?;
            written.push(path);
        }

        let everything = gather(&conversations);

        let path = dir.join(format.file_name("hourly"));
        write_table(&hourly_distribution(everything.iter().map(|m| m.at)), &path, format)?;
        written.push(path);

        let path = dir.join(format.file_name("weekly"));
        write_table(&weekly_distribution(everything.iter().map(|m| m.at)), &path, format)?;
        written.push(path);

        let path = dir.join(format.file_name("most_active"));
        write_table(&most_active_per_day(&everything), &path, format)?;
        written.push(path);

        Ok(written)
    }
}

fn conversation_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
