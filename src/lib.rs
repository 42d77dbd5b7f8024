//! # fbinsights
//!
//! A Rust library for turning a Facebook "Download Your Information" HTML
//! export into tabular records, and for computing activity tables from them.
//!
//! ## Overview
//!
//! Two kinds of document are understood:
//! - **Reactions** - `likes_and_reactions/posts_and_comments.html`, one card
//!   per like or reaction, phrased as a sentence ("Alice liked Bob's post.")
//!   with the reaction type given by an image
//! - **Messages** - `messages/inbox/<conversation>/message.html`, one block
//!   per message with sender, text and time
//!
//! Each document becomes a CSV file next to it. Malformed blocks are skipped
//! and reported, and a broken conversation never stops the rest of the inbox.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fbinsights::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let archive = Archive::new("facebook-export");
//!
//!     // posts_and_comments.html -> posts_and_comments.csv
//!     archive.extract_reactions()?;
//!
//!     // every inbox/<conversation>/message.html -> message.csv
//!     let report = archive.extract_messages()?;
//!     println!("{} conversations, {} failed", report.succeeded.len(), report.failed.len());
//!
//!     // tables under likes_and_reactions/insights and messages/insights
//!     let config = InsightsConfig::new().with_days(90);
//!     archive.write_reaction_insights(&config, &FilterConfig::new())?;
//!     archive.write_message_insights(&config, &MessageInsightsOptions::default())?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Working with single documents
//!
//! ```rust
//! use fbinsights::prelude::*;
//!
//! let html = r#"<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
//!   <div class="_3-96 _2pio _2lek _2lel">Alice reacted to Alice's own photo.</div>
//!   <div class="_2pin"><img src="icons/haha.png"></div>
//!   <div class="_3-94 _2lem">3 January 2021 14:05</div>
//! </div>"#;
//!
//! let extraction = ReactionExtractor::new().extract_str(html)?;
//! assert_eq!(extraction.records[0].actor, "Alice");
//! assert_eq!(extraction.records[0].target, "Alice");
//! # Ok::<(), fbinsights::InsightsError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Extractor`](parser::Extractor) trait, [`Extraction`](parser::Extraction) report
//! - [`parsers`] - [`ReactionExtractor`](parsers::ReactionExtractor), [`MessageExtractor`](parsers::MessageExtractor)
//! - [`parsing`] - markup selectors and the reaction sentence forms
//! - [`record`] - [`ReactionRecord`], [`MessageRecord`], timestamp parsing
//! - [`archive`] - whole-export extraction and insight writing
//! - [`insights`] - aggregation tables
//! - [`core`] - filtering, sender carry-forward, CSV/JSON output
//! - [`config`] - extractor, layout and insights settings
//! - [`format`] - insight table formats
//! - [`cli`] - CLI types (requires `cli` feature)
//! - [`error`] - [`InsightsError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

pub mod archive;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod insights;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod record;

// Re-export the main types at the crate root for convenience
pub use error::{InsightsError, Result};
pub use record::{MessageRecord, ReactionRecord};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use fbinsights::prelude::*;
/// ```
pub mod prelude {
    // Records
    pub use crate::{MessageRecord, ReactionRecord};

    // Error types
    pub use crate::error::{InsightsError, Result};

    // Extraction
    pub use crate::parser::{DocumentKind, Extraction, Extractor};
    pub use crate::parsers::{MessageExtractor, ReactionExtractor};

    // Configuration
    pub use crate::config::{ArchiveLayout, InsightsConfig, MessageConfig, ReactionConfig};
    pub use crate::format::OutputFormat;

    // Whole-export orchestration
    pub use crate::archive::{Archive, BatchReport, MessageInsightsOptions};

    // Filtering and processing
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::processor::{ProcessingStats, fill_unknown_senders};

    // Output
    pub use crate::core::output::{read_messages_csv, read_reactions_csv, write_csv, write_table};
}
