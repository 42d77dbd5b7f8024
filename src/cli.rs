//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Kind`] - Which part of the export to process
//! - [`OutputFormat`] - Insight table format
//!
//! [`Args`] also knows how to turn itself into the library's configuration
//! types, so the binary stays a thin driver:
//!
//! ```rust
//! use clap::Parser;
//! use fbinsights::cli::{Args, Kind};
//!
//! let args = Args::try_parse_from(["fbinsights", "m", "export", "--days", "30"]).unwrap();
//! assert_eq!(args.kind, Kind::Messages);
//! assert_eq!(args.insights_config().unwrap().days, 30);
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{InsightsConfig, MessageConfig, ReactionConfig};
use crate::core::filter::FilterConfig;
use crate::error::Result;

/// Extract likes, reactions and messages from a Facebook HTML export
/// into CSV, and compute activity tables from them.
#[derive(Parser, Debug, Clone)]
#[command(name = "fbinsights")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    fbinsights all facebook-export
    fbinsights r facebook-export --insights --yearly --top 10 --fixed-top
    fbinsights m facebook-export --insights --days 90 --fill-senders
    fbinsights m facebook-export --insights --from alice --after 2020-01-01 --format json")]
pub struct Args {
    /// Part of the export to process
    #[arg(value_enum)]
    pub kind: Kind,

    /// Root directory of the export
    pub root: PathBuf,

    /// Also write insight tables after extracting
    #[arg(short, long)]
    pub insights: bool,

    /// Trailing window for timelines and daily counts, in days
    #[arg(long, value_name = "N", default_value_t = 365, allow_negative_numbers = true)]
    pub days: i64,

    /// Number of posters kept in like statistics
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top: usize,

    /// Keep every poster in like statistics (cannot be combined with --yearly)
    #[arg(long, conflicts_with = "top")]
    pub all_posters: bool,

    /// Split like statistics per year
    #[arg(long)]
    pub yearly: bool,

    /// Restrict yearly like statistics to a year range
    #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
    pub years: Option<Vec<i32>>,

    /// Use the overall top posters for every year
    #[arg(long)]
    pub fixed_top: bool,

    /// Insight table format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Only aggregate records on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only aggregate records on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Only aggregate messages from this sender, or reactions to this poster
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Attribute messages without a sender to the previous sender
    #[arg(long)]
    pub fill_senders: bool,

    /// Fail a document on its first malformed block instead of skipping it
    #[arg(long)]
    pub strict: bool,

    /// More log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn reaction_config(&self) -> ReactionConfig {
        ReactionConfig::new().with_skip_invalid(!self.strict)
    }

    pub fn message_config(&self) -> MessageConfig {
        MessageConfig::new().with_skip_invalid(!self.strict)
    }

    /// Builds the date and person filter.
    ///
    /// # Errors
    ///
    /// [`InsightsError::InvalidDate`](crate::error::InsightsError::InvalidDate) for a malformed `--after`/`--before`.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        Ok(filter)
    }

    /// Builds the aggregation settings.
    ///
    /// # Errors
    ///
    /// [`InsightsError::InvalidConfig`](crate::error::InsightsError::InvalidConfig) for a negative `--days` or a
    /// `--years` range that is inverted or out of bounds.
    pub fn insights_config(&self) -> Result<InsightsConfig> {
        let top = if self.all_posters { None } else { Some(self.top) };
        let mut config = InsightsConfig::new()
            .with_days(self.days)
            .with_top(top)
            .with_fixed_top(self.fixed_top)
            .with_format(self.format.into());

        if self.yearly {
            config = config.yearly();
        }
        if let Some([start, end]) = self.years.as_deref() {
            config = config.with_years(*start, *end);
        }
        config.validate()?;
        Ok(config)
    }

    /// Default log directive for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// Which part of the export to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// `likes_and_reactions/posts_and_comments.html`
    #[value(alias = "r", alias = "likes")]
    #[serde(alias = "r")]
    Reactions,

    /// Every conversation under `messages/inbox/`
    #[value(alias = "m")]
    #[serde(alias = "m")]
    Messages,

    /// Reactions, then messages
    #[value(alias = "a")]
    #[serde(alias = "a")]
    All,
}

impl Kind {
    pub fn includes_reactions(&self) -> bool {
        matches!(self, Kind::Reactions | Kind::All)
    }

    pub fn includes_messages(&self) -> bool {
        matches!(self, Kind::Messages | Kind::All)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Reactions => write!(f, "Reactions"),
            Kind::Messages => write!(f, "Messages"),
            Kind::All => write!(f, "Reactions + Messages"),
        }
    }
}

/// Insight table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV with a header row (default)
    #[default]
    Csv,

    /// Pretty-printed JSON array
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}
