//! Core processing logic for fbinsights.
//!
//! This module contains:
//! - [`filter`] - Record filtering by date and person
//! - [`processor`] - Sender carry-forward and extraction statistics
//! - [`output`] - CSV/JSON writers and CSV loaders
//!
//! # Quick Start
//!
//! ```rust
//! use fbinsights::core::{
//!     FilterConfig, ProcessingStats, apply_filters, fill_unknown_senders,
//!     read_messages_csv, write_csv, write_table,
//! };
//! ```

pub mod filter;
pub mod output;
pub mod processor;

// Re-export main types for convenience
pub use filter::{FilterConfig, Filterable, apply_filters};
pub use output::{read_messages_csv, read_reactions_csv, to_csv, write_csv, write_table};
pub use processor::{ProcessingStats, fill_unknown_senders};
