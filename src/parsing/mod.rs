//! Shared parsing utilities for both extractors.
//!
//! - [`markup`] - selectors for the export's markup and small traversal helpers
//! - [`sentence`] - the reaction sentence interpreter and its surface forms

pub mod markup;
pub mod sentence;

// Re-export commonly used items
pub use markup::{first_attr, first_text, nth_text, text_of};
pub use sentence::{
    LikedForm, OwnContentForm, Parties, ReactedToForm, SentenceForm, SentenceInterpreter,
};
