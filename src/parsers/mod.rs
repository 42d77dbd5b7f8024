//! Extractors for the export's HTML documents.
//!
//! - [`ReactionExtractor`] - `likes_and_reactions/posts_and_comments.html`
//! - [`MessageExtractor`] - `messages/inbox/<conversation>/message.html`
//!
//! Both implement [`Extractor`](crate::parser::Extractor). The free functions
//! [`extract_reactions`] and [`extract_messages`] run the default extractor
//! on an already parsed document and return only the records.
//!
//! # Example
//!
//! ```rust
//! use fbinsights::parsers::extract_reactions;
//! use scraper::Html;
//!
//! let doc = Html::parse_document(r#"
//!   <div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
//!     <div class="_3-96 _2pio _2lek _2lel">Alice liked Bob's post.</div>
//!     <div class="_2pin"><img src="icons/love.png"></div>
//!     <div class="_3-94 _2lem">3 January 2021 14:05</div>
//!   </div>"#);
//!
//! let reactions = extract_reactions(&doc);
//! assert_eq!(reactions[0].reaction_kind, "love");
//! assert_eq!(reactions[0].target, "Bob");
//! ```

mod messages;
mod reactions;

pub use messages::{MessageExtractor, extract_messages};
pub use reactions::{ReactionExtractor, extract_reactions};
