//! Reaction sentence interpreter.
//!
//! Reaction cards describe the event in prose, e.g. `Alice liked Bob's post.`
//! or `Alice reacted to her own comment.` Each phrasing is a [`SentenceForm`];
//! the [`SentenceInterpreter`] tries its forms in order and returns the
//! first match.
//!
//! # Example
//!
//! ```rust
//! use fbinsights::parsing::SentenceInterpreter;
//!
//! let interpreter = SentenceInterpreter::standard();
//! let parties = interpreter.interpret("Alice reacted to Bob's photo.").unwrap();
//! assert_eq!(parties.actor, "Alice");
//! assert_eq!(parties.target, "Bob");
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Who reacted, and to whose content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parties {
    pub actor: String,
    pub target: String,
}

impl Parties {
    /// Builds trimmed parties, rejecting empty names.
    fn trimmed(actor: &str, target: &str) -> Option<Self> {
        let actor = actor.trim();
        let target = target.trim();
        if actor.is_empty() || target.is_empty() {
            return None;
        }
        Some(Self {
            actor: actor.to_string(),
            target: target.to_string(),
        })
    }
}

/// One recognized phrasing of a reaction event.
pub trait SentenceForm: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the parties if `sentence` is phrased this way.
    fn interpret(&self, sentence: &str) -> Option<Parties>;
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid pattern {re:?}: {e}"))
}

static LIKED: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(.+?) like[sd] (.+?)['’]s\b"));

static REACTED_TO: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"^(.+?) reacted to (.+?)['’]s\b"));

static OWN_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^(.+?) (?:like[sd]|reacted to) (?:his|her|their|your|my) own\b")
});

/// `<actor> likes <target>'s ...` and `<actor> liked <target>'s ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct LikedForm;

impl SentenceForm for LikedForm {
    fn name(&self) -> &'static str {
        "liked"
    }

    fn interpret(&self, sentence: &str) -> Option<Parties> {
        let caps = LIKED.captures(sentence.trim())?;
        Parties::trimmed(&caps[1], &caps[2])
    }
}

/// `<actor> reacted to <target>'s ...`
#[derive(Debug, Clone, Copy, Default)]
pub struct ReactedToForm;

impl SentenceForm for ReactedToForm {
    fn name(&self) -> &'static str {
        "reacted to"
    }

    fn interpret(&self, sentence: &str) -> Option<Parties> {
        let caps = REACTED_TO.captures(sentence.trim())?;
        Parties::trimmed(&caps[1], &caps[2])
    }
}

/// `<actor> liked|reacted to <pronoun> own ...`; the target is the actor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnContentForm;

impl SentenceForm for OwnContentForm {
    fn name(&self) -> &'static str {
        "own content"
    }

    fn interpret(&self, sentence: &str) -> Option<Parties> {
        let caps = OWN_CONTENT.captures(sentence.trim())?;
        Parties::trimmed(&caps[1], &caps[1])
    }
}

/// Ordered set of surface forms.
pub struct SentenceInterpreter {
    forms: Vec<Box<dyn SentenceForm>>,
}

impl SentenceInterpreter {
    /// An interpreter without any forms; everything is a mismatch.
    pub fn empty() -> Self {
        Self { forms: Vec::new() }
    }

    /// The phrasings used by the English export.
    ///
    /// Own-content is tried first so that `liked her own post` does not
    /// fall through to a possessive form.
    pub fn standard() -> Self {
        Self::empty()
            .with_form(OwnContentForm)
            .with_form(LikedForm)
            .with_form(ReactedToForm)
    }

    /// Appends a form; later forms are tried after earlier ones.
    #[must_use]
    pub fn with_form(mut self, form: impl SentenceForm + 'static) -> Self {
        self.forms.push(Box::new(form));
        self
    }

    /// Names of the registered forms, in trial order.
    pub fn form_names(&self) -> Vec<&'static str> {
        self.forms.iter().map(|f| f.name()).collect()
    }

    pub fn interpret(&self, sentence: &str) -> Option<Parties> {
        self.forms.iter().find_map(|form| form.interpret(sentence))
    }
}

impl Default for SentenceInterpreter {
    fn default() -> Self {
        Self::standard()
    }
}
