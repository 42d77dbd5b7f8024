//! Selectors and traversal helpers for the export's HTML.
//!
//! The export uses generated class names rather than semantic markup. A
//! reaction card and a message block share the same outer container; only
//! the message variant sits directly under `div[role="main"]`.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e:?}"))
}

/// Outer container of a reaction card.
pub static REACTION_CARD: LazyLock<Selector> =
    LazyLock::new(|| selector("div.pam._3-95._2pi0._2lej.uiBoxWhite.noborder"));

/// Outer container of a message block.
pub static MESSAGE_BLOCK: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"div[role="main"] > div.pam._3-95._2pi0._2lej.uiBoxWhite.noborder"#)
});

/// Reaction sentence, or message sender.
pub static HEADLINE: LazyLock<Selector> =
    LazyLock::new(|| selector("div._3-96._2pio._2lek._2lel"));

/// Reaction image.
pub static REACTION_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("div._2pin img"));

/// Display timestamp.
pub static TIMESTAMP: LazyLock<Selector> = LazyLock::new(|| selector("div._3-94._2lem"));

/// Candidate nodes of a message body; the text is the second one.
pub static BODY_CANDIDATES: LazyLock<Selector> =
    LazyLock::new(|| selector("div._3-96._2let > div > div"));

/// Concatenated text of an element and all of its descendants.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the first descendant matching `selector`.
pub fn first_text(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(text_of)
}

/// Text of the `n`-th (zero-based) descendant matching `selector`.
pub fn nth_text(element: ElementRef<'_>, selector: &Selector, n: usize) -> Option<String> {
    element.select(selector).nth(n).map(text_of)
}

/// Attribute of the first descendant matching `selector`.
pub fn first_attr<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    attr: &str,
) -> Option<&'a str> {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
}
