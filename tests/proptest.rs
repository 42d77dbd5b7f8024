//! Property-based tests for fbinsights.
//!
//! These tests generate random documents and record sequences to find edge
//! cases.

use proptest::prelude::*;

use fbinsights::core::{FilterConfig, apply_filters, fill_unknown_senders};
use fbinsights::insights::{daily_counts, hourly_distribution, minutes_to_hhmm, timed_messages};
use fbinsights::parser::Extractor;
use fbinsights::parsers::{MessageExtractor, ReactionExtractor};
use fbinsights::record::UNKNOWN;
use fbinsights::{MessageRecord, ReactionRecord};

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "Alice".to_string(),
        "Bob Smith".to_string(),
        "Zoë".to_string(),
        "Иван".to_string(),
        "Jean-Luc".to_string(),
        "O Brien".to_string(),
    ])
}

fn arb_timestamp() -> impl Strategy<Value = String> {
    (
        1u32..=28,
        prop::sample::select(vec!["January", "May", "October", "December"]),
        2015i32..=2023,
        0u32..24,
        0u32..60,
    )
        .prop_map(|(day, month, year, hour, minute)| {
            format!("{day} {month} {year} {hour:02}:{minute:02}")
        })
}

/// A reaction card and the record it should produce, if any.
fn arb_card() -> impl Strategy<Value = (String, Option<ReactionRecord>)> {
    (
        arb_name(),
        arb_name(),
        prop::sample::select(vec!["like", "love", "haha", "wow", "sorry", "anger"]),
        arb_timestamp(),
        0u8..4,
    )
        .prop_map(|(actor, target, kind, time, shape)| {
            let (sentence, expected) = match shape {
                0 => (
                    format!("{actor} liked {target}'s post."),
                    Some(ReactionRecord::new(&time, kind, &actor, &target)),
                ),
                1 => (
                    format!("{actor} reacted to {target}'s comment."),
                    Some(ReactionRecord::new(&time, kind, &actor, &target)),
                ),
                2 => (
                    format!("{actor} reacted to their own photo."),
                    Some(ReactionRecord::new(&time, kind, &actor, &actor)),
                ),
                _ => (format!("{actor} updated {target} status."), None),
            };
            let html = format!(
                r#"<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder"><div class="_3-96 _2pio _2lek _2lel">{sentence}</div><div class="_2pin"><img src="icons/{kind}.png"></div><div class="_3-94 _2lem">{time}</div></div>"#
            );
            (html, expected)
        })
}

fn arb_message_block() -> impl Strategy<Value = (String, MessageRecord)> {
    (
        prop::option::of(arb_name()),
        prop::option::of(prop::sample::select(vec![
            "Hello".to_string(),
            "Hi, there!".to_string(),
            "Привет мир".to_string(),
            "🎉🔥 emoji".to_string(),
            "quote \"this\"".to_string(),
        ])),
        arb_timestamp(),
    )
        .prop_map(|(sender, body, time)| {
            let sender_html = sender
                .as_ref()
                .map(|s| format!(r#"<div class="_3-96 _2pio _2lek _2lel">{s}</div>"#))
                .unwrap_or_default();
            let body_html = body
                .as_ref()
                .map(|b| format!("<div>{b}</div>"))
                .unwrap_or_default();
            let html = format!(
                r#"<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">{sender_html}<div class="_3-96 _2let"><div><div></div>{body_html}</div></div><div class="_3-94 _2lem">{time}</div></div>"#
            );
            let record = MessageRecord::new(
                time,
                sender.unwrap_or_else(|| UNKNOWN.to_string()),
                body.unwrap_or_else(|| UNKNOWN.to_string()),
            );
            (html, record)
        })
}

fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<MessageRecord>> {
    prop::collection::vec(
        (
            prop::sample::select(vec![
                "Alice".to_string(),
                "Bob".to_string(),
                UNKNOWN.to_string(),
            ]),
            arb_timestamp(),
        )
            .prop_map(|(sender, time)| MessageRecord::new(time, sender, "text")),
        0..max_len,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ============================================
    // EXTRACTION PROPERTIES
    // ============================================

    /// Unmatched cards contribute nothing and leave the others untouched
    #[test]
    fn unmatched_cards_do_not_affect_others(cards in prop::collection::vec(arb_card(), 0..20)) {
        let html = format!(
            "<html><body>{}</body></html>",
            cards.iter().map(|(html, _)| html.as_str()).collect::<String>()
        );
        let expected: Vec<ReactionRecord> =
            cards.iter().filter_map(|(_, record)| record.clone()).collect();

        let extraction = ReactionExtractor::new().extract_str(&html).unwrap();
        prop_assert_eq!(extraction.located(), cards.len());
        prop_assert_eq!(extraction.skipped.len(), cards.len() - expected.len());
        prop_assert_eq!(extraction.records, expected);
    }

    /// N well-formed message blocks give N records in document order
    #[test]
    fn message_blocks_map_one_to_one(blocks in prop::collection::vec(arb_message_block(), 0..30)) {
        let html = format!(
            r#"<html><body><div role="main">{}</div></body></html>"#,
            blocks.iter().map(|(html, _)| html.as_str()).collect::<String>()
        );
        let expected: Vec<MessageRecord> = blocks.iter().map(|(_, r)| r.clone()).collect();

        let records = MessageExtractor::new().extract_str(&html).unwrap().records;
        prop_assert_eq!(records, expected);
    }

    /// Extracting the same document twice gives the same records
    #[test]
    fn extraction_is_deterministic(cards in prop::collection::vec(arb_card(), 0..10)) {
        let html: String = cards.iter().map(|(html, _)| html.as_str()).collect();
        let extractor = ReactionExtractor::new();
        let first = extractor.extract_str(&html).unwrap();
        let second = extractor.extract_str(&html).unwrap();
        prop_assert_eq!(first, second);
    }

    // ============================================
    // PROCESSING PROPERTIES
    // ============================================

    /// Filling senders keeps length, order, timestamps and bodies
    #[test]
    fn fill_preserves_everything_but_senders(messages in arb_messages(30)) {
        let filled = fill_unknown_senders(messages.clone(), UNKNOWN);
        prop_assert_eq!(filled.len(), messages.len());
        for (before, after) in messages.iter().zip(&filled) {
            prop_assert_eq!(&before.timestamp, &after.timestamp);
            prop_assert_eq!(&before.body, &after.body);
            if before.sender != UNKNOWN {
                prop_assert_eq!(&before.sender, &after.sender);
            }
        }
    }

    /// After the first known sender, nothing is unknown
    #[test]
    fn fill_leaves_only_leading_unknowns(messages in arb_messages(30)) {
        let filled = fill_unknown_senders(messages, UNKNOWN);
        let leading = filled.iter().take_while(|m| m.sender == UNKNOWN).count();
        prop_assert!(filled[leading..].iter().all(|m| m.sender != UNKNOWN));
    }

    /// Filtering never adds records, and every kept record matches
    #[test]
    fn sender_filter_keeps_only_matches(messages in arb_messages(30)) {
        let filtered = apply_filters(messages.clone(), &FilterConfig::new().with_sender("alice"));
        prop_assert!(filtered.len() <= messages.len());
        prop_assert!(filtered.iter().all(|m| m.sender == "Alice"));
    }

    // ============================================
    // INSIGHTS PROPERTIES
    // ============================================

    /// With a window covering everything, daily counts sum to the message count
    #[test]
    fn daily_counts_sum_to_total(messages in arb_messages(30)) {
        let total: usize = daily_counts(&messages, 100_000).iter().map(|r| r.messages).sum();
        prop_assert_eq!(total, messages.len());
    }

    /// Hourly buckets always cover 24 hours and sum to the message count
    #[test]
    fn hourly_distribution_sums_to_total(messages in arb_messages(30)) {
        let timed = timed_messages(&messages);
        let rows = hourly_distribution(timed.iter().map(|m| m.at));
        prop_assert_eq!(rows.len(), 24);
        prop_assert_eq!(rows.iter().map(|r| r.messages).sum::<usize>(), messages.len());
    }

    /// HH:MM formatting reads back as the same minute of the day
    #[test]
    fn hhmm_reads_back(minutes in 0u32..1440) {
        let text = minutes_to_hhmm(minutes);
        prop_assert_eq!(text.len(), 5);
        let (h, m) = text.split_once(':').unwrap();
        prop_assert_eq!(h.parse::<u32>().unwrap() * 60 + m.parse::<u32>().unwrap(), minutes);
    }
}
