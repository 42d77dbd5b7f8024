//! End-to-end CLI tests for fbinsights.
//!
//! These tests run the actual binary against export directories built in a
//! temporary directory and check its output and the files it writes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const REACTIONS: &str = r#"<html><body><div role="main">
<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
  <div class="_3-96 _2pio _2lek _2lel">Alice liked Bob's post.</div>
  <div class="_3-96 _2let"><div><div class="_2pin"><img src="icons/like.png"></div></div></div>
  <div class="_3-94 _2lem">3 January 2021 14:05</div>
</div>
<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
  <div class="_3-96 _2pio _2lek _2lel">Alice reacted to Alice's own photo.</div>
  <div class="_3-96 _2let"><div><div class="_2pin"><img src="icons/love.png"></div></div></div>
  <div class="_3-94 _2lem">4 January 2021 10:00</div>
</div>
<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
  <div class="_3-96 _2pio _2lek _2lel">Alice went to an event.</div>
  <div class="_3-96 _2let"><div><div class="_2pin"><img src="icons/like.png"></div></div></div>
  <div class="_3-94 _2lem">5 January 2021 10:00</div>
</div>
</div></body></html>"#;

const CONVERSATION: &str = r#"<html><body><div role="main">
<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
  <div class="_3-96 _2pio _2lek _2lel">Bob</div>
  <div class="_3-96 _2let"><div><div></div><div>Hey, how are you?</div></div></div>
  <div class="_3-94 _2lem">1 May 2020 09:00</div>
</div>
<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
  <div class="_3-96 _2let"><div><div></div></div></div>
  <div class="_3-94 _2lem">1 May 2020 09:01</div>
</div>
<div class="pam _3-95 _2pi0 _2lej uiBoxWhite noborder">
  <div class="_3-96 _2pio _2lek _2lel">Alice</div>
  <div class="_3-96 _2let"><div><div></div><div>Fine!</div></div></div>
</div>
</div></body></html>"#;

/// Creates an export with reactions, two conversations and one empty
/// conversation directory.
fn setup_export() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    let root = dir.path();

    let likes = root.join("likes_and_reactions");
    fs::create_dir_all(&likes).unwrap();
    fs::write(likes.join("posts_and_comments.html"), REACTIONS).unwrap();

    for name in ["alice_1", "bob_2"] {
        let conv = root.join("messages/inbox").join(name);
        fs::create_dir_all(&conv).unwrap();
        fs::write(conv.join("message.html"), CONVERSATION).unwrap();
    }
    fs::create_dir_all(root.join("messages/inbox/ghost_3")).unwrap();

    dir
}

fn fbinsights() -> Command {
    Command::cargo_bin("fbinsights").unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {e}", path.display()))
}

// ============================================================================
// Basic functionality
// ============================================================================

#[test]
fn test_help() {
    fbinsights()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fbinsights"))
        .stdout(predicate::str::contains("--insights"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_version() {
    fbinsights()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_reactions() {
    let export = setup_export();

    fbinsights()
        .args(["reactions", export.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 reactions, 1 skipped"));

    let csv = read(&export.path().join("likes_and_reactions/posts_and_comments.csv"));
    assert_eq!(
        csv,
        "time,reaction,liker,poster\n\
         3 January 2021 14:05,like,Alice,Bob\n\
         4 January 2021 10:00,love,Alice,Alice\n"
    );
}

#[test]
fn test_messages_alias() {
    let export = setup_export();

    fbinsights()
        .args(["m", export.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 conversations, 4 messages, 2 skipped"))
        .stdout(predicate::str::contains("Failed conversations: 1"))
        .stdout(predicate::str::contains("ghost_3"));

    let csv = read(&export.path().join("messages/inbox/alice_1/message.csv"));
    assert_eq!(
        csv,
        "time,sender,text\n\
         1 May 2020 09:00,Bob,\"Hey, how are you?\"\n\
         1 May 2020 09:01,unknown,unknown\n"
    );
}

#[test]
fn test_all_with_insights() {
    let export = setup_export();

    fbinsights()
        .args(["all", export.path().to_str().unwrap(), "--insights"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Writing reaction insights"))
        .stdout(predicate::str::contains("Writing message insights"));

    let root = export.path();
    assert!(root.join("likes_and_reactions/insights/like_statistics.csv").exists());
    assert!(root.join("likes_and_reactions/insights/reaction_kinds.csv").exists());
    for table in [
        "alice_1_timeline.csv",
        "alice_1_daily.csv",
        "alice_1_senders.csv",
        "bob_2_timeline.csv",
        "hourly.csv",
        "weekly.csv",
        "most_active.csv",
    ] {
        assert!(root.join("messages/insights").join(table).exists(), "{table}");
    }

    let weekly = read(&root.join("messages/insights/weekly.csv"));
    // 1 May 2020 was a Friday; two conversations with two messages each
    assert!(weekly.contains("Friday,4\n"));
}

#[test]
fn test_insights_json_format() {
    let export = setup_export();

    fbinsights()
        .args(["r", export.path().to_str().unwrap(), "-i", "--format", "json"])
        .assert()
        .success();

    let json = read(&export.path().join("likes_and_reactions/insights/like_statistics.json"));
    let rows: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 2);
}

#[test]
fn test_fill_senders() {
    let export = setup_export();

    fbinsights()
        .args(["m", export.path().to_str().unwrap(), "-i", "--fill-senders"])
        .assert()
        .success();

    let senders = read(&export.path().join("messages/insights/alice_1_senders.csv"));
    assert_eq!(senders, "sender,messages\nBob,2\n");
}

#[test]
fn test_sender_filter() {
    let export = setup_export();

    fbinsights()
        .args(["m", export.path().to_str().unwrap(), "-i", "--from", "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From:    bob"));

    let senders = read(&export.path().join("messages/insights/bob_2_senders.csv"));
    assert_eq!(senders, "sender,messages\nBob,1\n");
}

#[test]
fn test_yearly_fixed_top() {
    let export = setup_export();

    fbinsights()
        .args([
            "r",
            export.path().to_str().unwrap(),
            "-i",
            "--years",
            "2020",
            "2021",
            "--top",
            "1",
            "--fixed-top",
        ])
        .assert()
        .success();

    let likes = read(&export.path().join("likes_and_reactions/insights/like_statistics.csv"));
    assert_eq!(likes, "year,poster,reactions\n2020,Alice,0\n2021,Alice,1\n");
}

// ============================================================================
// Strict mode and logging
// ============================================================================

#[test]
fn test_strict_mode_reports_conversations() {
    let export = setup_export();

    fbinsights()
        .args(["m", export.path().to_str().unwrap(), "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed conversations: 3"));
}

#[test]
fn test_strict_mode_fails_reactions() {
    let export = setup_export();

    fbinsights()
        .args(["r", export.path().to_str().unwrap(), "--strict"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("block #2"));
}

#[test]
fn test_skips_logged_as_warnings() {
    let export = setup_export();

    fbinsights()
        .args(["r", export.path().to_str().unwrap()])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping block"));
}

#[test]
fn test_rust_log_overrides_verbosity() {
    let export = setup_export();

    fbinsights()
        .args(["r", export.path().to_str().unwrap()])
        .env("RUST_LOG", "error")
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping block").not());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_missing_reactions_document() {
    let dir = tempdir().unwrap();

    fbinsights()
        .args(["r", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("posts_and_comments.html"));
}

#[test]
fn test_missing_inbox() {
    let dir = tempdir().unwrap();

    fbinsights()
        .args(["messages", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("inbox"));
}

#[test]
fn test_invalid_date() {
    let export = setup_export();

    fbinsights()
        .args(["m", export.path().to_str().unwrap(), "--after", "yesterday"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("yesterday"));
}

#[test]
fn test_huge_days_window() {
    let export = setup_export();

    fbinsights()
        .args(["m", export.path().to_str().unwrap(), "-i", "--days", "200000000000"])
        .assert()
        .success();

    let daily = read(&export.path().join("messages/insights/alice_1_daily.csv"));
    assert!(daily.starts_with("date,sender,messages\n"));
}

#[test]
fn test_unbounded_years_rejected() {
    let export = setup_export();

    fbinsights()
        .args([
            "r",
            export.path().to_str().unwrap(),
            "-i",
            "--years",
            "-2000000000",
            "2000000000",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_invalid_kind() {
    fbinsights()
        .args(["photos", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_root_argument() {
    fbinsights().arg("all").assert().failure();
}
