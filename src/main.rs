//! # fbinsights CLI
//!
//! Command-line interface for the fbinsights library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use fbinsights::InsightsError;
use fbinsights::archive::{Archive, MessageInsightsOptions};
use fbinsights::cli::Args;
use fbinsights::core::ProcessingStats;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), InsightsError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_tracing(args.log_level());

    // Validate options before touching the export
    let filter_config = args.filter_config()?;
    let insights_config = args.insights_config()?;

    println!("📦 fbinsights v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Kind:    {}", args.kind);
    println!("📂 Root:    {}", args.root.display());
    if args.insights {
        println!("📄 Format:  {}", args.format);
    }
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    if args.strict {
        println!("🛑 Mode:    Strict");
    }
    println!();

    let archive = Archive::new(&args.root)
        .with_reaction_config(args.reaction_config())
        .with_message_config(args.message_config());

    let mut failed = Vec::new();
    let mut totals = ProcessingStats::default();

    if args.kind.includes_reactions() {
        println!("⏳ Extracting reactions...");
        let step = Instant::now();
        let doc = archive.extract_reactions()?;
        println!(
            "   {} reactions, {} skipped ({:.2}s)",
            doc.stats.extracted,
            doc.stats.skipped,
            step.elapsed().as_secs_f64()
        );
        println!("   Written to {}", doc.csv_path.display());
        totals = totals.combine(doc.stats);
    }

    if args.kind.includes_messages() {
        println!("⏳ Extracting conversations...");
        let step = Instant::now();
        let report = archive.extract_messages()?;
        let stats = report.stats();
        println!(
            "   {} conversations, {} messages, {} skipped ({:.2}s)",
            report.succeeded.len(),
            stats.extracted,
            stats.skipped,
            step.elapsed().as_secs_f64()
        );
        totals = totals.combine(stats);
        failed = report.failed;
    }

    if args.insights {
        if args.kind.includes_reactions() {
            println!("📈 Writing reaction insights...");
            for path in archive.write_reaction_insights(&insights_config, &filter_config)? {
                println!("   {}", path.display());
            }
        }
        if args.kind.includes_messages() {
            println!("📈 Writing message insights...");
            let options = MessageInsightsOptions {
                fill_senders: args.fill_senders,
                filter: filter_config.clone(),
            };
            let written = archive.write_message_insights(&insights_config, &options)?;
            println!(
                "   {} tables in {}",
                written.len(),
                archive.layout().messages_insights_path(archive.root()).display()
            );
        }
    }

    println!();
    println!("✅ Done!");

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Blocks:    {}", totals.located);
    println!("   Records:   {}", totals.extracted);
    println!(
        "   Skipped:   {} ({:.1}%)",
        totals.skipped,
        totals.skip_ratio()
    );
    if !failed.is_empty() {
        println!("   Failed conversations: {}", failed.len());
        for conversation in &failed {
            println!("   ⚠️  {}: {}", conversation.name, conversation.error);
        }
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
