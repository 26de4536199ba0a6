//! Summarizer - Extract key insights from daily memory files
//!
//! Reads `<workspace>/memory/YYYY-MM-DD.md` files and prints a summary of
//! decisions, action items, learnings, problems, solutions and metrics.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use summarizer::{
    config::SummarizerConfig,
    cortex::{CortexSink, JsonlSink},
    format::{self, OutputFormat},
    memory::{DocumentStore, Extractor},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "summarizer")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Analyze conversations and extract structured insights")]
struct Cli {
    /// Date to analyze (YYYY-MM-DD). Default: today
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Number of days to analyze, ending at --date
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    days: u32,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Workspace path (default: ~/.openclaw/workspace)
    #[arg(long)]
    workspace: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "SUMMARIZER_CONFIG")]
    config: Option<PathBuf>,

    /// Append Cortex entries to this JSONL file
    #[arg(long)]
    store: Option<PathBuf>,

    /// Fail when a requested day has no memory file
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, summarizer::memory::document::DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the summary
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("summarizer={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        SummarizerConfig::from_file(config_path)?
    } else {
        SummarizerConfig::default()
    };
    if let Some(workspace) = cli.workspace {
        config.workspace.root = workspace;
    }
    let format = cli.format.unwrap_or(config.output.format);

    let store = DocumentStore::new(
        config.workspace.memory_path(),
        config.workspace.extension.clone(),
    );
    let extractor = Extractor::new(&config.extraction)?;

    let end = cli.date.unwrap_or_else(|| Local::now().date_naive());
    tracing::info!(
        "Analyzing {} day(s) ending {} in {}",
        cli.days,
        end,
        store.memory_dir().display()
    );

    let docs = store.load_range(end, cli.days, cli.strict)?;
    let summary = extractor.summarize(&docs);

    if summary.is_empty() {
        tracing::info!("No insights found for {}", summary.date);
    }

    let rendered = format::render(&summary, format)?;
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    if let Some(path) = cli.store {
        let mut sink = JsonlSink::new(&path);
        let entries = summary.cortex_entries();
        let ack = sink
            .append_all(&entries)
            .with_context(|| format!("Failed to store entries in {}", path.display()))?;
        match ack {
            Some(ack) => tracing::info!(
                "Stored {} Cortex entries in {} (last sequence {})",
                entries.len(),
                path.display(),
                ack.sequence
            ),
            None => tracing::info!("No Cortex entries to store"),
        }
    }

    Ok(())
}
