//! Output formats for conversation summaries
//!
//! Every format is derived from the same `ConversationSummary`:
//! - `text`: markdown report for humans
//! - `json` / `yaml`: the structured summary object
//! - `cortex`: one JSON entry per line for append-only ingestion

use crate::error::{Error, Result};
use crate::memory::{ConversationSummary, CortexEntry, ExtractedItem};
use serde::{Deserialize, Serialize};

/// Selectable output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable markdown report
    #[default]
    Text,
    /// Structured summary as pretty JSON
    Json,
    /// Structured summary as YAML
    Yaml,
    /// Line-delimited Cortex entries
    Cortex,
}

/// Render `summary` in the requested format
pub fn render(summary: &ConversationSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(summary)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&summary.to_structured())?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&summary.to_structured())?),
        OutputFormat::Cortex => render_cortex(summary),
    }
}

/// Markdown report; sections without items are omitted
pub fn render_text(summary: &ConversationSummary) -> String {
    let mut lines = vec![format!("# Conversation Summary - {}", summary.date)];

    if !summary.metrics.is_empty() {
        lines.extend(["".to_string(), "## 📊 Metrics".to_string(), "".to_string()]);
        for (name, value) in &summary.metrics {
            lines.push(format!("- **{}**: {}", name, value));
        }
    }

    push_section(&mut lines, "## 🎯 Key Decisions", &summary.key_decisions, "- ");
    push_section(&mut lines, "## ✅ Action Items", &summary.action_items, "- [ ] ");
    push_section(&mut lines, "## 💡 Insights & Learnings", &summary.insights, "- ");
    push_section(&mut lines, "## ⚠️ Problems Encountered", &summary.problems, "- ");
    push_section(&mut lines, "## ✨ Solutions Implemented", &summary.solutions, "- ");

    let entries = summary.item_count();
    if entries > 0 {
        lines.extend([
            "".to_string(),
            format!("## 🧠 Cortex Entries ({} items)", entries),
            "".to_string(),
            "Ready for storage. Run with `--format cortex` to output in Cortex format.".to_string(),
        ]);
    }

    lines.join("\n")
}

fn push_section(lines: &mut Vec<String>, header: &str, items: &[ExtractedItem], bullet: &str) {
    if items.is_empty() {
        return;
    }
    lines.extend(["".to_string(), header.to_string(), "".to_string()]);
    lines.extend(items.iter().map(|i| format!("{}{}", bullet, i.text)));
}

/// One JSON object per line, no trailing newline
pub fn render_cortex(summary: &ConversationSummary) -> Result<String> {
    let lines = summary
        .cortex_entries()
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}

/// Parse an entry stream back into entries, skipping blank lines
pub fn parse_cortex(stream: &str) -> Result<Vec<CortexEntry>> {
    stream
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str::<CortexEntry>(line).map_err(Error::from))
        .collect()
}
