//! Summarizer - Extract key insights from daily memory files
//!
//! The summarizer reads the free-text memory documents a personal assistant
//! writes each day and pulls structured insights out of them: decisions,
//! action items, learnings, problems, solutions and metrics.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  DocumentStore   <workspace>/memory/YYYY-MM-DD.md             │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ MemoryDocument (per day)
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │                        Extractor                              │
//! │  - Trigger families (decision, action, learning, problem)     │
//! │  - Fixes Applied section → solutions                          │
//! │  - Metrics (win_rate, pnl, trades, commits)                   │
//! │  - categorize_insight / score_importance                      │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │ ConversationSummary
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │  format: text | json | yaml | cortex    cortex: JsonlSink     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Extraction is deterministic: the same documents always produce the same
//! summary, and an item's category and importance depend only on its text
//! and kind.
//!
//! ## Modules
//!
//! - [`memory`]: Documents, extraction and summaries
//! - [`format`]: Output renderers and the entry-stream parser
//! - [`cortex`]: Append-only entry sink
//! - [`config`]: Configuration management

pub mod config;
pub mod cortex;
pub mod error;
pub mod format;
pub mod memory;

pub use config::SummarizerConfig;
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use memory::{ConversationSummary, Extractor, MemoryDocument};
