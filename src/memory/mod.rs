//! Memory documents and insight extraction
//!
//! Daily memory files are scanned for decisions, action items, learnings,
//! problems, solutions and metrics, and bundled into a summary.

pub mod document;
pub mod extractor;
pub mod item;
pub mod metrics;
pub mod rules;
pub mod summary;

pub use document::{DocumentStore, MemoryDocument};
pub use extractor::{DocumentInsights, Extractor};
pub use item::{Category, ExtractedItem, ItemKind};
pub use metrics::{MetricExtractor, MetricMap, MetricSample};
pub use rules::{categorize_insight, score_importance};
pub use summary::{ConversationSummary, CortexEntry, StructuredSummary};
