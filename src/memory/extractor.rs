//! Rule-based extraction of insights from memory documents
//!
//! The Extractor scans a document once per pattern family. Extraction rules
//! are deterministic (no LLM):
//!
//! 1. Each family's triggers are compiled into one alternation, so matches
//!    within a family never overlap and come out in document order.
//! 2. The clause following a trigger, up to the end of its sentence or
//!    line, becomes the candidate text.
//! 3. Candidates are stripped of markdown decoration and dropped if
//!    nothing meaningful remains.
//! 4. Lines of the "Fixes Applied" section become solutions.
//!
//! Families are independent: one line can yield a decision and a metric.

use super::document::MemoryDocument;
use super::item::{ExtractedItem, ItemKind};
use super::metrics::{MetricExtractor, MetricSample};
use super::summary::ConversationSummary;
use crate::config::{ExtractionConfig, ItemLimits};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;

/// Candidates need at least this many alphanumeric characters
const MIN_ALNUM_CHARS: usize = 2;

/// Everything extracted from a single document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInsights {
    pub date: NaiveDate,
    /// Items grouped by kind in `ItemKind::ALL` order, document order within
    pub items: Vec<ExtractedItem>,
    /// Metric samples in document order
    pub metrics: Vec<MetricSample>,
}

struct Family {
    kind: ItemKind,
    pattern: Regex,
}

/// Rule-based extractor that produces insights from memory documents.
pub struct Extractor {
    families: Vec<Family>,
    metrics: MetricExtractor,
    solution_sections: Vec<String>,
    context_chars: usize,
    limits: ItemLimits,
}

impl Extractor {
    /// Compile the trigger tables of `config`
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let families = [
            ItemKind::Decision,
            ItemKind::ActionItem,
            ItemKind::Learning,
            ItemKind::Problem,
        ]
        .into_iter()
        .filter(|kind| !config.triggers(*kind).is_empty())
        .map(|kind| {
            let pattern = compile_family(config.triggers(kind)).map_err(|e| {
                Error::Pattern(format!("Invalid {} trigger pattern: {}", kind, e))
            })?;
            Ok(Family { kind, pattern })
        })
        .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            families,
            metrics: MetricExtractor::new()?,
            solution_sections: config.solution_sections.clone(),
            context_chars: config.context_chars,
            limits: config.limits.clone(),
        })
    }

    /// Extractor with the built-in trigger tables
    pub fn with_defaults() -> Result<Self> {
        Self::new(&ExtractionConfig::default())
    }

    /// Candidate texts for one family, in document order
    pub fn extract_family(&self, kind: ItemKind, text: &str) -> Vec<String> {
        let Some(family) = self.families.iter().find(|f| f.kind == kind) else {
            return Vec::new();
        };

        family
            .pattern
            .captures_iter(text)
            .filter_map(|caps| caps.name("body"))
            .filter_map(|body| clean_candidate(body.as_str()))
            .collect()
    }

    /// Solution lines from the configured sections
    pub fn extract_solutions(&self, doc: &MemoryDocument) -> Vec<String> {
        self.solution_sections
            .iter()
            .filter_map(|name| doc.section(name))
            .flat_map(|body| {
                body.lines()
                    .filter_map(clean_candidate)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Extract every item and metric from one document
    pub fn extract_document(&self, doc: &MemoryDocument) -> DocumentInsights {
        let mut items = Vec::new();

        for kind in ItemKind::ALL {
            let texts = match kind {
                ItemKind::Solution => self.extract_solutions(doc),
                _ => self.extract_family(kind, &doc.raw_text),
            };
            let limit = self.limits.get(kind).unwrap_or(usize::MAX);
            let context = self.context_for(doc, kind);

            items.extend(
                texts
                    .into_iter()
                    .take(limit)
                    .map(|text| ExtractedItem::new(kind, text, context.clone(), doc.date)),
            );
        }

        let metrics = self.metrics.samples(&doc.raw_text);

        tracing::debug!(
            "Extracted {} items and {} metric samples from {}",
            items.len(),
            metrics.len(),
            doc.date
        );

        DocumentInsights {
            date: doc.date,
            items,
            metrics,
        }
    }

    /// Summarize documents, oldest first.
    ///
    /// Input order does not matter: documents are sorted by date (stably)
    /// before their items are concatenated, so later dates always win for
    /// metrics.
    pub fn summarize(&self, docs: &[MemoryDocument]) -> ConversationSummary {
        let mut ordered: Vec<&MemoryDocument> = docs.iter().collect();
        ordered.sort_by_key(|d| d.date);

        let mut summary = ConversationSummary::for_dates(
            ordered.first().map(|d| d.date),
            ordered.last().map(|d| d.date),
        );
        for doc in ordered {
            summary.absorb(self.extract_document(doc));
        }
        summary
    }

    /// Leading slice of the section associated with `kind`
    fn context_for(&self, doc: &MemoryDocument, kind: ItemKind) -> String {
        let section = match kind {
            ItemKind::Decision => "Summary",
            ItemKind::ActionItem => "Tomorrow",
            ItemKind::Learning => "Lessons Learned",
            ItemKind::Problem | ItemKind::Solution => return String::new(),
        };
        doc.section(section)
            .map(|body| body.chars().take(self.context_chars).collect())
            .unwrap_or_default()
    }
}

/// Build one regex for a family: any trigger, then a lazily captured body
/// ending at sentence punctuation or the end of the line.
fn compile_family(triggers: &[String]) -> std::result::Result<Regex, regex::Error> {
    let alternation = triggers
        .iter()
        .map(|t| format!("(?:{t})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?im)\b(?:{alternation})(?P<body>[^\n]+?)(?:[.!?](?:\s|$)|$)"
    ))
}

/// Strip markdown decoration; `None` if too little text remains.
fn clean_candidate(raw: &str) -> Option<String> {
    let without_bold = raw.replace("**", "");
    let mut text = without_bold.trim();

    loop {
        let before = text.len();
        for checkbox in ["[ ]", "[x]", "[X]"] {
            if let Some(rest) = text.strip_prefix(checkbox) {
                text = rest;
            }
        }
        text = text.trim_start();
        if let Some(rest) = strip_marker(text) {
            text = rest;
        }
        if text.len() == before {
            break;
        }
    }

    let text = text
        .trim_end_matches(|c: char| {
            c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '*' | '_' | '~' | '-')
        })
        .to_string();

    let alnum = text.chars().filter(|c| c.is_alphanumeric()).count();
    if alnum < MIN_ALNUM_CHARS {
        return None;
    }
    Some(text)
}

/// Strip one leading list marker, heading run or emoji bullet.
///
/// A marker only counts when whitespace follows it, so `-5%`, `#42` and
/// `€5` keep their first character.
fn strip_marker(text: &str) -> Option<&str> {
    let first = text.chars().next()?;
    let marker_end = if is_ascii_marker(first) {
        text.find(|c: char| !is_ascii_marker(c))
    } else if !first.is_ascii() && !first.is_alphanumeric() {
        text.find(|c: char| c.is_ascii() || c.is_alphanumeric())
    } else {
        return None;
    };

    let rest = &text[marker_end.unwrap_or(text.len())..];
    rest.starts_with(char::is_whitespace).then_some(rest)
}

fn is_ascii_marker(c: char) -> bool {
    matches!(c, '-' | '*' | '+' | '>' | '#')
}
