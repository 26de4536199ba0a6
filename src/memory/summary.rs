//! Conversation summaries and Cortex entries
//!
//! A `ConversationSummary` bundles the items of one or more days. It is
//! built fresh on every run and never persisted here; the structured and
//! entry-stream views below are two renderings of the same data.

use super::document::DATE_FORMAT;
use super::extractor::DocumentInsights;
use super::item::{Category, ExtractedItem, ItemKind};
use super::metrics::MetricMap;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Items and metrics for a single date or a contiguous date range
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationSummary {
    /// `YYYY-MM-DD`, or `YYYY-MM-DD..YYYY-MM-DD` for a range
    pub date: String,
    pub key_decisions: Vec<ExtractedItem>,
    pub action_items: Vec<ExtractedItem>,
    pub insights: Vec<ExtractedItem>,
    pub problems: Vec<ExtractedItem>,
    pub solutions: Vec<ExtractedItem>,
    pub metrics: MetricMap,
}

impl ConversationSummary {
    /// Empty summary labelled with the covered dates
    pub fn for_dates(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let date = match (start, end) {
            (Some(s), Some(e)) if s != e => {
                format!("{}..{}", s.format(DATE_FORMAT), e.format(DATE_FORMAT))
            }
            (Some(d), _) | (None, Some(d)) => d.format(DATE_FORMAT).to_string(),
            (None, None) => String::new(),
        };
        Self {
            date,
            ..Default::default()
        }
    }

    /// Append one document's results; its metrics overwrite earlier ones
    pub fn absorb(&mut self, insights: DocumentInsights) {
        for item in insights.items {
            self.items_mut(item.kind).push(item);
        }
        for sample in insights.metrics {
            self.metrics.insert(sample.name, sample.value);
        }
    }

    /// Items of one kind, in extraction order
    pub fn items(&self, kind: ItemKind) -> &[ExtractedItem] {
        match kind {
            ItemKind::Decision => &self.key_decisions,
            ItemKind::ActionItem => &self.action_items,
            ItemKind::Learning => &self.insights,
            ItemKind::Problem => &self.problems,
            ItemKind::Solution => &self.solutions,
        }
    }

    fn items_mut(&mut self, kind: ItemKind) -> &mut Vec<ExtractedItem> {
        match kind {
            ItemKind::Decision => &mut self.key_decisions,
            ItemKind::ActionItem => &mut self.action_items,
            ItemKind::Learning => &mut self.insights,
            ItemKind::Problem => &mut self.problems,
            ItemKind::Solution => &mut self.solutions,
        }
    }

    /// Total number of extracted items
    pub fn item_count(&self) -> usize {
        ItemKind::ALL.iter().map(|k| self.items(*k).len()).sum()
    }

    /// True when nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0 && self.metrics.is_empty()
    }

    /// Cortex-ready entries: every item, decisions first, then action
    /// items, learnings, problems and solutions
    pub fn cortex_entries(&self) -> Vec<CortexEntry> {
        ItemKind::ALL
            .iter()
            .flat_map(|kind| self.items(*kind).iter().map(CortexEntry::from))
            .collect()
    }

    /// Structured view with plain text lists
    pub fn to_structured(&self) -> StructuredSummary {
        let texts = |kind| {
            self.items(kind)
                .iter()
                .map(|i| i.text.clone())
                .collect::<Vec<_>>()
        };
        StructuredSummary {
            date: self.date.clone(),
            key_decisions: texts(ItemKind::Decision),
            action_items: texts(ItemKind::ActionItem),
            insights: texts(ItemKind::Learning),
            problems: texts(ItemKind::Problem),
            solutions: texts(ItemKind::Solution),
            metrics: self.metrics.clone(),
            cortex_entries: self.cortex_entries(),
        }
    }
}

/// Serializable summary object for json/yaml output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredSummary {
    pub date: String,
    pub key_decisions: Vec<String>,
    pub action_items: Vec<String>,
    pub insights: Vec<String>,
    pub problems: Vec<String>,
    #[serde(default)]
    pub solutions: Vec<String>,
    pub metrics: MetricMap,
    pub cortex_entries: Vec<CortexEntry>,
}

/// One record of the entry stream consumed by Cortex
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CortexEntry {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub content: String,
    pub category: Category,
    pub importance: f32,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
}

impl From<&ExtractedItem> for CortexEntry {
    fn from(item: &ExtractedItem) -> Self {
        Self {
            kind: item.kind,
            content: item.text.clone(),
            category: item.category,
            importance: item.importance,
            date: item.date,
            context: item.context.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::metrics::MetricSample;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn insights(day: &str, items: &[(ItemKind, &str)], metrics: &[(&str, f64)]) -> DocumentInsights {
        DocumentInsights {
            date: date(day),
            items: items
                .iter()
                .map(|(k, t)| ExtractedItem::new(*k, *t, "", date(day)))
                .collect(),
            metrics: metrics
                .iter()
                .map(|(n, v)| MetricSample {
                    name: n.to_string(),
                    value: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_date_labels() {
        let d1 = date("2025-02-01");
        let d3 = date("2025-02-03");
        assert_eq!(ConversationSummary::for_dates(Some(d1), Some(d1)).date, "2025-02-01");
        assert_eq!(
            ConversationSummary::for_dates(Some(d1), Some(d3)).date,
            "2025-02-01..2025-02-03"
        );
        assert_eq!(ConversationSummary::for_dates(None, None).date, "");
    }

    #[test]
    fn test_absorb_partitions_and_overwrites_metrics() {
        let mut summary = ConversationSummary::for_dates(Some(date("2025-02-01")), None);
        summary.absorb(insights(
            "2025-02-01",
            &[(ItemKind::Decision, "hold eth"), (ItemKind::Problem, "api down")],
            &[("pnl", 10.0), ("trades", 4.0)],
        ));
        summary.absorb(insights(
            "2025-02-02",
            &[(ItemKind::Decision, "sell eth")],
            &[("pnl", 20.0)],
        ));

        let decisions: Vec<_> = summary.key_decisions.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(decisions, vec!["hold eth", "sell eth"]);
        assert_eq!(summary.problems.len(), 1);
        assert_eq!(summary.metrics["pnl"], 20.0);
        assert_eq!(summary.metrics["trades"], 4.0);
        assert_eq!(summary.item_count(), 3);
    }

    #[test]
    fn test_cortex_entries_order() {
        let mut summary = ConversationSummary::default();
        summary.absorb(insights(
            "2025-02-01",
            &[
                (ItemKind::Learning, "read the docs"),
                (ItemKind::ActionItem, "file taxes"),
                (ItemKind::Decision, "take a break"),
            ],
            &[],
        ));
        let kinds: Vec<_> = summary.cortex_entries().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![ItemKind::Decision, ItemKind::ActionItem, ItemKind::Learning]
        );
    }

    #[test]
    fn test_cortex_entry_wire_shape() {
        let item = ExtractedItem::new(ItemKind::Decision, "buy btc", "", date("2025-02-01"));
        let json = serde_json::to_value(CortexEntry::from(&item)).unwrap();
        assert_eq!(json["type"], "decision");
        assert_eq!(json["content"], "buy btc");
        assert_eq!(json["category"], "trading");
        assert_eq!(json["importance"], 2.5);
        assert_eq!(json["date"], "2025-02-01");
        assert!(json.get("context").is_none());
    }

    #[test]
    fn test_empty_summary() {
        let summary = ConversationSummary::for_dates(Some(date("2025-02-01")), None);
        assert!(summary.is_empty());
        let structured = summary.to_structured();
        assert!(structured.key_decisions.is_empty());
        assert!(structured.metrics.is_empty());
        assert!(structured.cortex_entries.is_empty());
    }
}
