//! Extracted item data types
//!
//! An `ExtractedItem` is one classified span of a memory document: the
//! trimmed text that followed a trigger phrase, tagged with the family it
//! was found by, a Cortex category and an importance score.

use super::rules::{categorize_insight, score_importance};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The pattern family an item was extracted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Something the author decided or committed to
    Decision,
    /// A follow-up task
    ActionItem,
    /// A lesson or realization
    Learning,
    /// An issue, bug or failure
    Problem,
    /// A fix listed under "Fixes Applied"
    Solution,
}

impl ItemKind {
    /// All kinds, in the order they appear in summaries and entry streams
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Decision,
        ItemKind::ActionItem,
        ItemKind::Learning,
        ItemKind::Problem,
        ItemKind::Solution,
    ];

    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Decision => "decision",
            ItemKind::ActionItem => "action_item",
            ItemKind::Learning => "learning",
            ItemKind::Problem => "problem",
            ItemKind::Solution => "solution",
        }
    }

    /// Importance used when the text carries no tier keyword
    pub fn default_importance(&self) -> f32 {
        match self {
            ItemKind::Decision => 2.5,
            _ => 2.0,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cortex storage category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Trading,
    Moltbook,
    Coding,
    Learning,
    Goals,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trading => "trading",
            Category::Moltbook => "moltbook",
            Category::Coding => "coding",
            Category::Learning => "learning",
            Category::Goals => "goals",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified unit of text pulled from a memory document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Family that produced the item
    pub kind: ItemKind,
    /// Trimmed matched clause
    pub text: String,
    /// Category derived from `text` and `kind`
    pub category: Category,
    /// Importance (1.5, 2.0, 2.5 or 3.0)
    pub importance: f32,
    /// Leading slice of the document section associated with the kind
    pub context: String,
    /// Date of the source document
    pub date: NaiveDate,
}

impl ExtractedItem {
    /// Classify `text` and build an item.
    ///
    /// Category and importance are computed here and nowhere else, so they
    /// depend only on `text` and `kind`.
    pub fn new(
        kind: ItemKind,
        text: impl Into<String>,
        context: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        let text = text.into();
        let category = match kind {
            ItemKind::Learning => Category::Learning,
            _ => categorize_insight(&text),
        };
        let importance = score_importance(&text, kind);
        Self {
            kind,
            text,
            category,
            importance,
            context: context.into(),
            date,
        }
    }
}
