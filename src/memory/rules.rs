//! Ordered keyword tables for categorization and importance scoring
//!
//! Both tables are evaluated top to bottom against the lower-cased item
//! text; the first row with a keyword contained in the text wins.

use super::item::{Category, ItemKind};

/// Category rules, in priority order
const CATEGORY_RULES: &[(&[&str], Category)] = &[
    (
        &["market", "bot", "eth", "btc", "portfolio", "trade", "price"],
        Category::Trading,
    ),
    (&["post", "karma", "thread", "molt"], Category::Moltbook),
    (
        &["code", "bug", "pr", "commit", "repo", "test"],
        Category::Coding,
    ),
    (
        &["lesson", "pattern", "mistake", "learn", "realiz"],
        Category::Learning,
    ),
    (&["milestone", "progress", "goal"], Category::Goals),
];

/// Importance tiers, highest first
const IMPORTANCE_TIERS: &[(&[&str], f32)] = &[
    (&["critical", "urgent", "breakthrough", "milestone"], 3.0),
    (&["important", "significant", "major"], 2.5),
    (&["minor", "trivial"], 1.5),
];

fn first_match<T: Copy>(table: &[(&[&str], T)], text: &str) -> Option<T> {
    let lower = text.to_lowercase();
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, result)| *result)
}

/// Determine the Cortex category for a piece of text.
pub fn categorize_insight(text: &str) -> Category {
    first_match(CATEGORY_RULES, text).unwrap_or(Category::General)
}

/// Score importance on the 1.5–3.0 scale.
///
/// Tier keywords take precedence; text without any falls back to the
/// kind's default (2.5 for decisions, 2.0 otherwise).
pub fn score_importance(text: &str, kind: ItemKind) -> f32 {
    first_match(IMPORTANCE_TIERS, text).unwrap_or_else(|| kind.default_importance())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_each_rule() {
        assert_eq!(categorize_insight("Check BTC price"), Category::Trading);
        assert_eq!(categorize_insight("reply in the thread"), Category::Moltbook);
        assert_eq!(categorize_insight("merge the PR"), Category::Coding);
        assert_eq!(categorize_insight("a recurring mistake"), Category::Learning);
        assert_eq!(categorize_insight("weekly goal review"), Category::Goals);
        assert_eq!(categorize_insight("call mom"), Category::General);
    }

    #[test]
    fn test_categorize_first_rule_wins() {
        // "trade" (trading) and "commit" (coding) both present
        assert_eq!(
            categorize_insight("commit the trade logger"),
            Category::Trading
        );
        // "karma" (moltbook) beats "learn" (learning)
        assert_eq!(categorize_insight("learn how karma works"), Category::Moltbook);
    }

    #[test]
    fn test_categorize_is_case_insensitive() {
        assert_eq!(categorize_insight("MARKET open"), Category::Trading);
    }

    #[test]
    fn test_importance_tiers() {
        assert_eq!(score_importance("critical fix", ItemKind::ActionItem), 3.0);
        assert_eq!(score_importance("a major change", ItemKind::ActionItem), 2.5);
        assert_eq!(score_importance("minor cleanup", ItemKind::ActionItem), 1.5);
        assert_eq!(score_importance("cleanup", ItemKind::ActionItem), 2.0);
    }

    #[test]
    fn test_importance_highest_tier_wins() {
        assert_eq!(
            score_importance("urgent but minor", ItemKind::Problem),
            3.0
        );
        assert_eq!(
            score_importance("important, if trivial", ItemKind::Learning),
            2.5
        );
    }

    #[test]
    fn test_importance_kind_defaults() {
        assert_eq!(score_importance("use limit orders", ItemKind::Decision), 2.5);
        assert_eq!(score_importance("use limit orders", ItemKind::Learning), 2.0);
        assert_eq!(score_importance("minor tweak", ItemKind::Decision), 1.5);
    }
}
