//! Numeric metric extraction
//!
//! Metrics are keyed by a canonical name inferred from the keyword next to
//! the number (`win rate`, `P/L`, `trades`, `commits`). Samples are
//! reported in document order so that folding them into a map gives
//! last-value-wins semantics.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric name → value, last value wins
pub type MetricMap = BTreeMap<String, f64>;

/// A `(name, value)` pair pulled from text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
}

/// Canonical metric rules: name and pattern whose first group is the literal
const METRIC_RULES: &[(&str, &str)] = &[
    ("win_rate", r"(?i)\bwin[ _-]?rate[:= \t]*(\d+(?:\.\d+)?)[ \t]*%?"),
    ("pnl", r"(?i)(?:\bp/l|\bp&l|\bpnl)[:= \t]*([+-]?\$?\d[\d,.]*)"),
    ("trades", r"(?i)\btrades[:= \t]+(\d[\d,]*)"),
    ("trades", r"(?i)\b(\d[\d,]*)[ \t]*trades\b"),
    ("commits", r"(?i)\bcommits[:= \t]+(\d[\d,]*)"),
    ("commits", r"(?i)\b(\d[\d,]*)[ \t]*commits\b"),
];

struct MetricRule {
    name: &'static str,
    pattern: Regex,
}

/// Extracts metric samples from free text
pub struct MetricExtractor {
    rules: Vec<MetricRule>,
}

impl MetricExtractor {
    /// Compile the canonical metric rules
    pub fn new() -> Result<Self> {
        let rules = METRIC_RULES
            .iter()
            .map(|(name, pattern)| {
                let pattern = Regex::new(pattern).map_err(|e| {
                    Error::Pattern(format!("Invalid metric pattern for '{}': {}", name, e))
                })?;
                Ok(MetricRule {
                    name: *name,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Extract every parseable sample, ordered by position in `text`.
    ///
    /// Literals that fail to parse are dropped.
    pub fn samples(&self, text: &str) -> Vec<MetricSample> {
        let mut found: Vec<(usize, &'static str, f64)> = Vec::new();

        for rule in &self.rules {
            for caps in rule.pattern.captures_iter(text) {
                let Some(literal) = caps.get(1) else {
                    continue;
                };
                match parse_literal(literal.as_str()) {
                    Some(value) => found.push((literal.start(), rule.name, value)),
                    None => tracing::debug!(
                        "Dropping malformed {} literal '{}'",
                        rule.name,
                        literal.as_str()
                    ),
                }
            }
        }

        found.sort_by_key(|(pos, _, _)| *pos);
        found
            .into_iter()
            .map(|(_, name, value)| MetricSample {
                name: name.to_string(),
                value,
            })
            .collect()
    }
}

/// Parse a numeric literal, stripping currency, percent, thousands
/// separators and a trailing sentence period.
fn parse_literal(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_end_matches('.')
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ','))
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
