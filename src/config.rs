//! Summarizer configuration management

use crate::error::{Error, Result};
use crate::format::OutputFormat;
use crate::memory::item::ItemKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main summarizer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Where memory documents live
    pub workspace: WorkspaceConfig,

    /// Trigger tables and limits for the extractor
    pub extraction: ExtractionConfig,

    /// Output defaults
    pub output: OutputConfig,
}

impl SummarizerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text; missing keys take defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Workspace configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Workspace root directory
    pub root: PathBuf,

    /// Subdirectory holding daily memory files
    pub memory_dir: String,

    /// Memory file extension
    pub extension: String,
}

impl WorkspaceConfig {
    /// Full path of the memory directory
    pub fn memory_path(&self) -> PathBuf {
        self.root.join(&self.memory_dir)
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: default_workspace_root(),
            memory_dir: "memory".to_string(),
            extension: "md".to_string(),
        }
    }
}

/// Default workspace (~/.openclaw/workspace)
pub fn default_workspace_root() -> PathBuf {
    dirs_next::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".openclaw")
        .join("workspace")
}

/// Extraction configuration
///
/// Triggers are regular expression fragments matched case-insensitively at
/// a word boundary. Whatever follows a trigger up to the end of the
/// sentence becomes the item text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Decision triggers
    pub decision_triggers: Vec<String>,

    /// Action item triggers
    pub action_triggers: Vec<String>,

    /// Learning triggers
    pub learning_triggers: Vec<String>,

    /// Problem triggers
    pub problem_triggers: Vec<String>,

    /// Section headings whose lines are solutions
    pub solution_sections: Vec<String>,

    /// Maximum characters of section context attached to each item
    pub context_chars: usize,

    /// Per-document caps on extracted items
    pub limits: ItemLimits,
}

impl ExtractionConfig {
    /// Trigger list for a pattern family (solutions have none)
    pub fn triggers(&self, kind: ItemKind) -> &[String] {
        match kind {
            ItemKind::Decision => &self.decision_triggers,
            ItemKind::ActionItem => &self.action_triggers,
            ItemKind::Learning => &self.learning_triggers,
            ItemKind::Problem => &self.problem_triggers,
            ItemKind::Solution => &[],
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            decision_triggers: strings(&[
                r"decided[ \t]+to[ \t]+",
                r"going[ \t]+to[ \t]+",
                r"will[ \t]+",
                r"chose[ \t]+to[ \t]+",
                r"switching[ \t]+to[ \t]+",
            ]),
            action_triggers: strings(&[
                r"todo[: \t]+",
                r"need[ \t]+to[ \t]+",
                r"must[ \t]+",
                r"should[ \t]+",
                r"tomorrow[: \t]+",
                r"pending[: \t]+",
            ]),
            learning_triggers: strings(&[
                r"learned[: \t]+(?:that[ \t]+)?",
                r"lesson[: \t]+",
                r"insight[: \t]+",
                r"realized[: \t]+(?:that[ \t]+)?",
                r"discovered[: \t]+(?:that[ \t]+)?",
            ]),
            problem_triggers: strings(&[
                r"issue[: \t]+",
                r"problem[: \t]+",
                r"bug[: \t]+",
                r"error[: \t]+",
                r"failed[ \t]+",
                r"broken[ \t]+",
            ]),
            solution_sections: strings(&["Fixes Applied"]),
            context_chars: 200,
            limits: ItemLimits::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Optional per-kind caps; `None` keeps every item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemLimits {
    pub decisions: Option<usize>,
    pub action_items: Option<usize>,
    pub insights: Option<usize>,
    pub problems: Option<usize>,
    pub solutions: Option<usize>,
}

impl ItemLimits {
    pub fn get(&self, kind: ItemKind) -> Option<usize> {
        match kind {
            ItemKind::Decision => self.decisions,
            ItemKind::ActionItem => self.action_items,
            ItemKind::Learning => self.insights,
            ItemKind::Problem => self.problems,
            ItemKind::Solution => self.solutions,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when `--format` is not given
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SummarizerConfig::default();
        assert_eq!(config.workspace.memory_dir, "memory");
        assert_eq!(config.workspace.extension, "md");
        assert!(config.workspace.root.ends_with(".openclaw/workspace"));
        assert_eq!(config.extraction.context_chars, 200);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert_eq!(config.extraction.limits, ItemLimits::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SummarizerConfig::from_toml(
            r#"
            [workspace]
            root = "/tmp/ws"

            [extraction.limits]
            decisions = 5

            [output]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.workspace.memory_path(), PathBuf::from("/tmp/ws/memory"));
        assert_eq!(config.extraction.limits.get(ItemKind::Decision), Some(5));
        assert_eq!(config.extraction.limits.get(ItemKind::ActionItem), None);
        assert_eq!(config.extraction.decision_triggers.len(), 5);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SummarizerConfig::from_toml("workspace = 3").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_config_roundtrip_toml() {
        let config = SummarizerConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = SummarizerConfig::from_toml(&text).unwrap();
        assert_eq!(back.extraction.problem_triggers, config.extraction.problem_triggers);
    }

    #[test]
    fn test_triggers_per_kind() {
        let config = ExtractionConfig::default();
        assert_eq!(config.triggers(ItemKind::ActionItem).len(), 6);
        assert!(config.triggers(ItemKind::Solution).is_empty());
    }
}
