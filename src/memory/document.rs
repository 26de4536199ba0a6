//! Daily memory documents and the workspace store they live in
//!
//! Directory layout:
//! ```text
//! ~/.openclaw/workspace/
//! └── memory/
//!     ├── 2025-02-01.md
//!     ├── 2025-02-02.md
//!     └── ...
//! ```

use crate::error::{Error, Result};
use chrono::{Days, NaiveDate};
use std::path::{Path, PathBuf};

/// Date format used for memory file names and summary labels
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day's free-text memory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryDocument {
    /// Calendar day the document covers
    pub date: NaiveDate,
    /// Unstructured document body
    pub raw_text: String,
}

impl MemoryDocument {
    pub fn new(date: NaiveDate, raw_text: impl Into<String>) -> Self {
        Self {
            date,
            raw_text: raw_text.into(),
        }
    }

    /// A document with no content, standing in for a missing file
    pub fn empty(date: NaiveDate) -> Self {
        Self::new(date, String::new())
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.trim().is_empty()
    }

    /// Body of the `## <name>` markdown section, if present.
    ///
    /// Heading comparison ignores case and any leading emoji or symbols, so
    /// `## 🔧 Fixes Applied` matches `"Fixes Applied"`. The section runs
    /// until the next `##` heading.
    pub fn section(&self, name: &str) -> Option<String> {
        let mut lines = self.raw_text.lines();

        lines.by_ref().find(|line| {
            heading_title(line).is_some_and(|title| title.eq_ignore_ascii_case(name))
        })?;

        let body: Vec<&str> = lines
            .take_while(|line| !line.trim_start().starts_with("##"))
            .collect();
        let body = body.join("\n");
        let body = body.trim();

        if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    }
}

/// Title of a `##`-level (or deeper) heading with decoration removed
fn heading_title(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with("##") {
        return None;
    }
    let title = trimmed
        .trim_start_matches('#')
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end();
    Some(title)
}

/// Resolves dates to memory files inside a workspace
#[derive(Debug, Clone)]
pub struct DocumentStore {
    memory_dir: PathBuf,
    extension: String,
}

impl DocumentStore {
    /// Create a store reading `<memory_dir>/<YYYY-MM-DD>.<extension>`
    pub fn new(memory_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            memory_dir: memory_dir.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn memory_dir(&self) -> &Path {
        &self.memory_dir
    }

    /// Path of the document for `date`
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.memory_dir
            .join(format!("{}.{}", date.format(DATE_FORMAT), self.extension))
    }

    /// Load the document for `date`, or `None` if no file exists.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn load(&self, date: NaiveDate) -> Result<Option<MemoryDocument>> {
        let path = self.path_for(date);
        match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::debug!("Loaded {} ({} bytes)", path.display(), bytes.len());
                let text = String::from_utf8_lossy(&bytes).into_owned();
                Ok(Some(MemoryDocument::new(date, text)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No memory file at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load the document for `date`, treating a missing file as empty
    pub fn load_or_empty(&self, date: NaiveDate) -> Result<MemoryDocument> {
        Ok(self
            .load(date)?
            .unwrap_or_else(|| MemoryDocument::empty(date)))
    }

    /// Load the document for `date`, failing with `NotFound` if absent
    pub fn require(&self, date: NaiveDate) -> Result<MemoryDocument> {
        self.load(date)?.ok_or_else(|| {
            Error::NotFound(format!(
                "No memory file found for {}",
                date.format(DATE_FORMAT)
            ))
        })
    }

    /// Load `days` consecutive documents ending at `end`, oldest first.
    ///
    /// With `strict` unset, missing days become empty documents.
    pub fn load_range(&self, end: NaiveDate, days: u32, strict: bool) -> Result<Vec<MemoryDocument>> {
        let days = days.max(1);
        let start = end
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| {
                Error::InvalidRange(format!(
                    "{} days ending {} starts before the earliest supported date",
                    days,
                    end.format(DATE_FORMAT)
                ))
            })?;

        start
            .iter_days()
            .take(days as usize)
            .map(|date| {
                if strict {
                    self.require(date)
                } else {
                    self.load_or_empty(date)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    const SAMPLE: &str = "# 2025-02-01\n\n## Summary\nQuiet day of trading.\nNothing broke.\n\n## 🔧 Fixes Applied\n- ✅ Restarted the bot\n- Patched the RSI filter\n\n### Notes\nfree text\n";

    #[test]
    fn test_section_found() {
        let doc = MemoryDocument::new(date("2025-02-01"), SAMPLE);
        assert_eq!(
            doc.section("Summary").as_deref(),
            Some("Quiet day of trading.\nNothing broke.")
        );
    }

    #[test]
    fn test_section_ignores_emoji_and_case() {
        let doc = MemoryDocument::new(date("2025-02-01"), SAMPLE);
        let fixes = doc.section("fixes applied").unwrap();
        assert_eq!(fixes, "- ✅ Restarted the bot\n- Patched the RSI filter");
    }

    #[test]
    fn test_section_missing_or_empty() {
        let doc = MemoryDocument::new(date("2025-02-01"), SAMPLE);
        assert!(doc.section("Tomorrow").is_none());

        let doc = MemoryDocument::new(date("2025-02-01"), "## Summary\n\n## Tomorrow\nrest");
        assert!(doc.section("Summary").is_none());
        assert_eq!(doc.section("Tomorrow").as_deref(), Some("rest"));
    }

    #[test]
    fn test_store_load_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), "md");
        std::fs::write(dir.path().join("2025-02-01.md"), "decided to rest").unwrap();

        let doc = store.load(date("2025-02-01")).unwrap().unwrap();
        assert_eq!(doc.raw_text, "decided to rest");

        assert!(store.load(date("2025-02-02")).unwrap().is_none());
        assert!(store.load_or_empty(date("2025-02-02")).unwrap().is_empty());
    }

    #[test]
    fn test_store_require_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), ".md");
        let err = store.require(date("2025-02-03")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("2025-02-03"));
    }

    #[test]
    fn test_store_load_range_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), "md");
        std::fs::write(dir.path().join("2025-02-28.md"), "feb").unwrap();
        std::fs::write(dir.path().join("2025-03-02.md"), "mar").unwrap();

        let docs = store.load_range(date("2025-03-02"), 3, false).unwrap();
        let dates: Vec<_> = docs.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date("2025-02-28"), date("2025-03-01"), date("2025-03-02")]
        );
        assert_eq!(docs[0].raw_text, "feb");
        assert!(docs[1].is_empty());

        assert!(store.load_range(date("2025-03-02"), 3, true).is_err());
    }

    #[test]
    fn test_store_load_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), "md");
        std::fs::write(dir.path().join("2025-02-01.md"), b"Lesson: \xff\xfe keep going").unwrap();

        let doc = store.load(date("2025-02-01")).unwrap().unwrap();
        assert_eq!(doc.raw_text, "Lesson: \u{FFFD}\u{FFFD} keep going");
    }

    #[test]
    fn test_store_load_range_before_earliest_date() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), "md");

        let err = store.load_range(NaiveDate::MIN, 2, false).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
        assert!(err.to_string().starts_with("Invalid date range: 2 days"));
    }

    #[test]
    fn test_path_for() {
        let store = DocumentStore::new("/ws/memory", "md");
        assert_eq!(
            store.path_for(date("2025-02-01")),
            PathBuf::from("/ws/memory/2025-02-01.md")
        );
    }
}
