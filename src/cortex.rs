//! Append-only hand-off of entries to the Cortex memory store
//!
//! The summarizer never reads from or manages the store. It only appends
//! records and receives an acknowledgment for each one.

use crate::error::{Error, Result};
use crate::memory::CortexEntry;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Acknowledgment for one appended record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ack {
    /// 1-based position of the record among those written by this sink
    pub sequence: u64,
}

/// Write side of the Cortex store
pub trait CortexSink {
    /// Append one record
    fn append(&mut self, entry: &CortexEntry) -> Result<Ack>;

    /// Append records in order, returning the last acknowledgment
    fn append_all(&mut self, entries: &[CortexEntry]) -> Result<Option<Ack>> {
        let mut last = None;
        for entry in entries {
            last = Some(self.append(entry)?);
        }
        Ok(last)
    }
}

/// Cortex sink appending one JSON object per line to a file
pub struct JsonlSink {
    path: PathBuf,
    file: Option<File>,
    written: u64,
}

impl JsonlSink {
    /// Create a sink; the file is opened on first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn file(&mut self) -> Result<&mut File> {
        if self.file.is_none() {
            if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|e| {
                    Error::Sink(format!("Failed to open {}: {}", self.path.display(), e))
                })?;
            self.file = Some(file);
        }
        self.file
            .as_mut()
            .ok_or_else(|| Error::Sink("sink file not open".to_string()))
    }
}

impl CortexSink for JsonlSink {
    fn append(&mut self, entry: &CortexEntry) -> Result<Ack> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let file = self.file()?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        self.written += 1;
        Ok(Ack {
            sequence: self.written,
        })
    }
}
