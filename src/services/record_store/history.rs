use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use strum::{AsRefStr, Display, EnumString};

use crate::error::{DictError, DictResult};
use crate::model::entry::{timestamp_now, Entry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Action {
    Add,
    Edit,
    Remove,
}

/// One audit line. Written once, never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub timestamp: String,
    pub action: Action,
    pub word: String,
    pub language_pair: String,
    pub user: String,
}

impl HistoryRecord {
    pub fn new(action: Action, entry: &Entry, user: &str) -> Self {
        Self {
            timestamp: timestamp_now(),
            action,
            word: entry.word.clone(),
            language_pair: entry.language_pair(),
            user: user.to_string(),
        }
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | user: {}",
            self.timestamp, self.action, self.word, self.language_pair, self.user
        )
    }
}

/// Append-only history file kept next to the dictionary.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
    user: String,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>, user: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            user: user.into(),
        }
    }

    pub fn append(&self, action: Action, entry: &Entry) -> DictResult<HistoryRecord> {
        let record = HistoryRecord::new(action, entry, &self.user);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| DictError::file(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DictError::file(&self.path, e))?;
        writeln!(file, "{record}").map_err(|e| DictError::file(&self.path, e))?;

        tracing::debug!(action = %action, word = %entry.word, "recorded history line");
        Ok(record)
    }

    /// All recorded lines, oldest first. A missing file means no history yet.
    pub fn read(&self) -> DictResult<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| DictError::file(&self.path, e))?;
        Ok(text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }
}
