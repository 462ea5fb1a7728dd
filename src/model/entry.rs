use chrono::Local;

use crate::error::{DictError, DictResult};

/// One dictionary record as stored in the backing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    pub src_lang: String,
    pub target_lang: String,
    pub translation: String,
    /// Kept as written so persisted values survive a load/save cycle unchanged.
    pub timestamp: String,
}

/// Natural key used for duplicate detection. Comparison is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey<'a> {
    pub word: &'a str,
    pub src_lang: &'a str,
    pub target_lang: &'a str,
}

impl Entry {
    /// Builds an unstamped entry from user input, trimming each field.
    pub fn new(
        word: impl AsRef<str>,
        src_lang: impl AsRef<str>,
        target_lang: impl AsRef<str>,
        translation: impl AsRef<str>,
    ) -> DictResult<Self> {
        let entry = Entry {
            word: word.as_ref().trim().to_string(),
            src_lang: src_lang.as_ref().trim().to_lowercase(),
            target_lang: target_lang.as_ref().trim().to_lowercase(),
            translation: translation.as_ref().trim().to_string(),
            timestamp: String::new(),
        };
        entry.validate()?;
        Ok(entry)
    }

    pub fn key(&self) -> EntryKey<'_> {
        EntryKey {
            word: &self.word,
            src_lang: &self.src_lang,
            target_lang: &self.target_lang,
        }
    }

    /// Exact, case-insensitive comparison used by lookup, edit and remove.
    pub fn word_matches(&self, word: &str) -> bool {
        self.word.to_lowercase() == word.trim().to_lowercase()
    }

    pub fn language_pair(&self) -> String {
        format!("{}-{}", self.src_lang, self.target_lang)
    }

    pub fn touch(&mut self) {
        self.timestamp = timestamp_now();
    }

    pub fn validate(&self) -> DictResult<()> {
        for (name, value) in [
            ("word", &self.word),
            ("source language", &self.src_lang),
            ("target language", &self.target_lang),
            ("translation", &self.translation),
        ] {
            if value.trim().is_empty() {
                return Err(DictError::invalid_input(format!("{name} must not be empty")));
            }
            if value.contains(['\t', '\n', '\r']) {
                return Err(DictError::invalid_input(format!(
                    "{name} must not contain tabs or line breaks"
                )));
            }
        }
        Ok(())
    }

    /// Multi-line rendering used by every console surface.
    pub fn display(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Word: {}\n", self.word));
        out.push_str(&format!("Translation: {}\n", self.translation));
        out.push_str(&format!("Languages: {} → {}\n", self.src_lang, self.target_lang));
        if !self.timestamp.is_empty() {
            out.push_str(&format!("Last updated: {}\n", self.timestamp));
        }
        out.push_str(&"-".repeat(50));
        out
    }

    /// One-line label used in selection lists.
    pub fn label(&self) -> String {
        format!("{} ({}→{})", self.word, self.src_lang, self.target_lang)
    }
}

/// Local time in ISO-8601 with microseconds, e.g. `2024-05-01T10:20:30.123456`.
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
