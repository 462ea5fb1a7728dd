use encoding_rs::UTF_8;
use strum::{Display, EnumString};

use crate::model::entry::Entry;

const DELIMITER: char = '\t';

/// Line layout of the backing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Layout {
    /// `word, src_lang, target_lang, translation, timestamp`
    #[default]
    Full,
    /// `word, target_lang, translation`
    Compact,
}

impl Layout {
    pub fn field_count(self) -> usize {
        match self {
            Layout::Full => 5,
            Layout::Compact => 3,
        }
    }
}

/// A line that was not loaded because its field count did not match the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSkipped {
    pub line_number: usize,
    pub field_count: usize,
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub entries: Vec<Entry>,
    pub skipped: Vec<ParseSkipped>,
}

#[derive(Debug, Clone)]
pub struct Codec {
    layout: Layout,
    /// Source language assigned to compact lines, which do not store one.
    compact_source_lang: String,
}

impl Codec {
    pub fn new(layout: Layout, compact_source_lang: impl Into<String>) -> Self {
        Self {
            layout,
            compact_source_lang: compact_source_lang.into(),
        }
    }

    #[cfg(test)]
    pub fn full() -> Self {
        Self::new(Layout::Full, "pt")
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The source language every entry gets in this layout, if the layout fixes one.
    pub fn fixed_source_lang(&self) -> Option<&str> {
        match self.layout {
            Layout::Full => None,
            Layout::Compact => Some(&self.compact_source_lang),
        }
    }

    /// Drops what the layout cannot store, so the entry in memory equals the
    /// one a reload of its line yields.
    pub fn conform(&self, entry: &mut Entry) {
        if let Some(src) = self.fixed_source_lang() {
            entry.src_lang = src.to_string();
            entry.timestamp.clear();
        }
    }

    pub fn decode(&self, bytes: &[u8]) -> Decoded {
        let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
        if had_errors {
            tracing::warn!("backing file contains invalid UTF-8, replaced undecodable bytes");
        }

        let mut decoded = Decoded::default();

        for (i, line) in text.lines().enumerate() {
            let logical = line.trim();
            if logical.is_empty() {
                continue;
            }

            match self.parse_line(logical) {
                Ok(entry) => decoded.entries.push(entry),
                Err(field_count) => decoded.skipped.push(ParseSkipped {
                    line_number: i + 1,
                    field_count,
                }),
            }
        }

        decoded
    }

    /// Parses one trimmed line. On a field-count mismatch the count found is returned.
    pub fn parse_line(&self, line: &str) -> Result<Entry, usize> {
        let parts: Vec<&str> = line.split(DELIMITER).collect();
        if parts.len() != self.layout.field_count() {
            return Err(parts.len());
        }

        let entry = match self.layout {
            Layout::Full => Entry {
                word: parts[0].to_string(),
                src_lang: parts[1].to_string(),
                target_lang: parts[2].to_string(),
                translation: parts[3].to_string(),
                timestamp: parts[4].to_string(),
            },
            Layout::Compact => Entry {
                word: parts[0].to_string(),
                src_lang: self.compact_source_lang.clone(),
                target_lang: parts[1].to_string(),
                translation: parts[2].to_string(),
                timestamp: String::new(),
            },
        };

        Ok(entry)
    }

    pub fn format_line(&self, entry: &Entry) -> String {
        let fields: Vec<&str> = match self.layout {
            Layout::Full => vec![
                entry.word.as_str(),
                entry.src_lang.as_str(),
                entry.target_lang.as_str(),
                entry.translation.as_str(),
                entry.timestamp.as_str(),
            ],
            Layout::Compact => vec![
                entry.word.as_str(),
                entry.target_lang.as_str(),
                entry.translation.as_str(),
            ],
        };

        let mut line = fields.join("\t");
        line.push('\n');
        line
    }

    pub fn encode(&self, entries: &[Entry]) -> String {
        entries.iter().map(|e| self.format_line(e)).collect()
    }
}
