use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::codec::{Codec, Decoded, ParseSkipped};
use super::history::{Action, HistoryLog};
use super::search::{self, SearchField};
use crate::error::{DictError, DictResult};
use crate::model::entry::Entry;
use crate::model::language::Language;
use crate::services::prompt::UserPrompt;

/// Dictionary entries backed by a tab-delimited text file.
///
/// The whole file is read on open and held in memory. Mutations rewrite the
/// file, except a plain add, which appends one line. Nothing here locks the
/// file; two processes writing the same notebook race and the last one wins.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    codec: Codec,
    history: HistoryLog,
    entries: Vec<Entry>,
    skipped: Vec<ParseSkipped>,
}

impl RecordStore {
    pub fn open(path: impl Into<PathBuf>, codec: Codec, history: HistoryLog) -> DictResult<Self> {
        let path = path.into();
        let Decoded { entries, skipped } = load(&path, &codec)?;

        Ok(Self {
            path,
            codec,
            history,
            entries,
            skipped,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Lines dropped by the last load because their field count was wrong.
    pub fn skipped(&self) -> &[ParseSkipped] {
        &self.skipped
    }

    /// The source language every entry gets, when the layout does not store one.
    pub fn fixed_source_lang(&self) -> Option<&str> {
        self.codec.fixed_source_lang()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn save(&self) -> DictResult<()> {
        save(&self.path, &self.codec, &self.entries)
    }

    /// Adds `entry`, asking before it replaces one with the same natural key.
    /// Returns `false` when the user declines the overwrite.
    ///
    /// In the compact layout the entry takes the layout's source language
    /// before the key is compared, since that is what a reload would give it.
    pub fn add(&mut self, mut entry: Entry, prompt: &mut dyn UserPrompt) -> DictResult<bool> {
        entry.validate()?;
        entry.touch();
        self.codec.conform(&mut entry);

        let duplicate = search::find_key(&self.entries, entry.key());
        if let Some(index) = duplicate {
            let question = format!(
                "Duplicate entry found:\n{}\nOverwrite it?",
                self.entries[index].display()
            );
            if !prompt.ask_yes_no(&question)? {
                tracing::debug!(word = %entry.word, "overwrite declined");
                return Ok(false);
            }
            self.entries.remove(index);
        }

        self.entries.push(entry);

        let added = &self.entries[self.entries.len() - 1];
        if duplicate.is_some() {
            self.save()?;
        } else {
            self.append(added)?;
        }
        self.history.append(Action::Add, added)?;

        tracing::info!(word = %added.word, pair = %added.language_pair(), replaced = duplicate.is_some(), "entry added");
        Ok(true)
    }

    /// Every entry whose word equals `word`, ignoring case.
    pub fn lookup(&self, word: &str) -> Vec<&Entry> {
        search::exact_word(&self.entries, word)
    }

    pub fn search(&self, term: &str, field: SearchField) -> Vec<&Entry> {
        search::search(&self.entries, term, field)
    }

    /// Edits the first entry whose word matches, ignoring case. Other entries
    /// with the same word are left alone, unlike [`RecordStore::remove`].
    /// Blank answers keep the current value. An edit that would give the entry
    /// the key of another one is rejected.
    pub fn edit(&mut self, word: &str, prompt: &mut dyn UserPrompt) -> DictResult<Option<Entry>> {
        let Some(index) = self.entries.iter().position(|e| e.word_matches(word)) else {
            return Ok(None);
        };

        let mut updated = self.entries[index].clone();

        let new_word = prompt.ask_text(&format!("New word (Enter keeps '{}')", updated.word))?;
        let new_src = prompt.ask_text(&format!(
            "New source language (Enter keeps '{}')",
            updated.src_lang
        ))?;
        let new_target = prompt.ask_text(&format!(
            "New target language (Enter keeps '{}')",
            updated.target_lang
        ))?;
        let new_translation = prompt.ask_text(&format!(
            "New translation (Enter keeps '{}')",
            updated.translation
        ))?;

        if !new_word.is_empty() {
            updated.word = new_word;
        }
        if !new_src.is_empty() {
            updated.src_lang = new_src.to_lowercase();
        }
        if !new_target.is_empty() {
            updated.target_lang = Language::parse_code(&new_target)?.to_string();
        }
        if !new_translation.is_empty() {
            updated.translation = new_translation;
        }
        updated.validate()?;
        updated.touch();
        self.codec.conform(&mut updated);

        let clash = self
            .entries
            .iter()
            .enumerate()
            .any(|(i, e)| i != index && e.key() == updated.key());
        if clash {
            return Err(DictError::invalid_input(format!(
                "an entry for '{}' ({}) already exists",
                updated.word,
                updated.language_pair()
            )));
        }

        self.entries[index] = updated.clone();
        self.save()?;
        self.history.append(Action::Edit, &updated)?;

        tracing::info!(word = %updated.word, "entry edited");
        Ok(Some(updated))
    }

    /// Removes every entry whose word matches, ignoring case. Returns how many went.
    pub fn remove(&mut self, word: &str) -> DictResult<usize> {
        let (removed, kept): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.word_matches(word));
        self.entries = kept;

        if removed.is_empty() {
            return Ok(0);
        }

        self.save()?;
        for entry in &removed {
            self.history.append(Action::Remove, entry)?;
        }

        tracing::info!(word, count = removed.len(), "entries removed");
        Ok(removed.len())
    }

    fn append(&self, entry: &Entry) -> DictResult<()> {
        ensure_parent(&self.path)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| DictError::file(&self.path, e))?;
        file.write_all(self.codec.format_line(entry).as_bytes())
            .map_err(|e| DictError::file(&self.path, e))?;

        Ok(())
    }
}

/// Reads the backing file. A missing file is an empty dictionary.
pub fn load(path: &Path, codec: &Codec) -> DictResult<Decoded> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no dictionary file yet, starting empty");
        return Ok(Decoded::default());
    }

    let bytes = fs::read(path).map_err(|e| DictError::file(path, e))?;
    let decoded = codec.decode(&bytes);

    for skipped in &decoded.skipped {
        tracing::warn!(
            path = %path.display(),
            line = skipped.line_number,
            fields = skipped.field_count,
            expected = codec.layout().field_count(),
            "skipping malformed line"
        );
    }
    tracing::debug!(count = decoded.entries.len(), "loaded dictionary entries");

    Ok(decoded)
}

/// Rewrites the whole file. There is no temp file or rename, so a crash
/// mid-write can leave it truncated.
pub fn save(path: &Path, codec: &Codec, entries: &[Entry]) -> DictResult<()> {
    ensure_parent(path)?;
    fs::write(path, codec.encode(entries)).map_err(|e| DictError::file(path, e))?;
    tracing::debug!(count = entries.len(), path = %path.display(), "saved dictionary");
    Ok(())
}

fn ensure_parent(path: &Path) -> DictResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| DictError::file(parent, e))?;
        }
    }
    Ok(())
}
