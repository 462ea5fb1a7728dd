use std::io::Write;

use super::menu_option::MenuOption;
use crate::error::{DictError, DictResult};
use crate::model::entry::Entry;
use crate::model::language::Language;
use crate::services::prompt::UserPrompt;
use crate::services::record_store::paging::{self, Navigation};
use crate::services::record_store::{RecordStore, SearchField};
use crate::services::translator::Translator;

/// Console flows over one open store. Both the numbered menu and the
/// subcommands go through here.
pub struct Session<'a, P, W> {
    store: &'a mut RecordStore,
    translator: &'a dyn Translator,
    prompt: P,
    out: W,
    page_size: usize,
}

impl<'a, P: UserPrompt, W: Write> Session<'a, P, W> {
    pub fn new(
        store: &'a mut RecordStore,
        translator: &'a dyn Translator,
        prompt: P,
        out: W,
        page_size: usize,
    ) -> Self {
        Self {
            store,
            translator,
            prompt,
            out,
            page_size,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (P, W) {
        (self.prompt, self.out)
    }

    /// Numbered menu loop. Ends on `0` or when input runs out.
    pub fn run_menu(&mut self) -> DictResult<()> {
        loop {
            writeln!(self.out, "\n{}", "=".repeat(40))?;
            writeln!(self.out, "OFFLINE DICTIONARY - MAIN MENU")?;
            for (key, label) in MenuOption::MENU {
                writeln!(self.out, "{key}. {label}")?;
            }

            let choice = self.prompt.ask_text("\nOption")?;
            if self.prompt.is_closed() && choice.is_empty() {
                tracing::debug!("input closed, leaving menu");
                return Ok(());
            }

            let result = match MenuOption::from(choice.as_str()) {
                MenuOption::Translate => self.translate_flow(),
                MenuOption::LookUp => self.look_up_flow(),
                MenuOption::Search => self.search_flow(),
                MenuOption::ListAll => self.list_flow(),
                MenuOption::Edit => self.edit_flow(),
                MenuOption::Remove => self.remove_flow(),
                MenuOption::History => self.show_history(),
                MenuOption::Quit => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
                MenuOption::Unknown => {
                    writeln!(self.out, "Invalid option!")?;
                    Ok(())
                }
            };
            self.report(result)?;
        }
    }

    /// Prints recoverable failures and carries on; anything else propagates.
    fn report(&mut self, result: DictResult<()>) -> DictResult<()> {
        match result {
            Err(e) if e.is_recoverable() => {
                writeln!(self.out, "Error: {e}")?;
                Ok(())
            }
            other => other,
        }
    }

    fn translate_flow(&mut self) -> DictResult<()> {
        let word = self
            .prompt
            .ask_text("\nEnter the word/expression (or 'exit')")?;
        if word.is_empty() || word.eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        let src = self.source_lang(&word, None)?;
        let target = Language::parse_code(&self.prompt.ask_text(&format!(
            "Target language ({})",
            Language::supported_codes()
        ))?)?;

        self.add_translation(&word, &src, target).map(|_| ())
    }

    /// Translates `word` and stores it. A missing source language is detected.
    pub fn translate_and_add(
        &mut self,
        word: &str,
        source: Option<&str>,
        target: Language,
    ) -> DictResult<bool> {
        let src = self.source_lang(word, source)?;
        self.add_translation(word, &src, target)
    }

    /// A layout that fixes the source language wins over detection and must
    /// agree with an explicit one.
    fn source_lang(&mut self, word: &str, given: Option<&str>) -> DictResult<String> {
        let given = given
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        match (self.store.fixed_source_lang().map(str::to_string), given) {
            (Some(fixed), Some(given)) if fixed != given => Err(DictError::invalid_input(format!(
                "this notebook only holds '{fixed}' words, got source language '{given}'"
            ))),
            (Some(fixed), _) => Ok(fixed),
            (None, Some(given)) => Ok(given),
            (None, None) => self.detect(word),
        }
    }

    fn detect(&mut self, word: &str) -> DictResult<String> {
        let src = self.translator.detect_language(word)?;
        writeln!(self.out, "Detected language: {src}")?;
        Ok(src)
    }

    fn add_translation(&mut self, word: &str, src: &str, target: Language) -> DictResult<bool> {
        let translation = self.translator.translate(word, src, target.as_ref())?;
        writeln!(self.out, "Translation of '{word}' to '{target}': {translation}")?;

        let entry = Entry::new(word, src, target.as_ref(), &translation)?;
        let added = self.store.add(entry, &mut self.prompt)?;

        if added {
            if let Some(stored) = self.store.entries().last() {
                writeln!(self.out, "\nNew entry added:\n{}", stored.display())?;
            }
        } else {
            writeln!(self.out, "Entry left unchanged.")?;
        }
        Ok(added)
    }

    fn look_up_flow(&mut self) -> DictResult<()> {
        let word = self.prompt.ask_text("Word to look up")?;
        if word.is_empty() {
            return Ok(());
        }

        let matches: Vec<Entry> = self.store.lookup(&word).into_iter().cloned().collect();
        match matches.len() {
            0 => writeln!(self.out, "No entry found for that word.")?,
            1 => writeln!(self.out, "{}", matches[0].display())?,
            _ => {
                let labels: Vec<String> = matches.iter().map(Entry::label).collect();
                if let Some(i) = self.prompt.ask_selection("\nSelect an entry", &labels)? {
                    writeln!(self.out, "{}", matches[i].display())?;
                }
            }
        }
        Ok(())
    }

    /// Prints every entry whose word matches exactly. Returns how many were shown.
    pub fn read(&mut self, word: &str) -> DictResult<usize> {
        let matches: Vec<Entry> = self.store.lookup(word).into_iter().cloned().collect();
        if matches.is_empty() {
            writeln!(self.out, "No entry found for that word.")?;
        }
        for entry in &matches {
            writeln!(self.out, "{}", entry.display())?;
        }
        Ok(matches.len())
    }

    fn search_flow(&mut self) -> DictResult<()> {
        let term = self.prompt.ask_text("Search term")?;
        if term.is_empty() {
            return Ok(());
        }

        let field = parse_field(
            &self
                .prompt
                .ask_text(&format!("Field to search ({})", SearchField::CHOICES))?,
        )?;

        let results: Vec<Entry> = self.store.search(&term, field).into_iter().cloned().collect();
        if results.is_empty() {
            writeln!(self.out, "No results found.")?;
            return Ok(());
        }
        self.page_through(&results)
    }

    /// Prints every match without paging. Returns how many matched.
    pub fn search(&mut self, term: &str, field: &str) -> DictResult<usize> {
        let field = parse_field(field)?;
        let results: Vec<Entry> = self.store.search(term, field).into_iter().cloned().collect();
        if results.is_empty() {
            writeln!(self.out, "No results found.")?;
        }
        for entry in &results {
            writeln!(self.out, "{}", entry.display())?;
        }
        Ok(results.len())
    }

    fn list_flow(&mut self) -> DictResult<()> {
        if self.store.is_empty() {
            writeln!(self.out, "No entries found.")?;
            return Ok(());
        }
        let entries = self.store.entries().to_vec();
        self.page_through(&entries)
    }

    /// Prints one page, or everything when `page` is `None`.
    pub fn list(&mut self, page: Option<usize>) -> DictResult<()> {
        let entries = self.store.entries().to_vec();
        if entries.is_empty() {
            writeln!(self.out, "No entries found.")?;
            return Ok(());
        }

        match page {
            Some(page) => self.print_page(&entries, page),
            None => {
                for entry in &entries {
                    writeln!(self.out, "{}", entry.display())?;
                }
                Ok(())
            }
        }
    }

    fn page_through(&mut self, entries: &[Entry]) -> DictResult<()> {
        let mut page = 1;
        loop {
            let total_pages = paging::paginate(entries, page, self.page_size).total_pages;
            self.print_page(entries, page)?;
            if total_pages <= 1 {
                return Ok(());
            }

            let nav = Navigation::from(self.prompt.ask_text("[N]ext, [P]revious, [Q]uit")?.as_str());
            match paging::step(page, total_pages, nav) {
                Some(next) => page = next,
                None => return Ok(()),
            }
        }
    }

    fn print_page(&mut self, entries: &[Entry], page: usize) -> DictResult<()> {
        let view = paging::paginate(entries, page, self.page_size);
        for (offset, entry) in view.items.iter().enumerate() {
            writeln!(self.out, "Entry #{}", view.first_index + offset + 1)?;
            writeln!(self.out, "{}", entry.display())?;
        }
        writeln!(self.out, "\nPage {}/{}", page.max(1), view.total_pages)?;
        Ok(())
    }

    fn edit_flow(&mut self) -> DictResult<()> {
        let word = self.prompt.ask_text("Word to edit")?;
        if word.is_empty() {
            return Ok(());
        }
        self.edit(&word).map(|_| ())
    }

    /// Edits the first entry with this word. Returns whether one was found.
    pub fn edit(&mut self, word: &str) -> DictResult<bool> {
        if let Some(found) = self.store.lookup(word).first() {
            writeln!(self.out, "Entry found:\n{}", found.display())?;
        }

        match self.store.edit(word, &mut self.prompt)? {
            Some(updated) => {
                writeln!(self.out, "Entry updated:\n{}", updated.display())?;
                Ok(true)
            }
            None => {
                writeln!(self.out, "No entry found to edit.")?;
                Ok(false)
            }
        }
    }

    fn remove_flow(&mut self) -> DictResult<()> {
        let word = self.prompt.ask_text("Word to remove")?;
        if word.is_empty() {
            return Ok(());
        }
        self.remove(&word).map(|_| ())
    }

    /// Removes every entry with this word. Returns how many went.
    pub fn remove(&mut self, word: &str) -> DictResult<usize> {
        let removed = self.store.remove(word)?;
        if removed == 0 {
            writeln!(self.out, "No entry found to remove.")?;
        } else {
            writeln!(self.out, "Removed {removed} entry(ies) with the word '{word}'.")?;
        }
        Ok(removed)
    }

    pub fn show_history(&mut self) -> DictResult<()> {
        let lines = self.store.history().read()?;
        if lines.is_empty() {
            writeln!(self.out, "No changes recorded yet.")?;
        }
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }
}

fn parse_field(input: &str) -> DictResult<SearchField> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return Ok(SearchField::All);
    }
    input.parse().map_err(|_| {
        DictError::invalid_input(format!(
            "invalid field '{input}', expected one of: {}",
            SearchField::CHOICES
        ))
    })
}
