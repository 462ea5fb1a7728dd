use strum::{Display, EnumString};

use crate::model::entry::{Entry, EntryKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SearchField {
    #[default]
    All,
    Word,
    Translation,
    SrcLang,
    TargetLang,
    /// Either language of the pair.
    Lang,
}

impl SearchField {
    pub const CHOICES: &'static str = "all, word, translation, lang, src_lang, target_lang";
}

/// Case-insensitive substring match. Accents are compared literally.
pub fn matches(entry: &Entry, term: &str, field: SearchField) -> bool {
    let term = term.to_lowercase();
    let contains = |value: &str| value.to_lowercase().contains(&term);

    match field {
        SearchField::All => {
            contains(&entry.word)
                || contains(&entry.translation)
                || contains(&entry.src_lang)
                || contains(&entry.target_lang)
        }
        SearchField::Word => contains(&entry.word),
        SearchField::Translation => contains(&entry.translation),
        SearchField::SrcLang => contains(&entry.src_lang),
        SearchField::TargetLang => contains(&entry.target_lang),
        SearchField::Lang => contains(&entry.src_lang) || contains(&entry.target_lang),
    }
}

pub fn search<'a>(entries: &'a [Entry], term: &str, field: SearchField) -> Vec<&'a Entry> {
    entries.iter().filter(|e| matches(e, term, field)).collect()
}

pub fn exact_word<'a>(entries: &'a [Entry], word: &str) -> Vec<&'a Entry> {
    entries.iter().filter(|e| e.word_matches(word)).collect()
}

pub fn find_key(entries: &[Entry], key: EntryKey<'_>) -> Option<usize> {
    entries.iter().position(|e| e.key() == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Entry {
        Entry::new("Tree", "en", "pt", "Árvore").unwrap()
    }

    #[test]
    fn all_field_matches_any_column_ignoring_case() {
        let entries = vec![tree(), Entry::new("House", "en", "fr", "Maison").unwrap()];

        assert_eq!(search(&entries, "TRE", SearchField::All).len(), 1);
        assert_eq!(search(&entries, "árv", SearchField::All).len(), 1);
        assert_eq!(search(&entries, "en", SearchField::All).len(), 2);
        assert_eq!(search(&entries, "fr", SearchField::All)[0].word, "House");
    }

    #[test]
    fn accents_are_not_folded() {
        let entries = vec![tree()];
        assert!(search(&entries, "arvo", SearchField::All).is_empty());
    }

    #[test]
    fn named_field_restricts_the_match() {
        let entries = vec![tree()];

        assert!(search(&entries, "tree", SearchField::Translation).is_empty());
        assert_eq!(search(&entries, "tree", SearchField::Word).len(), 1);
        assert_eq!(search(&entries, "pt", SearchField::TargetLang).len(), 1);
        assert!(search(&entries, "pt", SearchField::SrcLang).is_empty());
        assert_eq!(search(&entries, "pt", SearchField::Lang).len(), 1);
    }

    #[test]
    fn results_keep_original_order() {
        let entries = vec![
            Entry::new("b-tree", "en", "pt", "árvore b").unwrap(),
            Entry::new("apple", "en", "pt", "maçã").unwrap(),
            Entry::new("tree", "en", "pt", "árvore").unwrap(),
        ];

        let words: Vec<&str> = search(&entries, "tree", SearchField::Word)
            .iter()
            .map(|e| e.word.as_str())
            .collect();

        assert_eq!(words, vec!["b-tree", "tree"]);
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("src_lang".parse::<SearchField>().unwrap(), SearchField::SrcLang);
        assert_eq!("lang".parse::<SearchField>().unwrap(), SearchField::Lang);
        assert!("language".parse::<SearchField>().is_err());
    }
}
