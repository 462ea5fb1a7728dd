use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Offline dictionary notebook: translate words once, look them up later.
#[derive(Parser, Debug)]
#[command(name = "dict", version, about)]
pub struct Cli {
    /// Dictionary file (overrides DICT_FILE).
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// History file (overrides DICT_HISTORY_FILE).
    #[arg(long, global = true)]
    pub history_file: Option<PathBuf>,

    /// Use the three-field notebook layout: word, language, translation.
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Interactive numbered menu.
    Menu,

    /// Translate a word and add it to the dictionary.
    /// If no language is given, it is asked for.
    New {
        word: String,
        /// Target language code, e.g. en.
        lang: Option<String>,
        /// Source language code. Detected when omitted.
        #[arg(long)]
        from: Option<String>,
    },

    /// Show the entries for an exact word, ignoring case.
    Read { word: String },

    /// List entries, all of them or a single page.
    List {
        /// Page to show, starting at 1.
        #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
        page: Option<usize>,
    },

    /// Remove every entry with this word.
    Remove { word: String },

    /// Edit the first entry with this word.
    Edit { word: String },

    /// Search for a term inside entries.
    ///
    /// By default the term is looked for in every field, language codes
    /// included, so `dict search en` lists every English entry. Use
    /// `--field word` or `--field translation` to narrow it.
    Search {
        term: String,
        /// One of: all, word, translation, lang, src_lang, target_lang.
        #[arg(long, default_value = "all")]
        field: String,
    },

    /// Show the change history.
    History,
}
