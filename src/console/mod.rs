use std::io;
use std::process::ExitCode;

use crate::configuration::Configuration;
use crate::error::DictResult;
use crate::model::language::Language;
use crate::services::prompt::{ConsolePrompt, UserPrompt};
use crate::services::record_store::{Codec, HistoryLog, Layout, RecordStore};
use crate::services::translator::HttpTranslator;

pub mod cli;
mod menu_option;
mod session;

use cli::{Cli, Command};
use session::Session;

/// Opens the store described by `configuration` and runs one command.
pub fn run(cli: Cli, mut configuration: Configuration) -> DictResult<ExitCode> {
    if let Some(file) = cli.file {
        configuration.data_file = file;
    }
    if let Some(history_file) = cli.history_file {
        configuration.history_file = history_file;
    }
    if cli.compact {
        configuration.layout = Layout::Compact;
    }
    tracing::debug!("running {:?} with configuration {configuration:#?}", cli.command);

    let codec = Codec::new(configuration.layout, configuration.compact_source_lang.clone());
    let history = HistoryLog::new(&configuration.history_file, configuration.user.clone());
    let mut store = RecordStore::open(&configuration.data_file, codec, history)?;
    tracing::debug!(
        path = %store.path().display(),
        entries = store.len(),
        skipped = store.skipped().len(),
        "opened dictionary"
    );
    let translator = HttpTranslator::new(&configuration.translator())?;

    let mut prompt = ConsolePrompt::stdio();

    // Validate the target language before any network call.
    let target = match &cli.command {
        Command::New { lang, .. } => {
            let code = match lang {
                Some(code) => code.clone(),
                None => prompt.ask_text(&format!(
                    "Language code to translate into ({})",
                    Language::supported_codes()
                ))?,
            };
            Some(Language::parse_code(&code)?)
        }
        _ => None,
    };

    let mut session = Session::new(
        &mut store,
        &translator,
        prompt,
        io::stdout(),
        configuration.page_size,
    );

    match cli.command {
        Command::Menu => session.run_menu()?,
        Command::New { word, from, .. } => {
            if let Some(target) = target {
                session.translate_and_add(&word, from.as_deref(), target)?;
            }
        }
        Command::Read { word } => {
            session.read(&word)?;
        }
        Command::List { page } => session.list(page)?,
        Command::Remove { word } => {
            session.remove(&word)?;
        }
        Command::Edit { word } => {
            session.edit(&word)?;
        }
        Command::Search { term, field } => {
            session.search(&term, &field)?;
        }
        Command::History => session.show_history()?,
    }

    Ok(ExitCode::SUCCESS)
}
