use std::{ffi::OsString, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use crate::error::{DictError, DictResult};
use crate::services::record_store::Layout;
use crate::services::translator::TranslatorConfig;

/// The configuration of the application.
#[derive(Debug, Clone)]
pub struct Configuration {
    /// The tab-delimited file holding the dictionary entries.
    pub data_file: PathBuf,

    /// The append-only file receiving one line per change.
    pub history_file: PathBuf,

    /// Five-field lines with timestamps, or the three-field notebook layout.
    pub layout: Layout,

    /// The source language assumed for three-field lines.
    pub compact_source_lang: String,

    /// Entries shown per page when listing.
    pub page_size: usize,

    /// Base url of the translation service.
    pub translator_url: String,

    /// Optional key sent to the translation service.
    pub translator_api_key: Option<String>,

    /// How long to wait for the translation service.
    pub translator_timeout: Duration,

    /// The name written to the history file.
    pub user: String,
}

type Source<'a> = &'a dyn Fn(&str) -> Option<OsString>;

impl Configuration {
    /// Read the configuration values from environment variables.
    pub fn from_environment() -> DictResult<Self> {
        Self::from_source(&|key| std::env::var_os(key))
    }

    pub fn from_source(source: Source<'_>) -> DictResult<Self> {
        let page_size: usize = read_with_default_as_type(source, "DICT_PAGE_SIZE", 5usize)?;
        if page_size == 0 {
            return Err(DictError::MalformedEnvironmentVariable {
                key: "DICT_PAGE_SIZE".to_string(),
                value: "0".into(),
                reason: "page size must be at least 1".to_string(),
            });
        }

        Ok(Self {
            data_file: read_with_default_as_type(source, "DICT_FILE", "dictionary_v2.txt")?,
            history_file: read_with_default_as_type(source, "DICT_HISTORY_FILE", "history.log")?,
            layout: read_with_default_as_type(source, "DICT_LAYOUT", Layout::Full)?,
            compact_source_lang: read_with_default(source, "DICT_COMPACT_SOURCE_LANG", "pt")?
                .trim()
                .to_lowercase(),
            page_size,
            translator_url: read_with_default(
                source,
                "DICT_TRANSLATOR_URL",
                "https://libretranslate.com",
            )?,
            translator_api_key: read_optional(source, "DICT_TRANSLATOR_API_KEY")?,
            translator_timeout: Duration::from_secs(read_with_default_as_type(
                source,
                "DICT_TRANSLATOR_TIMEOUT_SECS",
                60u64,
            )?),
            user: current_user(source)?,
        })
    }

    pub fn translator(&self) -> TranslatorConfig {
        TranslatorConfig {
            base_url: self.translator_url.clone(),
            api_key: self.translator_api_key.clone(),
            timeout: self.translator_timeout,
        }
    }
}

fn current_user(source: Source<'_>) -> DictResult<String> {
    for key in ["DICT_USER", "USER", "USERNAME"] {
        if let Some(user) = read_optional(source, key)? {
            if !user.trim().is_empty() {
                return Ok(user.trim().to_string());
            }
        }
    }
    Ok("unknown".to_string())
}

fn read_optional(source: Source<'_>, key: &str) -> DictResult<Option<String>> {
    match source(key) {
        None => Ok(None),
        Some(value) => value
            .clone()
            .into_string()
            .map(Some)
            .map_err(|_| DictError::MalformedEnvironmentVariable {
                key: key.to_string(),
                value,
                reason: "not valid unicode".to_string(),
            }),
    }
}

fn read_with_default(source: Source<'_>, key: &str, default: impl Into<String>) -> DictResult<String> {
    Ok(read_optional(source, key)?.unwrap_or_else(|| default.into()))
}

fn read_with_default_as_type<T: FromStr>(
    source: Source<'_>,
    key: &str,
    default: impl Into<T>,
) -> DictResult<T>
where
    <T as FromStr>::Err: Display,
{
    match read_optional(source, key)? {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|error: T::Err| DictError::MalformedEnvironmentVariable {
                key: key.to_string(),
                value: value.clone().into(),
                reason: error.to_string(),
            }),
        None => Ok(default.into()),
    }
}
