use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::{DictError, DictResult};

/// Target languages a new entry may be translated into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    Pt,
    It,
    Ru,
    Ja,
}

impl Language {
    /// Parses a user supplied code, ignoring surrounding whitespace and case.
    pub fn parse_code(code: &str) -> DictResult<Self> {
        let normalized = code.trim().to_lowercase();
        Language::from_str(&normalized).map_err(|_| DictError::UnsupportedLanguage(normalized))
    }

    pub fn supported_codes() -> String {
        Language::iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
