//! Dictionary languages.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CorpusError;

/// Language of a dictionary lookup. The service identifies it by a numeric id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Udmurt to Russian
    #[default]
    #[serde(rename = "udm")]
    Udmurt,
    /// Russian to Udmurt
    #[serde(rename = "rus")]
    Russian,
}

impl Language {
    /// short code used by callers, `udm` or `rus`
    pub const fn code(self) -> &'static str {
        match self {
            Language::Udmurt => "udm",
            Language::Russian => "rus",
        }
    }

    /// numeric id the service expects in `lang.id`
    pub const fn id(self) -> u32 {
        match self {
            Language::Udmurt => 1,
            Language::Russian => 2,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = CorpusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "udm" => Ok(Language::Udmurt),
            "rus" => Ok(Language::Russian),
            other => Err(CorpusError::UnsupportedLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `{"id": n}` as sent in the dictionary payload
#[derive(Serialize)]
pub(crate) struct LanguageRef {
    pub id: u32,
}

impl From<Language> for LanguageRef {
    fn from(lang: Language) -> Self {
        LanguageRef { id: lang.id() }
    }
}
