//! Udmurt/Russian dictionary lookups.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use smol_str::SmolStr;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{CorpusError, Result};
use crate::language::{Language, LanguageRef};
use crate::lemmatizer::{distinct_lemma, Lemmatizer};
use crate::transport::Transport;

/// HTML helpers for entry bodies.
pub mod html;

const ENDPOINT: &str = "dictionary/search";

/// How a word is looked up and how the result is shaped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct WordOptions {
    /// language of the query word
    pub language: Language,
    /// replace `~` in the query with the configured placeholder, and in glosses with the lemma
    pub replace_tilde: bool,
    /// return the decoded response untouched instead of [`DictionaryEntry`] records
    pub return_full_json: bool,
    /// retry with the lemma from the client's [`Lemmatizer`] when nothing matched
    pub lemmatize_if_not_found: bool,
}

impl WordOptions {
    /// Defaults: Udmurt, no tilde replacement, simplified output, no lemmatizer retry.
    pub fn new() -> WordOptions {
        WordOptions::default()
    }

    /// Sets the query language.
    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Replaces `~` on the way out and in glosses.
    pub fn replace_tilde(mut self, yes: bool) -> Self {
        self.replace_tilde = yes;
        self
    }

    /// Returns the service response untouched.
    pub fn return_full_json(mut self, yes: bool) -> Self {
        self.return_full_json = yes;
        self
    }

    /// Retries with the lemma when nothing matched.
    pub fn lemmatize_if_not_found(mut self, yes: bool) -> Self {
        self.lemmatize_if_not_found = yes;
        self
    }
}

/// One dictionary article reduced to text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// headword of the article
    pub lemma: SmolStr,
    /// grammatical labels, in article order
    pub tags: Vec<SmolStr>,
    /// plain text of the article
    pub gloss: String,
}

impl DictionaryEntry {
    fn from_item(item: &Value, query: &str, replace_tilde: bool) -> Result<DictionaryEntry> {
        let body = item
            .get("body")
            .and_then(Value::as_str)
            .ok_or_else(|| CorpusError::api(None, "dictionary entry without body"))?;

        let lemma = src_word(item).unwrap_or(query);

        let mut gloss = html::to_text(body);
        if replace_tilde {
            gloss = gloss.replace('~', lemma);
        }

        Ok(DictionaryEntry {
            lemma: SmolStr::from(lemma),
            tags: html::italic_labels(body),
            gloss,
        })
    }
}

fn src_word(item: &Value) -> Option<&str> {
    item.get("srcWord")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Result of a word lookup, shaped by [`WordOptions::return_full_json`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordResult {
    /// articles reduced to [`DictionaryEntry`] records
    Entries(Vec<DictionaryEntry>),
    /// articles exactly as the service sent them
    Full {
        /// the decoded response array
        items: Vec<Value>,
        /// headword the lookup settled on, the lemma of items without `srcWord`
        headword: SmolStr,
    },
}

impl WordResult {
    /// Headwords of all articles, in response order. Both shapes give the
    /// same list for the same response.
    pub fn lemmas(&self) -> Vec<&str> {
        match self {
            WordResult::Entries(entries) => entries.iter().map(|e| e.lemma.as_str()).collect(),
            WordResult::Full { items, headword } => items
                .iter()
                .map(|item| src_word(item).unwrap_or(headword.as_str()))
                .collect(),
        }
    }

    /// simplified records, `None` for the full shape
    pub fn entries(&self) -> Option<&[DictionaryEntry]> {
        match self {
            WordResult::Entries(entries) => Some(entries),
            WordResult::Full { .. } => None,
        }
    }

    /// number of articles
    pub fn len(&self) -> usize {
        match self {
            WordResult::Entries(entries) => entries.len(),
            WordResult::Full { items, .. } => items.len(),
        }
    }

    /// whether there are no articles
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Serialize)]
struct SearchPayload<'a> {
    word: &'a str,
    lang: LanguageRef,
}

/// Word the service is asked for, after tilde substitution.
pub(crate) fn outbound_word(word: &str, options: &WordOptions, placeholder: &str) -> String {
    if options.replace_tilde {
        word.replace('~', placeholder)
    } else {
        word.to_string()
    }
}

/// Dictionary endpoint of the service.
#[derive(Clone)]
pub struct Dictionary {
    transport: Arc<dyn Transport + Send + Sync>,
    config: Arc<ClientConfig>,
}

impl Dictionary {
    /// Dictionary service sending its requests through `transport`.
    pub fn new(transport: Arc<dyn Transport + Send + Sync>, config: Arc<ClientConfig>) -> Dictionary {
        Dictionary { transport, config }
    }

    /// Raw articles for `word`. An empty vector means no match.
    pub fn fetch(&self, word: &str, language: Language) -> Result<Vec<Value>> {
        let payload = serde_json::to_value(SearchPayload {
            word,
            lang: language.into(),
        })?;

        log::debug!("dictionary lookup: {:?} ({})", word, language);
        let response = self
            .transport
            .post_json(&self.config.endpoint(ENDPOINT), &self.config.headers, &payload)?;

        match response.json()? {
            Value::Null => Ok(vec![]),
            Value::Array(items) => Ok(items),
            other => Err(CorpusError::api(
                None,
                format!("expected an array of dictionary entries, got {}", other),
            )),
        }
    }

    /// Looks `word` up and shapes the answer. Not cached; see [`crate::CorpusClient`].
    pub fn get_word(
        &self,
        word: &str,
        options: &WordOptions,
        lemmatizer: Option<&dyn Lemmatizer>,
    ) -> Result<WordResult> {
        if word.trim().is_empty() {
            return Err(CorpusError::EmptyQuery);
        }

        let query = outbound_word(word, options, &self.config.tilde_placeholder);
        let mut items = self.fetch(&query, options.language)?;
        // the query as sent, so a tilde in it never reaches a gloss
        let mut headword = query;

        if items.is_empty() {
            if !options.lemmatize_if_not_found {
                return Err(CorpusError::WordNotFound {
                    word: word.to_string(),
                });
            }

            let lemmatizer = lemmatizer.ok_or(CorpusError::LemmatizerUnavailable)?;
            let lemma = distinct_lemma(lemmatizer, word).ok_or_else(|| {
                CorpusError::WordNotFound {
                    word: word.to_string(),
                }
            })?;

            log::debug!("{:?} not found, retrying with lemma {:?}", word, lemma);
            items = self.fetch(&lemma, options.language)?;
            if items.is_empty() {
                return Err(CorpusError::WordNotFound {
                    word: word.to_string(),
                });
            }
            headword = lemma;
        }

        if options.return_full_json {
            return Ok(WordResult::Full {
                items,
                headword: SmolStr::from(headword),
            });
        }

        items
            .iter()
            .map(|item| DictionaryEntry::from_item(item, &headword, options.replace_tilde))
            .collect::<Result<Vec<_>>>()
            .map(WordResult::Entries)
    }
}
