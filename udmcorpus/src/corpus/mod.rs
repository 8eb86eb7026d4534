//! Text corpus search.
//!
//! The service pages its results; [`Corpus::get_texts`] keeps requesting pages
//! until it holds `count` excerpts or the service reports the last page.
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::{CorpusError, Result};
use crate::transport::Transport;

/// Search options.
pub mod params;
mod payload;

pub use self::params::SearchParams;

const ENDPOINT: &str = "search";

/// One corpus hit. Everything besides `body` (source, author, match count, ...)
/// is kept exactly as the service sent it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    /// excerpt text; empty when the service sent none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    /// all other fields of the record
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Excerpt {
    /// excerpt text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Any other field of the excerpt record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }
}

/// A decoded result page.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// excerpts on this page
    #[serde(default)]
    pub content: Vec<Excerpt>,
    /// matches across all pages, 0 when not reported
    #[serde(default)]
    pub total_elements: u64,
    /// excerpts on this page as reported by the service
    #[serde(default)]
    pub number_of_elements: Option<u64>,
    /// final page; a page without the flag cannot be continued
    #[serde(default = "default_last")]
    pub last: bool,
    /// the service flagged the page as empty
    #[serde(default)]
    pub empty: bool,
}

fn default_last() -> bool {
    true
}

impl SearchPage {
    /// number of excerpts on this page
    pub fn elements(&self) -> usize {
        self.number_of_elements
            .map(|n| n as usize)
            .unwrap_or(self.content.len())
    }

    /// whether the page holds no excerpts
    pub fn is_empty(&self) -> bool {
        self.empty || self.content.is_empty()
    }
}

/// Result of a corpus search, shaped by [`SearchParams::return_full_json`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextSearchResult {
    /// matched excerpts in service order, at most `count` of them
    Excerpts(Vec<Excerpt>),
    /// every fetched page, undecoded
    Pages(Vec<Value>),
}

impl TextSearchResult {
    /// decoded excerpts, `None` for raw pages
    pub fn excerpts(&self) -> Option<&[Excerpt]> {
        match self {
            TextSearchResult::Excerpts(excerpts) => Some(excerpts),
            TextSearchResult::Pages(_) => None,
        }
    }

    /// Excerpt texts. For raw pages these are read from each page's `content`.
    pub fn bodies(&self) -> Vec<&str> {
        match self {
            TextSearchResult::Excerpts(excerpts) => excerpts.iter().map(Excerpt::body).collect(),
            TextSearchResult::Pages(pages) => pages
                .iter()
                .filter_map(|page| page.get("content").and_then(Value::as_array))
                .flatten()
                .filter_map(|item| item.get("body").and_then(Value::as_str))
                .collect(),
        }
    }

    /// number of excerpts, or of pages for raw results
    pub fn len(&self) -> usize {
        match self {
            TextSearchResult::Excerpts(excerpts) => excerpts.len(),
            TextSearchResult::Pages(pages) => pages.len(),
        }
    }

    /// whether the result holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Search endpoint of the service.
#[derive(Clone)]
pub struct Corpus {
    transport: Arc<dyn Transport + Send + Sync>,
    config: Arc<ClientConfig>,
}

impl Corpus {
    /// Search service sending its requests through `transport`.
    pub fn new(transport: Arc<dyn Transport + Send + Sync>, config: Arc<ClientConfig>) -> Corpus {
        Corpus { transport, config }
    }

    /// Requests a single page, returning it both raw and decoded.
    pub fn fetch_page(
        &self,
        query: &str,
        params: &SearchParams,
        page: u32,
        rows: u64,
    ) -> Result<(Value, SearchPage)> {
        let payload = payload::build(query, params, page, rows)?;

        log::debug!("corpus search: {:?} page {} (rows {})", query, page, rows);
        let raw = self
            .transport
            .post_json(&self.config.endpoint(ENDPOINT), &self.config.headers, &payload)?
            .json()?;

        if !raw.is_object() {
            return Err(CorpusError::api(
                None,
                format!("expected a result page, got {}", raw),
            ));
        }

        let page = SearchPage::deserialize(&raw)?;
        Ok((raw, page))
    }

    /// Searches the corpus for `query`, following pagination as `params` asks.
    ///
    /// With an `offset` inside a page, the excerpts before it are skipped in
    /// the excerpt result; raw pages are returned whole.
    pub fn get_texts(&self, query: &str, params: &SearchParams) -> Result<TextSearchResult> {
        if query.trim().is_empty() {
            return Err(CorpusError::EmptyQuery);
        }

        let start = params.start_page();
        let skip = params.skip_on_start_page();
        let (raw, first) = self.fetch_page(query, params, start, params.rows_count)?;

        // only a miss on the start page is "not found"; `count` and
        // `offset` may still narrow a hit down to nothing
        if first.is_empty() {
            return Err(CorpusError::TextsNotFound {
                query: query.to_string(),
            });
        }

        let total = first.total_elements;
        let count = match (params.all_texts, total) {
            // no usable total: read until the last page
            (true, 0) => usize::MAX,
            (true, total) => usize::try_from(total).unwrap_or(usize::MAX),
            (false, _) => params.count,
        };

        let mut collected = first.elements().saturating_sub(skip);
        let mut is_last = first.last;
        let mut pages = vec![(raw, first)];
        let mut page = start;

        while !is_last && collected < count {
            page = match page.checked_add(1) {
                Some(next) => next,
                None => {
                    log::warn!("corpus page number overflow for {:?}", query);
                    break;
                }
            };
            let (raw, next) = self.fetch_page(query, params, page, total)?;

            // a non-final empty page would never advance
            if next.elements() == 0 {
                log::warn!("corpus page {} for {:?} is empty but not last", page, query);
                break;
            }

            collected = collected.saturating_add(next.elements());
            is_last = next.last;
            pages.push((raw, next));
        }

        if params.return_full_json {
            return Ok(TextSearchResult::Pages(
                pages.into_iter().map(|(raw, _)| raw).collect(),
            ));
        }

        let excerpts = pages
            .into_iter()
            .flat_map(|(_, page)| page.content)
            .skip(skip)
            .take(count)
            .collect::<Vec<_>>();

        Ok(TextSearchResult::Excerpts(excerpts))
    }
}
