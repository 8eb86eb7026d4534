//! Options of a corpus search.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Recognized search options. Anything else lands in `extra` and is sent to
/// the service as-is.
///
/// Deserializes from a plain JSON object, so
/// `serde_json::from_value(json!({"count": 5, "startYear": 1920}))` yields
/// `count = 5` plus one forwarded option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// maximum number of excerpts returned
    pub count: usize,
    /// raise `count` to the total number of matches
    pub all_texts: bool,
    /// return raw result pages instead of excerpts
    pub return_full_json: bool,
    /// exact instead of partial word match
    pub full_compare: bool,
    /// search for a phrase in text instead of a word form
    pub full_text_mode: bool,
    /// 1-based page to start from
    pub page: u32,
    /// element offset to start from, takes precedence over `page`
    pub offset: Option<u32>,
    /// excerpts per page requested from the service
    pub per_page: u32,
    /// `rows` sent with the first request; later pages send the reported total
    pub rows_count: u64,
    /// options sent to the service unmodified
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SearchParams {
    fn default() -> SearchParams {
        SearchParams {
            count: 10,
            all_texts: false,
            return_full_json: false,
            full_compare: false,
            full_text_mode: false,
            page: 1,
            offset: None,
            per_page: 10,
            rows_count: 0,
            extra: Map::new(),
        }
    }
}

impl SearchParams {
    /// Sets the maximum number of excerpts.
    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Returns every match instead of `count`.
    pub fn all_texts(mut self, yes: bool) -> Self {
        self.all_texts = yes;
        self
    }

    /// Returns raw pages instead of excerpts.
    pub fn return_full_json(mut self, yes: bool) -> Self {
        self.return_full_json = yes;
        self
    }

    /// Matches whole word forms only.
    pub fn full_compare(mut self, yes: bool) -> Self {
        self.full_compare = yes;
        self
    }

    /// Searches for a phrase in text.
    pub fn full_text_mode(mut self, yes: bool) -> Self {
        self.full_text_mode = yes;
        self
    }

    /// Starts at a 1-based page, clearing any offset.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self.offset = None;
        self
    }

    /// Starts at an element offset.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Adds an option the client does not interpret.
    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Page the search starts on.
    pub fn start_page(&self) -> u32 {
        match self.offset {
            Some(offset) => (offset / self.per_page.max(1)).saturating_add(1),
            None => self.page.max(1),
        }
    }

    /// Excerpts on the start page that lie before `offset`.
    pub fn skip_on_start_page(&self) -> usize {
        match self.offset {
            Some(offset) => (offset % self.per_page.max(1)) as usize,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_object() {
        let params: SearchParams = serde_json::from_value(json!({
            "count": 5,
            "full_compare": true,
            "startYear": 1920,
        }))
        .unwrap();

        assert_eq!(params.count, 5);
        assert!(params.full_compare);
        assert_eq!(params.per_page, 10);
        assert_eq!(params.extra.get("startYear"), Some(&json!(1920)));
        assert_eq!(params.extra.len(), 1);
    }

    #[test]
    fn start_page() {
        assert_eq!(SearchParams::default().start_page(), 1);
        assert_eq!(SearchParams::default().page(0).start_page(), 1);
        assert_eq!(SearchParams::default().page(3).start_page(), 3);
        assert_eq!(SearchParams::default().offset(25).start_page(), 3);
        assert_eq!(SearchParams::default().per_page(0).offset(4).start_page(), 5);
    }

    #[test]
    fn offset_within_page() {
        let params = SearchParams::default().offset(25);
        assert_eq!((params.start_page(), params.skip_on_start_page()), (3, 5));
        assert_eq!(SearchParams::default().page(4).skip_on_start_page(), 0);
    }

    #[test]
    fn huge_offset_saturates() {
        let params = SearchParams::default().per_page(1).offset(u32::MAX);
        assert_eq!(params.start_page(), u32::MAX);
        assert_eq!(params.skip_on_start_page(), 0);
    }
}
