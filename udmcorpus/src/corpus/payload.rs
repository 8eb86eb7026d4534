use serde::Serialize;
use serde_json::Value;

use super::params::SearchParams;
use crate::error::{CorpusError, Result};

const CORPUS_TITLE: &str = "Корпус литературных текстов";
const NO_GRAMMAR: &str = "Грамматика не выбрана";
const NO_GLOSS: &str = "Глоссы не выбраны";

/// Grammatical filters of the search form; the client never sets any.
#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GrammarFilter {
    part_of_speech: Vec<Value>,
    lexical_classes: Vec<Value>,
    attributivizers: Vec<Value>,
    numerals: Vec<Value>,
    number: Vec<Value>,
    core_cases: Vec<Value>,
    spatial_cases: Vec<Value>,
    spatial_cases2: Vec<Value>,
    possessiveness: Vec<Value>,
    #[serde(rename = "tense_mood")]
    tense_mood: Vec<Value>,
    verbal_derivation: Vec<Value>,
    non_finite_forms: Vec<Value>,
    imperatives: Vec<Value>,
}

#[derive(Serialize)]
struct CorpusType {
    value: u8,
    title: &'static str,
    name: &'static str,
}

const LITERARY: CorpusType = CorpusType {
    value: 0,
    title: CORPUS_TITLE,
    name: "CORPUS",
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload<'a> {
    search_mode: u8,
    word: Option<&'a str>,
    page: u32,
    per_page: u32,
    #[serde(rename = "fullcompare")]
    full_compare: bool,
    text: Option<&'a str>,
    title: &'static str,
    gr: GrammarFilter,
    gloss: Vec<Value>,
    start_year: Option<u32>,
    end_year: Option<u32>,
    theme: Option<Value>,
    #[serde(rename = "type")]
    corpus_type: CorpusType,
    authors: Option<Value>,
    rows: u64,
    compiledgr: &'static str,
    compiledgloss: &'static str,
}

/// Request body for one page. Options in `params.extra` are merged on top.
pub(super) fn build(query: &str, params: &SearchParams, page: u32, rows: u64) -> Result<Value> {
    let (search_mode, word, text) = if params.full_text_mode {
        (1, None, Some(query))
    } else {
        (0, Some(query), None)
    };

    let payload = SearchPayload {
        search_mode,
        word,
        page,
        per_page: params.per_page,
        full_compare: params.full_compare,
        text,
        title: "",
        gr: GrammarFilter::default(),
        gloss: vec![],
        start_year: None,
        end_year: None,
        theme: None,
        corpus_type: LITERARY,
        authors: None,
        rows,
        compiledgr: NO_GRAMMAR,
        compiledgloss: NO_GLOSS,
    };

    let mut value = serde_json::to_value(payload)?;
    match value.as_object_mut() {
        Some(obj) => {
            for (key, extra) in &params.extra {
                obj.insert(key.clone(), extra.clone());
            }
        }
        None => return Err(CorpusError::api(None, "search payload is not an object")),
    }

    Ok(value)
}
