//! Requests against the public service. Run with `cargo test -- --ignored`.
use udmcorpus::{CorpusClient, CorpusError, Language, SearchParams, WordOptions};

fn client() -> CorpusClient {
    let _ = env_logger::builder().is_test(true).try_init();
    CorpusClient::builder()
        .config(udmcorpus::ClientConfig::from_env())
        .build()
}

#[test]
#[ignore]
fn word_lookup() {
    let result = client().search_word("укно", &WordOptions::new()).unwrap();
    let entries = result.entries().unwrap();
    assert!(!entries.is_empty());
    assert!(entries[0].gloss.contains("окно"));
}

#[test]
#[ignore]
fn full_json_matches_simplified() {
    let client = client();
    let simple = client.search_word("укно", &WordOptions::new()).unwrap();
    let full = client
        .search_word("укно", &WordOptions::new().return_full_json(true))
        .unwrap();
    assert_eq!(simple.lemmas(), full.lemmas());
}

#[test]
#[ignore]
fn tilde_replaced_in_glosses() {
    let result = client()
        .search_word("укно", &WordOptions::new().replace_tilde(true))
        .unwrap();
    for entry in result.entries().unwrap() {
        assert!(!entry.gloss.contains('~'));
    }
}

#[test]
#[ignore]
fn russian_lookup() {
    let result = client()
        .search_word("окно", &WordOptions::new().language(Language::Russian))
        .unwrap();
    assert!(!result.is_empty());
}

#[test]
#[ignore]
fn unknown_word() {
    match client().search_word("asdfqwerty123", &WordOptions::new()) {
        Err(CorpusError::WordNotFound { word }) => assert_eq!(word, "asdfqwerty123"),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
#[ignore]
fn texts() {
    let result = client()
        .search_texts("аспӧртэм", &SearchParams::default())
        .unwrap();
    assert!(!result.is_empty());
    assert!(result.bodies()[0].contains("аспӧртэм"));
}

#[test]
#[ignore]
fn texts_with_count() {
    let params = SearchParams::default().count(5).full_compare(true);
    let result = client().search_texts("аспӧртэм", &params).unwrap();
    assert!(result.len() <= 5);
}

#[test]
#[ignore]
fn texts_not_found() {
    assert!(matches!(
        client().search_texts("asdfqwerty123", &SearchParams::default()),
        Err(CorpusError::TextsNotFound { .. })
    ));
}
