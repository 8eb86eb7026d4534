//! Hook for a morphological analyzer used when a word form is not in the dictionary.

/// Maps an inflected word form to its lemma.
///
/// Return `None` (or an empty string) when the analyzer does not recognise the word.
pub trait Lemmatizer {
    /// lemma of `word`, if known
    fn lemmatize(&self, word: &str) -> Option<String>;
}

impl<F> Lemmatizer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lemmatize(&self, word: &str) -> Option<String> {
        self(word)
    }
}

/// Lemma of `word` if the analyzer gives one that differs from the input.
pub(crate) fn distinct_lemma(lemmatizer: &dyn Lemmatizer, word: &str) -> Option<String> {
    lemmatizer
        .lemmatize(word)
        .map(|lemma| lemma.trim().to_string())
        .filter(|lemma| !lemma.is_empty() && lemma != word)
}
