/*! Client for the Udmurt dictionary and text corpus.

Wraps the public API of [`udmcorpus.udman.ru`] behind two calls: a
dictionary lookup, which is memoized per client, and a corpus search, which
follows the service's pagination. Service answers come back as typed results
or as a [`CorpusError`].

[`udmcorpus.udman.ru`]: https://udmcorpus.udman.ru

# Usage examples

```no_run
use udmcorpus::{CorpusClient, SearchParams, WordOptions};

let client = CorpusClient::new();

let word = client.search_word("укно", &WordOptions::new().replace_tilde(true))?;
for entry in word.entries().unwrap_or_default() {
    println!("{}: {}", entry.lemma, entry.gloss);
}

let texts = client.search_texts("аспӧртэм", &SearchParams::default().count(5))?;
for body in texts.bodies() {
    println!("{}", body);
}
# Ok::<(), udmcorpus::CorpusError>(())
```

The library logs through the [`log`] facade and installs no logger itself.

*/

#![warn(missing_docs)]

pub mod cache;
pub mod client;
pub mod config;
pub mod corpus;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod lemmatizer;
pub mod transport;

pub use crate::client::{CorpusClient, CorpusClientBuilder};
pub use crate::config::ClientConfig;
pub use crate::corpus::{Excerpt, SearchParams, TextSearchResult};
pub use crate::dictionary::{DictionaryEntry, WordOptions, WordResult};
pub use crate::error::{CorpusError, Result};
pub use crate::language::Language;
pub use crate::lemmatizer::Lemmatizer;
