//! The public facade: dictionary lookups with memoization, corpus search without.
use parking_lot::Mutex;
use std::sync::Arc;

use crate::cache::{CacheStats, LruCache};
use crate::config::ClientConfig;
use crate::corpus::{Corpus, SearchParams, TextSearchResult};
use crate::dictionary::{Dictionary, WordOptions, WordResult};
use crate::error::Result;
use crate::lemmatizer::Lemmatizer;
use crate::transport::{Transport, UreqTransport};

type CacheKey = (String, WordOptions);

/// Client of the Udmurt dictionary and corpus service.
///
/// Word lookups are cached per `(word, options)` for the lifetime of the
/// client; the cache is bounded by [`ClientConfig::cache_capacity`] and drops
/// the least recently used lookup when full. Failed lookups are not cached.
///
/// The client is `Send + Sync` and can be shared between threads. The cache
/// lock is not held while a request is in flight, so two threads missing on
/// the same key may both hit the network.
pub struct CorpusClient {
    dictionary: Dictionary,
    corpus: Corpus,
    lemmatizer: Option<Arc<dyn Lemmatizer + Send + Sync>>,
    cache: Mutex<LruCache<CacheKey, WordResult>>,
    config: Arc<ClientConfig>,
}

impl CorpusClient {
    /// Client for the public service with default settings.
    pub fn new() -> CorpusClient {
        CorpusClient::builder().build()
    }

    /// Starts configuring a client.
    pub fn builder() -> CorpusClientBuilder {
        CorpusClientBuilder::new()
    }

    /// Looks up `word` in the dictionary.
    ///
    /// Fails with [`crate::CorpusError::WordNotFound`] when the dictionary has
    /// no article for it (after the lemmatizer retry, if requested).
    pub fn search_word(&self, word: &str, options: &WordOptions) -> Result<WordResult> {
        let key = (word.to_string(), options.clone());

        let cached = self.cache.lock().get(&key);
        if let Some(hit) = cached {
            log::trace!("cache hit for {:?}", word);
            return Ok(hit);
        }

        let result = self.dictionary.get_word(
            word,
            options,
            self.lemmatizer.as_deref().map(|l| l as &dyn Lemmatizer),
        )?;

        self.cache.lock().insert(key, result.clone());
        Ok(result)
    }

    /// Searches the text corpus. Never cached.
    ///
    /// Fails with [`crate::CorpusError::TextsNotFound`] when nothing matched.
    pub fn search_texts(&self, query: &str, params: &SearchParams) -> Result<TextSearchResult> {
        self.corpus.get_texts(query, params)
    }

    /// the dictionary service, uncached
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// the corpus search service
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// configuration in effect
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Counters of the word lookup cache.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.lock().stats()
    }

    /// Forgets all memoized word lookups.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }
}

impl Default for CorpusClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`CorpusClient`]. Unset parts take their defaults.
pub struct CorpusClientBuilder {
    config: ClientConfig,
    transport: Option<Arc<dyn Transport + Send + Sync>>,
    lemmatizer: Option<Arc<dyn Lemmatizer + Send + Sync>>,
}

impl CorpusClientBuilder {
    /// Builder with the default configuration and transport.
    pub fn new() -> CorpusClientBuilder {
        CorpusClientBuilder {
            config: ClientConfig::default(),
            transport: None,
            lemmatizer: None,
        }
    }

    /// Replaces the whole configuration, e.g. with [`ClientConfig::from_env`].
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the API root.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Adds a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Bounds the word lookup cache; 0 disables it.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.config.cache_capacity = capacity;
        self
    }

    /// Sets what `~` becomes in outbound words.
    pub fn tilde_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.config.tilde_placeholder = placeholder.into();
        self
    }

    /// Sends requests through `transport` instead of the default `ureq` agent.
    pub fn transport<T>(mut self, transport: Arc<T>) -> Self
    where
        T: Transport + Send + Sync + 'static,
    {
        self.transport = Some(transport as Arc<dyn Transport + Send + Sync>);
        self
    }

    /// Lemmatizer for the `lemmatize_if_not_found` retry.
    pub fn lemmatizer<L>(mut self, lemmatizer: L) -> Self
    where
        L: Lemmatizer + Send + Sync + 'static,
    {
        self.lemmatizer = Some(Arc::new(lemmatizer) as Arc<dyn Lemmatizer + Send + Sync>);
        self
    }

    /// Builds the client, normalizing the configuration.
    pub fn build(self) -> CorpusClient {
        let mut config = self.config;
        config.normalize();
        let config = Arc::new(config);

        let transport: Arc<dyn Transport + Send + Sync> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqTransport::new()),
        };

        CorpusClient {
            dictionary: Dictionary::new(Arc::clone(&transport), Arc::clone(&config)),
            corpus: Corpus::new(transport, Arc::clone(&config)),
            lemmatizer: self.lemmatizer,
            cache: Mutex::new(LruCache::new(config.cache_capacity)),
            config,
        }
    }
}

impl Default for CorpusClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
