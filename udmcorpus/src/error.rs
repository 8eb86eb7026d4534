//! Error types for dictionary and corpus requests.

/// Errors that can occur while querying the dictionary or the corpus.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CorpusError {
    /// The dictionary returned no entry for the query
    #[error("Word '{word}' not found")]
    WordNotFound {
        /// the query as given by the caller
        word: String,
    },

    /// The corpus search returned zero excerpts
    #[error("Text '{query}' not found")]
    TextsNotFound {
        /// the query as given by the caller
        query: String,
    },

    /// The service answered with a failure status, an error object or a malformed body
    #[error("API error{}: {detail}", http_status(.status))]
    Api {
        /// HTTP status, if the failure came with one
        status: Option<u16>,
        /// response body or a description of what was wrong with it
        detail: String,
    },

    /// Connection, DNS or I/O failure reported by the transport
    #[error("Transport error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Language code is not one of the supported ones
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Word or query is empty
    #[error("Query must not be empty")]
    EmptyQuery,

    /// Lemmatization fallback was requested but the client has no lemmatizer
    #[error("Lemmatization requested but no lemmatizer is configured")]
    LemmatizerUnavailable,

    /// Response body is not valid JSON or does not have the expected shape
    #[error("Failed to decode response")]
    Json(#[from] serde_json::Error),
}

fn http_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (HTTP {})", code),
        None => String::new(),
    }
}

impl CorpusError {
    pub(crate) fn api(status: Option<u16>, detail: impl Into<String>) -> CorpusError {
        CorpusError::Api {
            status,
            detail: detail.into(),
        }
    }

    /// whether the error means "nothing matched" rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CorpusError::WordNotFound { .. } | CorpusError::TextsNotFound { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_includes_status() {
        let err = CorpusError::api(Some(502), "Bad Gateway");
        assert_eq!(err.to_string(), "API error (HTTP 502): Bad Gateway");

        let err = CorpusError::api(None, "expected an array");
        assert_eq!(err.to_string(), "API error: expected an array");
    }

    #[test]
    fn not_found_kinds() {
        let word = CorpusError::WordNotFound {
            word: "укно".into(),
        };
        assert_eq!(word.to_string(), "Word 'укно' not found");
        assert!(word.is_not_found());
        assert!(!CorpusError::EmptyQuery.is_not_found());
    }
}
