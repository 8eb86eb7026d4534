//! Client configuration.
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Public API root of the Udmurt corpus service.
pub const DEFAULT_BASE_URL: &str = "https://udmcorpus.udman.ru/api/public";

/// Number of distinct word lookups kept in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Substitute for `~` in outbound words when tilde replacement is on.
pub const DEFAULT_TILDE_PLACEHOLDER: &str = "*";

const ENV_BASE_URL: &str = "UDMCORPUS_BASE_URL";
const ENV_API_KEY: &str = "UDMCORPUS_API_KEY";

/// Where and how the client talks to the service.
/// 
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// extra headers sent with every request
    pub headers: HashMap<String, String>,
    /// bound of the word lookup cache, 0 disables caching
    pub cache_capacity: usize,
    /// what `~` becomes in outbound words when tilde replacement is on
    pub tilde_placeholder: String,
}

impl Default for ClientConfig {
    fn default() -> ClientConfig {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: HashMap::new(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            tilde_placeholder: DEFAULT_TILDE_PLACEHOLDER.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults, overridden by `UDMCORPUS_BASE_URL` and `UDMCORPUS_API_KEY` when set.
    pub fn from_env() -> ClientConfig {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> ClientConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ClientConfig::default();

        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = url;
        }

        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            config
                .headers
                .insert("Authorization".to_string(), format!("Bearer {}", key.trim()));
        }

        config.normalize();
        config
    }

    /// Full URL of an endpoint below the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.cache_capacity, 128);
        assert_eq!(
            config.endpoint("dictionary/search"),
            "https://udmcorpus.udman.ru/api/public/dictionary/search"
        );
    }

    #[test]
    fn env_overrides() {
        let config = ClientConfig::from_lookup(|key| match key {
            "UDMCORPUS_BASE_URL" => Some("http://localhost:8080/api/".to_string()),
            "UDMCORPUS_API_KEY" => Some("secret".to_string()),
            _ => None,
        });

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.endpoint("/search"), "http://localhost:8080/api/search");
        assert_eq!(
            config.headers.get("Authorization").map(String::as_str),
            Some("Bearer secret")
        );
    }

    #[test]
    fn blank_env_is_ignored() {
        let config = ClientConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn partial_json() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "cache_capacity": 4 }"#).unwrap();
        assert_eq!(config.cache_capacity, 4);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
