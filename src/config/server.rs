//! Server configuration loaded from environment variables.
//!
//! All settings have defaults so the server starts with zero configuration;
//! without API keys it still answers, degrading conversation requests to
//! translation-only and translation requests to 500s.

use std::net::SocketAddr;

// ---------------------------------------------------------------------------
// LlmConfig
// ---------------------------------------------------------------------------

/// Settings for the language-model provider (OpenAI-compatible API).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    /// Base URL of the API endpoint; `/v1/chat/completions` is appended.
    /// Env: `OPENAI_BASE_URL`
    pub base_url: String,
    /// API key: `None` means the provider is unconfigured.
    /// Env: `OPENAI_API_KEY`
    pub api_key: Option<String>,
    /// Model identifier sent to the API.
    /// Env: `OPENAI_MODEL`
    pub model: String,
    /// Upper bound on the reply length.
    pub max_tokens: u32,
    /// Sampling temperature (0.0 – 2.0).
    pub temperature: f32,
    /// Maximum seconds to wait for a response.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            api_key: None,
            model: "gpt-3.5-turbo".into(),
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslatorConfig
// ---------------------------------------------------------------------------

/// Settings for the translation provider (DeepL API).
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorConfig {
    /// DeepL authentication key.
    /// Env: `DEEPL_API_KEY`
    pub api_key: Option<String>,
    /// Explicit API base URL.  When `None` the URL is chosen from the key:
    /// free-tier keys (suffix `:fx`) use `api-free.deepl.com`.
    /// Env: `DEEPL_API_URL`
    pub api_url: Option<String>,
    /// Maximum seconds to wait for a response.
    pub timeout_secs: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: None,
            timeout_secs: 30,
        }
    }
}

impl TranslatorConfig {
    /// Base URL requests are sent to.
    pub fn base_url(&self) -> String {
        if let Some(url) = &self.api_url {
            return url.trim_end_matches('/').to_string();
        }
        match &self.api_key {
            Some(key) if key.ends_with(":fx") => "https://api-free.deepl.com".into(),
            _ => "https://api.deepl.com".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) API server.
    /// Env: `CHATTR_HTTP_ADDR`
    /// Default: `127.0.0.1:3000`
    pub http_addr: SocketAddr,
    pub translator: TranslatorConfig,
    pub llm: LlmConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([127, 0, 0, 1], 3000).into(),
            translator: TranslatorConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup (useful for tests).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        // Empty values are treated as unset.
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(addr) = get("CHATTR_HTTP_ADDR") {
            match addr.parse::<SocketAddr>() {
                Ok(parsed) => config.http_addr = parsed,
                Err(_) => log::warn!("Invalid CHATTR_HTTP_ADDR {addr:?}, using default"),
            }
        }

        if let Some(secs) = get("CHATTR_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(n) if n > 0 => {
                    config.translator.timeout_secs = n;
                    config.llm.timeout_secs = n;
                }
                _ => log::warn!("Invalid CHATTR_TIMEOUT_SECS {secs:?}, using default"),
            }
        }

        // -- Translation provider --

        config.translator.api_key = get("DEEPL_API_KEY");
        config.translator.api_url = get("DEEPL_API_URL");

        // -- Language-model provider --

        config.llm.api_key = get("OPENAI_API_KEY");

        if let Some(url) = get("OPENAI_BASE_URL") {
            config.llm.base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(model) = get("OPENAI_MODEL") {
            config.llm.model = model;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServerConfig::default());
        assert!(config.llm.api_key.is_none());
        assert!(config.translator.api_key.is_none());
        assert_eq!(config.llm.model, "gpt-3.5-turbo");
        assert_eq!(config.llm.max_tokens, 150);
    }

    #[test]
    fn reads_provider_keys() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DEEPL_API_KEY", "abc:fx"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:11434/"),
            ("OPENAI_MODEL", "qwen2.5:3b"),
            ("CHATTR_HTTP_ADDR", "0.0.0.0:9000"),
            ("CHATTR_TIMEOUT_SECS", "5"),
        ]));
        assert_eq!(config.translator.api_key.as_deref(), Some("abc:fx"));
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.llm.model, "qwen2.5:3b");
        assert_eq!(config.http_addr, ([0, 0, 0, 0], 9000).into());
        assert_eq!(config.llm.timeout_secs, 5);
        assert_eq!(config.translator.timeout_secs, 5);
    }

    #[test]
    fn blank_key_counts_as_unconfigured() {
        let config = ServerConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "  ")]));
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn invalid_addr_keeps_default() {
        let config = ServerConfig::from_lookup(lookup(&[("CHATTR_HTTP_ADDR", "nope")]));
        assert_eq!(config.http_addr, ServerConfig::default().http_addr);
    }

    #[test]
    fn deepl_url_follows_key_tier() {
        let mut t = TranslatorConfig::default();
        assert_eq!(t.base_url(), "https://api.deepl.com");
        t.api_key = Some("key:fx".into());
        assert_eq!(t.base_url(), "https://api-free.deepl.com");
        t.api_url = Some("http://127.0.0.1:9999/".into());
        assert_eq!(t.base_url(), "http://127.0.0.1:9999");
    }
}
