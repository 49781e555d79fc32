use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub decoder: DecoderConfig,
}

/// Inference backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the Gemini API, including the version segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    #[serde(default = "default_model")]
    pub model: String,
    /// Direct API key. Takes precedence over `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable consulted when `api_key` is unset.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// TCP connect timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Which image decoding path to use for user-picked content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderPreference {
    /// Let the runtime pick the best available decoder.
    #[default]
    Auto,
    /// Read the whole stream into memory before decoding.
    Buffered,
    /// Decode directly from a buffered reader.
    Streaming,
}

/// Image decoder settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecoderConfig {
    #[serde(default)]
    pub strategy: DecoderPreference,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_connect_timeout() -> u32 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            api_key_env: default_api_key_env(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl BackendConfig {
    /// Resolve the API key, preferring the inline value over the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}
