//! Runtime configuration

const API_URL_ENV: &str = "SONGS_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the catalog backend, without a trailing slash
    pub api_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_base_url(std::env::var(API_URL_ENV).ok())
    }

    fn from_base_url(value: Option<String>) -> Self {
        let api_base_url = value
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_base_url }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_base_url(None)
    }
}
