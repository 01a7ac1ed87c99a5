use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use nu_core::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://newsup-react-native-app-backend.onrender.com";

/// Client settings. Every field has a default so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sources queried in exam mode, and the ones offered by `nu sources`.
    pub sources: Vec<String>,
    /// Rows revealed per feed page.
    pub page_size: usize,
    /// Pause before another page is revealed.
    pub load_more_delay_ms: u64,
    /// When set, by-date requests carry `page=1&limit=<n>`.
    pub api_page_limit: Option<u32>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sources: [
                "The Hindu",
                "Times of India",
                "Hindustan Times",
                "Indian Express",
                "Economic Times",
                "Bussiness Standard",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            page_size: 10,
            load_more_delay_ms: 300,
            api_page_limit: None,
        }
    }
}

impl ClientConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be at least 1".to_string()));
        }
        if self.sources.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::Config("source names must not be blank".to_string()));
        }
        url::Url::parse(&self.base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        Ok(())
    }

    pub fn load_more_delay(&self) -> Duration {
        Duration::from_millis(self.load_more_delay_ms)
    }

    pub fn default_source(&self) -> &str {
        self.sources.first().map(String::as_str).unwrap_or("The Hindu")
    }
}
