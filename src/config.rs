// src/config.rs

//! Application configuration structures and loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Document import behavior settings
    #[serde(default)]
    pub importer: ImporterConfig,

    /// Search index generation settings
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.importer.user_agent.trim().is_empty() {
            return Err(AppError::validation("importer.user_agent is empty"));
        }
        if self.importer.timeout_secs == 0 {
            return Err(AppError::validation("importer.timeout_secs must be > 0"));
        }
        if self.importer.max_concurrent_downloads == 0 {
            return Err(AppError::validation(
                "importer.max_concurrent_downloads must be > 0",
            ));
        }
        if self.search.min_token_length == 0 {
            return Err(AppError::validation("search.min_token_length must be > 0"));
        }
        if self.search.max_tokens_per_article == 0 {
            return Err(AppError::validation(
                "search.max_tokens_per_article must be > 0",
            ));
        }
        Ok(())
    }
}

/// HTTP client and document import behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImporterConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum concurrent media downloads during an import
    #[serde(default = "defaults::max_concurrent_downloads")]
    pub max_concurrent_downloads: usize,
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_concurrent_downloads: defaults::max_concurrent_downloads(),
        }
    }
}

/// Search index generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum token length to index
    #[serde(default = "defaults::min_token_length")]
    pub min_token_length: usize,

    /// Maximum tokens indexed per article
    #[serde(default = "defaults::max_tokens_per_article")]
    pub max_tokens_per_article: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_token_length: defaults::min_token_length(),
            max_tokens_per_article: defaults::max_tokens_per_article(),
        }
    }
}

mod defaults {
    // Importer defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; masthead/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn max_concurrent_downloads() -> usize {
        5
    }

    // Search defaults
    pub fn min_token_length() -> usize {
        2
    }
    pub fn max_tokens_per_article() -> usize {
        200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.importer.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.importer.max_concurrent_downloads = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.importer.timeout_secs, 30);
    }

    #[test]
    fn parse_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [importer]
            timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.importer.timeout_secs, 10);
        assert_eq!(config.search.min_token_length, 2);
    }
}
