use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the transcript extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP client settings
    pub http: HttpConfig,

    /// Resolution strategy settings
    pub strategies: StrategyConfig,

    /// Batch processing settings
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout for config/page fetches (seconds)
    pub fetch_timeout: u64,

    /// Timeout for individual candidate probes (seconds)
    pub probe_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Enable the player config strategy
    pub player_config: bool,

    /// Enable the candidate id brute-force strategy
    pub pattern_probe: bool,

    /// Enable the page scraping strategy
    pub page_scrape: bool,

    /// Enable the browser automation strategy (requires a browser session)
    pub browser: bool,

    /// Extra known-good text-track tokens to probe with, besides the
    /// built-in one
    pub extra_tokens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum concurrent extractions in a batch
    pub max_concurrent: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            strategies: StrategyConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: 12,
            probe_timeout: 8,
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            player_config: true,
            pattern_probe: true,
            page_scrape: true,
            browser: false,
            extra_tokens: Vec::new(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_concurrent: 4 }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.fetch_timeout, 12);
        assert_eq!(config.http.probe_timeout, 8);
        assert!(config.strategies.player_config);
        assert!(!config.strategies.browser);
        assert_eq!(config.batch.max_concurrent, 4);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("[http]\nprobe_timeout = 5\n").unwrap();
        assert_eq!(config.http.probe_timeout, 5);
        assert_eq!(config.http.fetch_timeout, 12);
        assert!(config.strategies.page_scrape);
    }
}
