use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    pub gemini_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,

    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    #[serde(default = "default_timeout_secs")]
    pub completion_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_news_feeds")]
    pub news_feeds: Vec<FeedSource>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-20241022".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_news_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource {
            name: "MIT Technology Review".to_string(),
            url: "https://www.technologyreview.com/feed/".to_string(),
        },
        FeedSource {
            name: "TechCrunch".to_string(),
            url: "https://techcrunch.com/feed/".to_string(),
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            gemini_api_key: None,
            anthropic_api_key: None,
            gemini_model: default_gemini_model(),
            anthropic_model: default_anthropic_model(),
            completion_timeout_secs: default_timeout_secs(),
            fetch_timeout_secs: default_timeout_secs(),
            news_feeds: default_news_feeds(),
        }
    }
}

impl Config {
    /// Load the config file (creating it on first run) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Secrets and the bind address may come from the environment instead of the file.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY") {
            self.gemini_api_key = Some(key);
        }
        if let Some(key) = non_empty("ANTHROPIC_API_KEY") {
            self.anthropic_api_key = Some(key);
        }
        if let Some(addr) = non_empty("POST_WIZARD_ADDR") {
            self.listen_addr = addr;
        }
    }

    pub fn completion_timeout(&self) -> Duration {
        Duration::from_secs(self.completion_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("post-wizard")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.completion_timeout_secs, 10);
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.news_feeds.len(), 2);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "gemini_api_key = \"g-key\"\ncompletion_timeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.gemini_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.completion_timeout(), Duration::from_secs(5));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.gemini_model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "listen_addr = [").unwrap();

        assert!(matches!(Config::load_from(&path), Err(AppError::Toml(_))));
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("GEMINI_API_KEY", "from-env"),
            ("ANTHROPIC_API_KEY", "  "),
            ("POST_WIZARD_ADDR", "0.0.0.0:8080"),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            anthropic_api_key: Some("from-file".to_string()),
            ..Config::default()
        };
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.gemini_api_key.as_deref(), Some("from-env"));
        assert_eq!(config.anthropic_api_key.as_deref(), Some("from-file"));
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }
}
