//! Runtime settings: defaults, an optional YAML file, then CLI overrides.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0"
//! timeout_secs: 10
//! cache_ttl_secs: 3600
//! container_selector: "article.product_pod"
//! title_selector: "h3 a"
//! title_attribute: "title"
//! ```
//!
//! Missing keys fall back to the defaults above.

use crate::cache::DEFAULT_TTL;
use crate::cli::Cli;
use crate::extractor::{
    DEFAULT_CONTAINER_SELECTOR, DEFAULT_TITLE_ATTRIBUTE, DEFAULT_TITLE_SELECTOR, Extractor,
    SelectorError,
};
use crate::fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Selector(#[from] SelectorError),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub cache_ttl_secs: u64,
    pub container_selector: String,
    pub title_selector: String,
    pub title_attribute: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            cache_ttl_secs: DEFAULT_TTL.as_secs(),
            container_selector: DEFAULT_CONTAINER_SELECTOR.to_string(),
            title_selector: DEFAULT_TITLE_SELECTOR.to_string(),
            title_attribute: DEFAULT_TITLE_ATTRIBUTE.to_string(),
        }
    }
}

impl Settings {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, ConfigError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_string(),
                source,
            })?;
        let settings = Self::from_yaml_str(&raw)?;
        info!("Loaded settings file");
        Ok(settings)
    }

    /// Resolve settings for a CLI invocation: file (if any), then flags.
    pub async fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let base = match cli.config.as_deref() {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        let settings = base.with_overrides(cli);
        settings.validate()?;
        debug!(?settings, "Resolved settings");
        Ok(settings)
    }

    /// Apply any tuning flags the user actually passed.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(agent) = &cli.user_agent {
            self.user_agent = agent.clone();
        }
        if let Some(secs) = cli.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(secs) = cli.cache_ttl_secs {
            self.cache_ttl_secs = secs;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".into()));
        }
        if self.title_attribute.trim().is_empty() {
            return Err(ConfigError::Invalid("title_attribute must not be empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn extractor(&self) -> Result<Extractor, ConfigError> {
        Ok(Extractor::new(
            &self.container_selector,
            &self.title_selector,
            &self.title_attribute,
        )?)
    }
}
