use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::errors::LexiconError;
use crate::domain::models::config::Config;

/// Project-local configuration directory.
pub const CONFIG_DIR: &str = ".token-sampler";

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "TOKEN_SAMPLER_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid sampling.top_k: 0. Must be at least 1")]
    InvalidTopK,

    #[error("Invalid sampling.top_p: {0}. Must be in (0, 1]")]
    InvalidTopP(f64),

    #[error("Invalid sampling.{field}: 0. Must be at least 1")]
    ZeroCount { field: &'static str },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Prompt cannot be empty")]
    EmptyPrompt,

    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(#[from] LexiconError),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .token-sampler/config.yaml (project config)
    /// 3. .token-sampler/local.yaml (project local overrides, optional)
    /// 4. `explicit` file passed with --config, if any
    /// 5. Environment variables (`TOKEN_SAMPLER_*` prefix, highest priority)
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("config.yaml")))
            .merge(Yaml::file(Path::new(CONFIG_DIR).join("local.yaml")));

        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }

        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let sampling = &config.sampling;

        if sampling.top_k == 0 {
            return Err(ConfigError::InvalidTopK);
        }

        if sampling.top_p.is_nan() || sampling.top_p <= 0.0 || sampling.top_p > 1.0 {
            return Err(ConfigError::InvalidTopP(sampling.top_p));
        }

        let counts = [
            ("systematic_n", sampling.systematic_n),
            ("per_category", sampling.per_category),
            ("num_clusters", sampling.num_clusters),
            ("num_words", sampling.num_words),
            ("best_of_n", sampling.best_of_n),
        ];
        if let Some(&(field, _)) = counts.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroCount { field });
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.prompt.trim().is_empty() {
            return Err(ConfigError::EmptyPrompt);
        }

        // Building the vocabulary checks weights, duplicates and cluster membership
        config.vocabulary()?;

        Ok(())
    }
}
