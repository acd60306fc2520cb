use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::lexicon::{ClusterMap, Lexicon, Vocabulary};
use crate::domain::errors::LexiconError;

/// Main configuration structure for the token sampler
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Seed for the random generator; entropy is used when unset
    #[serde(default)]
    pub seed: Option<u64>,

    /// Story prompt each result completes
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Default strategy parameters
    #[serde(default)]
    pub sampling: SamplingDefaults,

    /// Replacement vocabulary; the built-in one is used when unset
    #[serde(default)]
    pub vocabulary: Option<VocabularyConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_prompt() -> String {
    "The traveler decided to".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            prompt: default_prompt(),
            sampling: SamplingDefaults::default(),
            vocabulary: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Build the vocabulary this configuration describes.
    pub fn vocabulary(&self) -> Result<Vocabulary, LexiconError> {
        self.vocabulary
            .as_ref()
            .map_or_else(|| Ok(Vocabulary::builtin()), VocabularyConfig::build)
    }
}

/// Default parameters used when a request does not specify them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SamplingDefaults {
    /// Candidate count for top-k sampling
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Cumulative weight threshold for top-p sampling
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// 1-based position returned by systematic sampling
    #[serde(default = "default_systematic_n")]
    pub systematic_n: usize,

    /// Tokens drawn from each category by stratified sampling
    #[serde(default = "default_per_category")]
    pub per_category: usize,

    /// Categories pooled by cluster sampling
    #[serde(default = "default_num_clusters")]
    pub num_clusters: usize,

    /// Phrase length produced by cluster sampling
    #[serde(default = "default_num_words")]
    pub num_words: usize,

    /// Draws made by best-of-n sampling
    #[serde(default = "default_best_of_n")]
    pub best_of_n: usize,
}

const fn default_top_k() -> usize {
    3
}

const fn default_top_p() -> f64 {
    0.9
}

const fn default_systematic_n() -> usize {
    2
}

const fn default_per_category() -> usize {
    1
}

const fn default_num_clusters() -> usize {
    2
}

const fn default_num_words() -> usize {
    3
}

const fn default_best_of_n() -> usize {
    5
}

impl Default for SamplingDefaults {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            top_p: default_top_p(),
            systematic_n: default_systematic_n(),
            per_category: default_per_category(),
            num_clusters: default_num_clusters(),
            num_words: default_num_words(),
            best_of_n: default_best_of_n(),
        }
    }
}

/// A replacement vocabulary loaded from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VocabularyConfig {
    /// Entries in declaration order
    pub entries: Vec<VocabularyEntryConfig>,
}

/// One configured token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VocabularyEntryConfig {
    pub token: String,
    pub weight: f64,
    /// Category label; unclustered when absent
    #[serde(default)]
    pub category: Option<String>,
}

impl VocabularyConfig {
    pub fn build(&self) -> Result<Vocabulary, LexiconError> {
        let lexicon = Lexicon::new(
            self.entries
                .iter()
                .map(|entry| (entry.token.clone(), entry.weight)),
        )?;
        let clusters = ClusterMap::new(
            &lexicon,
            self.entries.iter().filter_map(|entry| {
                entry
                    .category
                    .as_ref()
                    .map(|category| (entry.token.clone(), category.clone()))
            }),
        )?;
        Ok(Vocabulary { lexicon, clusters })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    /// Directory for log files (optional, if None logs only to stderr)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Enable stderr logging
    #[serde(default = "default_true")]
    pub enable_stderr: bool,

    /// Log rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    #[default]
    Daily,
    Hourly,
    Never,
}

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

const fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            enable_stderr: default_true(),
            rotation: RotationPolicy::default(),
        }
    }
}
