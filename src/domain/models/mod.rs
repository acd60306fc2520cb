//! Domain models

pub mod config;
pub mod lexicon;
pub mod sample;
pub mod strategy;

pub use config::{
    Config, LogFormat, LoggingConfig, RotationPolicy, SamplingDefaults, VocabularyConfig,
    VocabularyEntryConfig,
};
pub use lexicon::{ClusterMap, Lexicon, LexiconEntry, Vocabulary};
pub use sample::Sample;
pub use strategy::{SamplingRequest, StrategyKind, TemperatureLevel};
