//! Token Sampler - an interactive tour of token sampling strategies
//!
//! A small, fixed vocabulary with hand-assigned weights and category labels is
//! sampled with the policies used in text generation: greedy, beam, simple
//! random, top-k, top-p, systematic, stratified, temperature, cluster and
//! best-of-n.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): vocabulary, sample results, strategy identifiers, errors
//! - **Service Layer** (`services`): the strategies and their dispatcher
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface and interactive picker
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use token_sampler::domain::models::Lexicon;
//! use token_sampler::services::sampling;
//!
//! let lexicon = Lexicon::new([("a", 0.5), ("b", 0.3), ("c", 0.2)]).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! assert_eq!(sampling::greedy(&lexicon).to_string(), "a");
//! assert_eq!(sampling::top_k(&lexicon, 1, &mut rng).unwrap().to_string(), "a");
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{LexiconError, SamplingError, SamplingResult};
pub use domain::models::{
    ClusterMap, Config, Lexicon, Sample, SamplingDefaults, SamplingRequest, StrategyKind,
    TemperatureLevel, Vocabulary,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{Sampler, Tally};
