//! Domain errors for the token sampler.

use thiserror::Error;

/// Errors raised while building a lexicon or cluster map.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexiconError {
    #[error("Lexicon must contain at least one token")]
    Empty,

    #[error("Token cannot be empty")]
    EmptyToken,

    #[error("Invalid weight for '{token}': {weight}. Must be in (0, 1]")]
    InvalidWeight { token: String, weight: f64 },

    #[error("Duplicate token: '{0}'")]
    DuplicateToken(String),

    #[error("Clustered token '{0}' is not in the lexicon")]
    UnknownClusteredToken(String),

    #[error("Category label for '{0}' cannot be empty")]
    EmptyCategory(String),
}

/// Parameter validation errors raised by the sampling strategies.
///
/// These signal misuse of a strategy. Requests that are well formed but cannot
/// be satisfied by the data are reported through [`Sample`] sentinels instead.
///
/// [`Sample`]: crate::domain::models::Sample
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SamplingError {
    #[error("Invalid k: 0. Must be at least 1")]
    ZeroTopK,

    #[error("Invalid p: {0}. Must be in (0, 1]")]
    InvalidTopP(f64),

    #[error("Invalid n: {n}. Must be between 1 and {vocabulary_size}")]
    SystematicOutOfRange { n: usize, vocabulary_size: usize },

    #[error("Invalid n: 0. Best-of-n needs at least one draw")]
    ZeroBestOfN,

    #[error("Invalid per-category count: 0. Must be at least 1")]
    ZeroPerCategory,

    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    #[error("Invalid number of clusters: 0. Must be at least 1")]
    ZeroClusters,

    #[error("Requested {requested} clusters but only {available} exist")]
    TooManyClusters { requested: usize, available: usize },

    #[error("Invalid number of words: 0. Must be at least 1")]
    ZeroWords,

    #[error("Unknown sampling method: '{0}'")]
    UnknownMethod(String),

    #[error("Adjusted weights sum to zero; nothing to draw from")]
    DegenerateWeights,
}

pub type SamplingResult<T> = Result<T, SamplingError>;

impl From<rand::distributions::WeightedError> for SamplingError {
    fn from(_: rand::distributions::WeightedError) -> Self {
        Self::DegenerateWeights
    }
}
