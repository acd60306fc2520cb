//! Domain layer for the token sampler
//!
//! Vocabulary, sample results, strategy identifiers and configuration types.

pub mod errors;
pub mod models;

pub use errors::{LexiconError, SamplingError, SamplingResult};
