//! Sampling services
//!
//! `sampling` holds the strategies as free functions; `sampler` dispatches
//! requests to them over an owned vocabulary and random generator.

pub mod sampler;
pub mod sampling;

pub use sampler::{Sampler, Tally, TallyRow};
