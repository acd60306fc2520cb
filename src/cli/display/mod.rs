//! Display framework for CLI output formatting.
//!
//! Shared primitives for styling and tables used across all commands.

pub mod colors;
pub mod table;

pub use colors::*;
pub use table::*;
