//! Command-line interface.

pub mod commands;
pub mod display;
pub mod output;
pub mod progress;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::models::{Config, Vocabulary};

pub use commands::ParamArgs;

#[derive(Parser, Debug)]
#[command(
    name = "token-sampler",
    version,
    about = "Explore different token sampling techniques"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Seed the random generator for reproducible results
    #[arg(long, global = true, env = "TOKEN_SAMPLER_SEED")]
    pub seed: Option<u64>,

    /// Additional YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one sampling method once
    Sample(commands::sample::SampleArgs),

    /// Run one sampling method many times and tally the results
    Simulate(commands::simulate::SimulateArgs),

    /// List the available sampling methods
    Methods,

    /// Show the vocabulary and its categories
    Vocab,

    /// Pick methods and parameters from a menu
    Interactive,
}

/// Everything a command needs, built once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub vocabulary: Vocabulary,
}

impl AppContext {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let vocabulary = config.vocabulary()?;
        Ok(Self { config, vocabulary })
    }
}

/// Print an error (with its cause chain) and exit non-zero.
pub fn handle_error(err: anyhow::Error, json: bool) -> ! {
    if json {
        let causes: Vec<String> = err.chain().skip(1).map(ToString::to_string).collect();
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": causes,
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
    }
    std::process::exit(1);
}
