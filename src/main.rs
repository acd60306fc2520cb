//! Token Sampler CLI entry point.

use anyhow::Result;
use clap::Parser;

use token_sampler::cli::{commands, AppContext, Cli, Commands};
use token_sampler::infrastructure::config::ConfigLoader;
use token_sampler::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli) {
        token_sampler::cli::handle_error(err, json);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ConfigLoader::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }

    let _logger = LoggerImpl::init(&config.logging)?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Sample(args) => commands::sample::execute(args, &ctx, cli.json),
        Commands::Simulate(args) => commands::simulate::execute(args, &ctx, cli.json),
        Commands::Methods => commands::methods::execute(&ctx, cli.json),
        Commands::Vocab => commands::vocab::execute(&ctx, cli.json),
        Commands::Interactive => commands::interactive::execute(&ctx),
    }
}
