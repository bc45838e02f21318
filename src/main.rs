//! docroute - documentation route tooling CLI.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use docroute::cli::{self, Cli, Commands};
use docroute::config::Config;
use docroute::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(&cli)?;
    logger::set_verbose(cli.verbose || config.debug);

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Query { args } => cli::query::run_query(args, &config),
    }
}
