//! vault-metrics - link, tag and size metrics for a markdown vault

pub mod cli;
pub mod domain;
pub mod engine;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_report, handle_stats},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;
    let notes_dir = config.notes_dir(cli.dir.as_ref());

    match &cli.command {
        Command::Report(args) => handle_report(args, &notes_dir, &config),
        Command::Stats(args) => handle_stats(args, &notes_dir),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Sets up `env_logger`; `RUST_LOG` overrides the level picked by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(verbose >= 2)
        .init();
}
