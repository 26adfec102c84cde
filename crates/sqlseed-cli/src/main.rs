use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod commands;
mod prompt;

use args::Cli;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise -v raises the default level
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = if cli.dry_run {
        commands::plan::run(&cli)
    } else {
        commands::seed::run(&cli).await
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(1);
        }
    }
}
