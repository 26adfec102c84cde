use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "sqlseed",
    about = "Apply SQL seed files to a database, one transaction per file",
    version,
    after_help = "Examples:\n  sqlseed                                  # run every .sql file in database/seeds\n  sqlseed 003_leave_types.sql              # run a single file\n  sqlseed --force 009_reset_claims.sql     # allow DELETE/TRUNCATE/DROP after confirmation\n  sqlseed --dry-run                        # show what would run, without connecting\n  sqlseed --db postgres://localhost/app --dir seeds --format json"
)]
pub struct Cli {
    /// Seed file to run (a name inside the seeds directory, or a path).
    /// Every file in the directory runs when omitted.
    pub file: Option<String>,

    /// Allow files containing DELETE/TRUNCATE/DROP to run after confirmation
    #[arg(long)]
    pub force: bool,

    /// Seeds directory (default: sqlseed.toml [seeds] directory, then database/seeds)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Database connection URL (postgres://, mysql://, sqlite://, file:)
    /// Falls back to DATABASE_URL env var, .env file, or sqlseed.toml
    #[arg(long, env = "DATABASE_URL")]
    pub db: Option<String>,

    /// Classify and split files without connecting to the database
    #[arg(long)]
    pub dry_run: bool,

    /// Output format for the final report
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
