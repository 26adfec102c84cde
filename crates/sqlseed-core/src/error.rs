//! # Error Types
//!
//! Defines `SeedError`, the unified error enum for every failure mode in
//! sqlseed. Each variant carries the path, statement index or SQL snippet
//! needed to fix the seed file without re-running with extra logging.
//!
//! Per-file failures (read errors, statement errors, transaction errors) are
//! converted into an `ExecutionResult` at the file boundary. Only setup
//! failures (missing directory, bad config, connection) reach the caller.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur in sqlseed operations.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Seeds directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Seed file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read seed file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Statement {index} failed: {source}\n  SQL: {sql_preview}")]
    StatementFailed {
        index: usize,
        sql_preview: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to {action} transaction: {source}")]
    Transaction {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database connection failed: {message}\n  Connection string: {connection_hint}\n  Cause: {source}")]
    Connection {
        message: String,
        connection_hint: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("No database URL provided. sqlseed looks for a connection in this order:\n  1. --db flag\n  2. DATABASE_URL environment variable\n  3. .env file with DATABASE_URL\n  4. sqlseed.toml [database] section\n\nExample: sqlseed --db postgres://localhost/myapp")]
    NoDatabaseUrl,

    #[error("Unsupported database scheme '{scheme}'. Supported: postgres://, mysql://, sqlite://, file:")]
    UnsupportedDatabase { scheme: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl SeedError {
    /// 1-based index of the failing statement, for statement errors.
    pub fn statement_index(&self) -> Option<usize> {
        match self {
            SeedError::StatementFailed { index, .. } => Some(*index),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;
