//! # Database Boundary
//!
//! The executor needs exactly four things from a database: begin a
//! transaction, run one raw statement, commit, and roll back. That surface is
//! the `SeedConnection` trait. Nothing here knows about schemas or ORMs.
//!
//! `SqlxConnection` is the production implementation, one sqlx connection
//! for PostgreSQL, MySQL or SQLite picked from the URL scheme.

pub mod connection;

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SeedError};

pub use connection::SqlxConnection;

/// Transactional raw-SQL capability the executor runs seed files against.
///
/// Calls arrive strictly in order: `begin`, zero or more `execute`, then
/// exactly one of `commit` or `rollback`.
pub trait SeedConnection: Send {
    /// Open a transaction.
    fn begin(&mut self) -> impl std::future::Future<Output = sqlx::Result<()>> + Send;

    /// Execute one statement, returning the number of rows affected.
    fn execute(&mut self, sql: &str)
        -> impl std::future::Future<Output = sqlx::Result<u64>> + Send;

    /// Commit the open transaction.
    fn commit(&mut self) -> impl std::future::Future<Output = sqlx::Result<()>> + Send;

    /// Roll back the open transaction.
    fn rollback(&mut self) -> impl std::future::Future<Output = sqlx::Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DatabaseType {
    PostgreSQL,
    MySQL,
    SQLite,
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseType::PostgreSQL => write!(f, "PostgreSQL"),
            DatabaseType::MySQL => write!(f, "MySQL"),
            DatabaseType::SQLite => write!(f, "SQLite"),
        }
    }
}

/// Determine the database type from a connection URL's scheme.
pub fn database_type_from_url(url: &str) -> Result<DatabaseType> {
    let scheme = url.split(':').next().unwrap_or("");
    match scheme {
        "postgres" | "postgresql" => Ok(DatabaseType::PostgreSQL),
        "mysql" | "mariadb" => Ok(DatabaseType::MySQL),
        "sqlite" | "file" => Ok(DatabaseType::SQLite),
        other => Err(SeedError::UnsupportedDatabase {
            scheme: other.to_string(),
        }),
    }
}

/// Sanitize a database URL for error messages (hide password).
///
/// Uses the `url` crate for RFC 3986 parsing, so encoded characters,
/// unusual ports and query parameters survive intact.
pub fn sanitize_url(db_url: &str) -> String {
    if let Ok(mut parsed) = url::Url::parse(db_url) {
        if parsed.password().is_some() {
            let _ = parsed.set_password(Some("****"));
        }
        return parsed.to_string();
    }
    // Not a URL (e.g. a bare SQLite path): nothing to hide
    db_url.to_string()
}

/// Truncate a SQL string for error messages.
pub fn truncate_sql(sql: &str, max_chars: usize) -> String {
    match sql.char_indices().nth(max_chars) {
        None => sql.to_string(),
        Some((cut, _)) => format!("{}...", &sql[..cut]),
    }
}
