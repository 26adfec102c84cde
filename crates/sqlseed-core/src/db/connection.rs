use std::borrow::Cow;

use sqlx::{Connection, Executor, MySqlConnection, PgConnection, SqliteConnection};

use super::{database_type_from_url, sanitize_url, DatabaseType, SeedConnection};
use crate::error::{Result, SeedError};

/// A single live connection to one of the supported engines.
///
/// Statements go through `sqlx::raw_sql`, i.e. the simple query protocol:
/// seed SQL is sent exactly as written, with no prepare step and no bind
/// parameters. Transactions are plain `BEGIN` / `COMMIT` / `ROLLBACK` so
/// the executor controls their scope explicitly.
#[derive(Debug)]
pub enum SqlxConnection {
    Postgres(PgConnection),
    MySql(MySqlConnection),
    Sqlite(SqliteConnection),
}

impl SqlxConnection {
    /// Connect using the engine selected by the URL scheme.
    pub async fn connect(db_url: &str) -> Result<Self> {
        let db_type = database_type_from_url(db_url)?;
        let connection_error = |e: sqlx::Error| SeedError::Connection {
            message: format!("Failed to connect to {}", db_type),
            connection_hint: sanitize_url(db_url),
            source: e,
        };

        let conn = match db_type {
            DatabaseType::PostgreSQL => SqlxConnection::Postgres(
                PgConnection::connect(db_url)
                    .await
                    .map_err(connection_error)?,
            ),
            DatabaseType::MySQL => SqlxConnection::MySql(
                MySqlConnection::connect(db_url)
                    .await
                    .map_err(connection_error)?,
            ),
            DatabaseType::SQLite => SqlxConnection::Sqlite(
                SqliteConnection::connect(&sqlite_url(db_url))
                    .await
                    .map_err(connection_error)?,
            ),
        };

        tracing::debug!("Connected to {} at {}", db_type, sanitize_url(db_url));
        Ok(conn)
    }

    pub fn database_type(&self) -> DatabaseType {
        match self {
            SqlxConnection::Postgres(_) => DatabaseType::PostgreSQL,
            SqlxConnection::MySql(_) => DatabaseType::MySQL,
            SqlxConnection::Sqlite(_) => DatabaseType::SQLite,
        }
    }

    /// Close the connection gracefully.
    pub async fn close(self) -> sqlx::Result<()> {
        match self {
            SqlxConnection::Postgres(conn) => conn.close().await,
            SqlxConnection::MySql(conn) => conn.close().await,
            SqlxConnection::Sqlite(conn) => conn.close().await,
        }
    }

    async fn run(&mut self, sql: &str) -> sqlx::Result<u64> {
        let rows = match self {
            SqlxConnection::Postgres(conn) => {
                conn.execute(sqlx::raw_sql(sql)).await?.rows_affected()
            }
            SqlxConnection::MySql(conn) => conn.execute(sqlx::raw_sql(sql)).await?.rows_affected(),
            SqlxConnection::Sqlite(conn) => conn.execute(sqlx::raw_sql(sql)).await?.rows_affected(),
        };
        Ok(rows)
    }
}

impl SeedConnection for SqlxConnection {
    async fn begin(&mut self) -> sqlx::Result<()> {
        self.run("BEGIN").await.map(|_| ())
    }

    async fn execute(&mut self, sql: &str) -> sqlx::Result<u64> {
        self.run(sql).await
    }

    async fn commit(&mut self) -> sqlx::Result<()> {
        self.run("COMMIT").await.map(|_| ())
    }

    async fn rollback(&mut self) -> sqlx::Result<()> {
        self.run("ROLLBACK").await.map(|_| ())
    }
}

/// sqlx only parses the `sqlite:` scheme; `file:dev.db` becomes `sqlite:dev.db`.
fn sqlite_url(db_url: &str) -> Cow<'_, str> {
    match db_url.strip_prefix("file:") {
        Some(rest) => Cow::Owned(format!("sqlite:{}", rest)),
        None => Cow::Borrowed(db_url),
    }
}
