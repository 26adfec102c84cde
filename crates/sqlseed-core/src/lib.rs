pub mod classify;
pub mod config;
pub mod db;
pub mod discover;
pub mod error;
pub mod execute;
pub mod plan;
pub mod sql;

// Re-export key types for convenience
pub use classify::{classify, Classification, DangerousOperation};
pub use db::{SeedConnection, SqlxConnection};
pub use discover::{discover_files, resolve_file, SeedFile};
pub use error::{Result, SeedError};
pub use execute::{BatchReport, ExecutionResult, Operator, SeedExecutor};
pub use sql::{split_statements, Statement};
