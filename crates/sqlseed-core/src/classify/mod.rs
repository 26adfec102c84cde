//! # Danger Classification
//!
//! Decides whether a seed file may run unattended. Seed files are meant to
//! be append-only and idempotent (`INSERT ... ON CONFLICT DO NOTHING`), so
//! any statement that can destroy data marks the whole file as dangerous:
//!
//! - `DELETE FROM`
//! - `TRUNCATE [TABLE]`
//! - `DROP TABLE | SCHEMA | DATABASE | INDEX | VIEW | FUNCTION | TRIGGER`
//! - `ALTER TABLE ... DROP`
//!
//! Classification is file-level. A file mixing safe inserts with a single
//! `DROP` is dangerous as a whole, and its safe statements never run on
//! their own.

pub mod rules;

use std::fmt;

use serde::Serialize;

pub use rules::classify;

/// A kind of destructive operation detected in a seed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DangerousOperation {
    DeleteFrom,
    Truncate,
    DropTable,
    DropSchema,
    DropDatabase,
    DropIndex,
    DropView,
    DropFunction,
    DropTrigger,
    AlterTableDrop,
}

impl fmt::Display for DangerousOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DangerousOperation::DeleteFrom => "DELETE FROM",
            DangerousOperation::Truncate => "TRUNCATE",
            DangerousOperation::DropTable => "DROP TABLE",
            DangerousOperation::DropSchema => "DROP SCHEMA",
            DangerousOperation::DropDatabase => "DROP DATABASE",
            DangerousOperation::DropIndex => "DROP INDEX",
            DangerousOperation::DropView => "DROP VIEW",
            DangerousOperation::DropFunction => "DROP FUNCTION",
            DangerousOperation::DropTrigger => "DROP TRIGGER",
            DangerousOperation::AlterTableDrop => "ALTER TABLE ... DROP",
        };
        f.write_str(s)
    }
}

/// Outcome of classifying a seed file's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "operations", rename_all = "snake_case")]
pub enum Classification {
    Safe,
    /// Distinct operations found, in rule order.
    Dangerous(Vec<DangerousOperation>),
}

impl Classification {
    pub fn is_dangerous(&self) -> bool {
        matches!(self, Classification::Dangerous(_))
    }

    /// Operations found; empty when safe.
    pub fn operations(&self) -> &[DangerousOperation] {
        match self {
            Classification::Safe => &[],
            Classification::Dangerous(ops) => ops,
        }
    }
}

/// Render a list of operations for terminal output, e.g. `DELETE FROM, DROP TABLE`.
pub fn describe_operations(operations: &[DangerousOperation]) -> String {
    operations
        .iter()
        .map(|op| op.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
