use std::fmt;

use serde::Serialize;

use crate::classify::{describe_operations, DangerousOperation};
use crate::error::SeedError;

/// Why a dangerous file was not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// `--force` was not given.
    ForceRequired,
    /// `--force` was given but the operator answered no.
    ConfirmationDeclined,
}

/// Outcome of running one seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExecutionResult {
    /// Every statement ran and the transaction committed.
    Succeeded { statements: usize },
    /// Nothing from the file is committed.
    Failed {
        /// 1-based index of the statement the database rejected, if the
        /// failure was a statement failure.
        statement_index: Option<usize>,
        /// Truncated text of the failing statement.
        sql: Option<String>,
        message: String,
    },
    /// The file was never sent to the database.
    Blocked {
        operations: Vec<DangerousOperation>,
        reason: BlockReason,
    },
}

/// Bucket an `ExecutionResult` falls into, for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Succeeded,
    Failed,
    Blocked,
}

impl ExecutionResult {
    pub fn status(&self) -> ExecutionStatus {
        match self {
            ExecutionResult::Succeeded { .. } => ExecutionStatus::Succeeded,
            ExecutionResult::Failed { .. } => ExecutionStatus::Failed,
            ExecutionResult::Blocked { .. } => ExecutionStatus::Blocked,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status() == ExecutionStatus::Succeeded
    }

    /// 1-based index of the failing statement, when there is one.
    pub fn failed_statement(&self) -> Option<usize> {
        match self {
            ExecutionResult::Failed {
                statement_index, ..
            } => *statement_index,
            _ => None,
        }
    }
}

impl From<SeedError> for ExecutionResult {
    fn from(err: SeedError) -> Self {
        match err {
            SeedError::StatementFailed {
                index,
                sql_preview,
                source,
            } => ExecutionResult::Failed {
                statement_index: Some(index),
                sql: Some(sql_preview),
                message: source.to_string(),
            },
            other => ExecutionResult::Failed {
                statement_index: None,
                sql: None,
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionResult::Succeeded { statements } => {
                write!(f, "succeeded ({} statements)", statements)
            }
            ExecutionResult::Failed {
                statement_index: Some(index),
                message,
                ..
            } => write!(f, "failed at statement {}: {}", index, message),
            ExecutionResult::Failed { message, .. } => write!(f, "failed: {}", message),
            ExecutionResult::Blocked {
                operations,
                reason: BlockReason::ForceRequired,
            } => write!(
                f,
                "blocked: contains {} (re-run with --force to apply)",
                describe_operations(operations)
            ),
            ExecutionResult::Blocked {
                operations,
                reason: BlockReason::ConfirmationDeclined,
            } => write!(
                f,
                "blocked: contains {} (not confirmed)",
                describe_operations(operations)
            ),
        }
    }
}
