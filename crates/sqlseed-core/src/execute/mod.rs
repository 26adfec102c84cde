//! # Seed Execution
//!
//! Applies seed files to a database, one transaction per file:
//!
//! 1. Read the file. A read error fails the file.
//! 2. Classify it. A dangerous file is blocked unless force mode is on, and
//!    even then only runs after the operator confirms. Blocked files never
//!    open a transaction.
//! 3. Split into statements, `BEGIN`, run each statement in order.
//! 4. The first rejected statement rolls back the whole file and is
//!    reported with its 1-based index. Otherwise `COMMIT`.
//!
//! Atomicity is per file, not per batch: files committed earlier in a batch
//! stay committed when a later one fails. Seed files are expected to be
//! independent and idempotent for that reason. Errors are never retried.

pub mod operator;
pub mod report;
pub mod result;

use crate::classify::{classify, describe_operations, Classification};
use crate::db::{truncate_sql, SeedConnection};
use crate::discover::SeedFile;
use crate::error::{Result, SeedError};
use crate::sql::{split_statements, Statement};

pub use operator::Operator;
pub use report::{BatchCounts, BatchReport, FileOutcome};
pub use result::{BlockReason, ExecutionResult, ExecutionStatus};

/// Maximum characters of a failing statement kept for error reports.
const SQL_PREVIEW_CHARS: usize = 200;

/// Runs seed files against a connection, asking an operator when a
/// decision is needed.
pub struct SeedExecutor<'a, C, O> {
    conn: &'a mut C,
    operator: &'a mut O,
    force: bool,
}

impl<'a, C: SeedConnection, O: Operator> SeedExecutor<'a, C, O> {
    pub fn new(conn: &'a mut C, operator: &'a mut O, force: bool) -> Self {
        Self {
            conn,
            operator,
            force,
        }
    }

    /// Run a single seed file inside its own transaction.
    pub async fn execute_file(&mut self, file: &SeedFile) -> ExecutionResult {
        self.operator.file_started(file);
        let result = self.run_file(file).await;
        self.operator.file_finished(file, &result);
        result
    }

    /// Run files in order, asking the operator whether to go on after each
    /// file that doesn't succeed. Stopping records the rest as skipped.
    pub async fn execute_batch(&mut self, files: &[SeedFile]) -> BatchReport {
        let mut report = BatchReport::new();

        for (position, file) in files.iter().enumerate() {
            let result = self.execute_file(file).await;
            let remaining = &files[position + 1..];

            let stop = !result.is_success()
                && !remaining.is_empty()
                && !self.operator.continue_after_failure(file, &result);
            report.record(file, result);

            if stop {
                tracing::warn!(
                    "Batch stopped after {}; {} file(s) skipped",
                    file,
                    remaining.len()
                );
                report.skip(remaining);
                break;
            }
        }

        tracing::info!(
            "Batch finished: {} succeeded, {} failed, {} blocked, {} skipped",
            report.counts.succeeded,
            report.counts.failed,
            report.counts.blocked,
            report.counts.skipped
        );
        report
    }

    async fn run_file(&mut self, file: &SeedFile) -> ExecutionResult {
        let sql = match file.read() {
            Ok(sql) => sql,
            Err(e) => {
                tracing::warn!("{}", e);
                return e.into();
            }
        };

        if let Classification::Dangerous(operations) = classify(&sql) {
            if !self.force {
                tracing::warn!(
                    "{} contains {}; blocked without --force",
                    file,
                    describe_operations(&operations)
                );
                return ExecutionResult::Blocked {
                    operations,
                    reason: BlockReason::ForceRequired,
                };
            }
            if !self.operator.confirm_dangerous(file, &operations) {
                tracing::warn!("{} not confirmed; skipping dangerous file", file);
                return ExecutionResult::Blocked {
                    operations,
                    reason: BlockReason::ConfirmationDeclined,
                };
            }
            tracing::warn!(
                "Running {} with {} (confirmed)",
                file,
                describe_operations(&operations)
            );
        }

        let statements = split_statements(&sql);
        match self.apply(&statements).await {
            Ok(()) => {
                tracing::info!("Seeded {} ({} statements)", file, statements.len());
                ExecutionResult::Succeeded {
                    statements: statements.len(),
                }
            }
            Err(e) => {
                tracing::warn!("{} rolled back: {}", file, e);
                e.into()
            }
        }
    }

    /// Run statements in one transaction; any failure rolls it back.
    async fn apply(&mut self, statements: &[Statement]) -> Result<()> {
        self.conn
            .begin()
            .await
            .map_err(|e| SeedError::Transaction {
                action: "begin",
                source: e,
            })?;

        for statement in statements {
            tracing::debug!(
                "Statement {}/{}: {}",
                statement.index,
                statements.len(),
                truncate_sql(&statement.sql, SQL_PREVIEW_CHARS)
            );

            if let Err(e) = self.conn.execute(&statement.sql).await {
                self.rollback().await;
                return Err(SeedError::StatementFailed {
                    index: statement.index,
                    sql_preview: truncate_sql(&statement.sql, SQL_PREVIEW_CHARS),
                    source: e,
                });
            }
        }

        if let Err(e) = self.conn.commit().await {
            self.rollback().await;
            return Err(SeedError::Transaction {
                action: "commit",
                source: e,
            });
        }
        Ok(())
    }

    async fn rollback(&mut self) {
        // The original error is what gets reported; a failed rollback is
        // resolved by the server aborting the transaction.
        if let Err(e) = self.conn.rollback().await {
            tracing::warn!("Rollback failed: {}", e);
        }
    }
}
