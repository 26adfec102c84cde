use std::fs;

use sqlseed_core::classify::DangerousOperation;
use sqlseed_core::db::SeedConnection;
use sqlseed_core::discover::SeedFile;
use sqlseed_core::execute::{ExecutionResult, Operator};
use tempfile::TempDir;

/// A call made against `MockConnection`, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Begin,
    Execute(String),
    Commit,
    Rollback,
}

/// In-memory transactional connection.
///
/// Statements executed inside a transaction land in `pending` and move to
/// `committed` on commit; rollback discards them. Any statement containing
/// one of `fail_on` is rejected with a protocol error.
#[derive(Debug, Default)]
pub struct MockConnection {
    pub calls: Vec<Call>,
    pub committed: Vec<String>,
    pub pending: Vec<String>,
    pub fail_on: Vec<String>,
    pub fail_commit: bool,
    in_transaction: bool,
}

impl MockConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any statement containing `needle`.
    pub fn failing_on(needle: &str) -> Self {
        Self {
            fail_on: vec![needle.to_string()],
            ..Self::default()
        }
    }

    /// Accept every statement but fail the commit.
    pub fn failing_commit() -> Self {
        Self {
            fail_commit: true,
            ..Self::default()
        }
    }

    pub fn transactions_begun(&self) -> usize {
        self.calls.iter().filter(|c| **c == Call::Begin).count()
    }

    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }
}

impl SeedConnection for MockConnection {
    async fn begin(&mut self) -> sqlx::Result<()> {
        self.calls.push(Call::Begin);
        if self.in_transaction {
            return Err(sqlx::Error::Protocol("transaction already open".to_string()));
        }
        self.in_transaction = true;
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> sqlx::Result<u64> {
        self.calls.push(Call::Execute(sql.to_string()));
        if !self.in_transaction {
            return Err(sqlx::Error::Protocol(
                "statement outside transaction".to_string(),
            ));
        }
        if self.fail_on.iter().any(|needle| sql.contains(needle.as_str())) {
            return Err(sqlx::Error::Protocol(format!("rejected: {}", sql)));
        }
        self.pending.push(sql.to_string());
        Ok(1)
    }

    async fn commit(&mut self) -> sqlx::Result<()> {
        self.calls.push(Call::Commit);
        if self.fail_commit {
            return Err(sqlx::Error::Protocol("commit failed".to_string()));
        }
        self.in_transaction = false;
        self.committed.append(&mut self.pending);
        Ok(())
    }

    async fn rollback(&mut self) -> sqlx::Result<()> {
        self.calls.push(Call::Rollback);
        self.in_transaction = false;
        self.pending.clear();
        Ok(())
    }
}

/// Operator with fixed answers that records every question asked.
#[derive(Debug)]
pub struct ScriptedOperator {
    pub confirm_answer: bool,
    pub continue_answer: bool,
    pub confirm_requests: Vec<(String, Vec<DangerousOperation>)>,
    pub continue_requests: Vec<String>,
    pub started: Vec<String>,
    pub finished: Vec<String>,
}

impl ScriptedOperator {
    pub fn new(confirm_answer: bool, continue_answer: bool) -> Self {
        Self {
            confirm_answer,
            continue_answer,
            confirm_requests: Vec::new(),
            continue_requests: Vec::new(),
            started: Vec::new(),
            finished: Vec::new(),
        }
    }
}

impl Default for ScriptedOperator {
    /// Declines dangerous files, continues after failures (the prompt defaults).
    fn default() -> Self {
        Self::new(false, true)
    }
}

impl Operator for ScriptedOperator {
    fn confirm_dangerous(&mut self, file: &SeedFile, operations: &[DangerousOperation]) -> bool {
        self.confirm_requests
            .push((file.name.clone(), operations.to_vec()));
        self.confirm_answer
    }

    fn continue_after_failure(&mut self, file: &SeedFile, _result: &ExecutionResult) -> bool {
        self.continue_requests.push(file.name.clone());
        self.continue_answer
    }

    fn file_started(&mut self, file: &SeedFile) {
        self.started.push(file.name.clone());
    }

    fn file_finished(&mut self, file: &SeedFile, _result: &ExecutionResult) {
        self.finished.push(file.name.clone());
    }
}

/// Write `(name, contents)` pairs into a fresh temporary seeds directory.
pub fn seed_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp seeds dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write seed file");
    }
    dir
}

/// Reference-data seed: idempotent inserts, one with a semicolon in a value.
pub const ROLES_SEED: &str = "\
-- Roles used by the permission checks
INSERT INTO roles (id, name) VALUES (1, 'admin') ON CONFLICT DO NOTHING;
INSERT INTO roles (id, name) VALUES (2, 'manager') ON CONFLICT DO NOTHING;
INSERT INTO roles (id, name) VALUES (3, 'staff; contract') ON CONFLICT DO NOTHING;
";

/// Leave types seed: safe.
pub const LEAVE_TYPES_SEED: &str = "\
/* Annual and medical leave entitlements */
INSERT INTO leave_types (code, days) VALUES ('AL', 14) ON CONFLICT DO NOTHING;
INSERT INTO leave_types (code, days) VALUES ('MC', 14) ON CONFLICT DO NOTHING;
";

/// Seed that wipes a table first: dangerous.
pub const RESET_CLAIMS_SEED: &str = "\
DELETE FROM claims WHERE status = 'draft';
INSERT INTO claims (id, status) VALUES (1, 'submitted') ON CONFLICT DO NOTHING;
";

/// Only comments and whitespace.
pub const EMPTY_SEED: &str = "\
-- Placeholder for holiday calendars.
/* INSERT INTO holidays VALUES ('2025-01-01'); */

";
