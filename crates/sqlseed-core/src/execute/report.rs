use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::discover::SeedFile;

use super::result::{ExecutionResult, ExecutionStatus};

/// Per-bucket file counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchCounts {
    pub succeeded: usize,
    pub failed: usize,
    pub blocked: usize,
    pub skipped: usize,
}

/// The result of one file within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file: String,
    pub result: ExecutionResult,
}

/// Aggregate outcome of a batch run, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub counts: BatchCounts,
    pub outcomes: Vec<FileOutcome>,
    /// Files never attempted because the operator stopped the batch.
    pub skipped: Vec<String>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            counts: BatchCounts::default(),
            outcomes: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn record(&mut self, file: &SeedFile, result: ExecutionResult) {
        match result.status() {
            ExecutionStatus::Succeeded => self.counts.succeeded += 1,
            ExecutionStatus::Failed => self.counts.failed += 1,
            ExecutionStatus::Blocked => self.counts.blocked += 1,
        }
        self.outcomes.push(FileOutcome {
            file: file.name.clone(),
            result,
        });
    }

    pub fn skip(&mut self, files: &[SeedFile]) {
        self.counts.skipped += files.len();
        self.skipped.extend(files.iter().map(|f| f.name.clone()));
    }

    /// True when every file was attempted and succeeded.
    pub fn is_success(&self) -> bool {
        self.counts.failed == 0 && self.counts.blocked == 0 && self.counts.skipped == 0
    }

    /// Human-readable summary for terminal output.
    pub fn summary(&self) -> String {
        if self.outcomes.is_empty() && self.skipped.is_empty() {
            return "No seed files were run.".to_string();
        }

        let mut lines = Vec::new();
        for outcome in &self.outcomes {
            let mark = match outcome.result.status() {
                ExecutionStatus::Succeeded => "✓",
                ExecutionStatus::Failed => "✗",
                ExecutionStatus::Blocked => "!",
            };
            lines.push(format!("  {} {}: {}", mark, outcome.file, outcome.result));
        }
        for name in &self.skipped {
            lines.push(format!("  - {}: skipped", name));
        }

        let c = &self.counts;
        lines.push(String::new());
        lines.push(format!(
            "{} succeeded, {} failed, {} blocked, {} skipped",
            c.succeeded, c.failed, c.blocked, c.skipped
        ));

        lines.join("\n")
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DangerousOperation;
    use crate::execute::result::BlockReason;
    use std::path::PathBuf;

    fn file(name: &str) -> SeedFile {
        SeedFile::new(PathBuf::from("seeds").join(name))
    }

    #[test]
    fn test_counts_follow_results() {
        let mut report = BatchReport::new();
        report.record(
            &file("001.sql"),
            ExecutionResult::Succeeded { statements: 2 },
        );
        report.record(
            &file("002.sql"),
            ExecutionResult::Blocked {
                operations: vec![DangerousOperation::Truncate],
                reason: BlockReason::ForceRequired,
            },
        );
        report.record(
            &file("003.sql"),
            ExecutionResult::Succeeded { statements: 1 },
        );

        assert_eq!(
            report.counts,
            BatchCounts {
                succeeded: 2,
                failed: 0,
                blocked: 1,
                skipped: 0
            }
        );
        assert!(!report.is_success());
    }

    #[test]
    fn test_skipped_files_fail_the_batch() {
        let mut report = BatchReport::new();
        report.record(
            &file("001.sql"),
            ExecutionResult::Succeeded { statements: 1 },
        );
        report.skip(&[file("002.sql"), file("003.sql")]);

        assert_eq!(report.counts.skipped, 2);
        assert_eq!(report.skipped, vec!["002.sql", "003.sql"]);
        assert!(!report.is_success());
    }

    #[test]
    fn test_all_succeeded_is_success() {
        let mut report = BatchReport::new();
        report.record(
            &file("001.sql"),
            ExecutionResult::Succeeded { statements: 0 },
        );
        assert!(report.is_success());
    }

    #[test]
    fn test_summary_lists_each_file() {
        let mut report = BatchReport::new();
        report.record(
            &file("001_roles.sql"),
            ExecutionResult::Succeeded { statements: 4 },
        );
        report.record(
            &file("002_users.sql"),
            ExecutionResult::Failed {
                statement_index: Some(2),
                sql: None,
                message: "duplicate key".to_string(),
            },
        );
        report.skip(&[file("003_claims.sql")]);

        let summary = report.summary();
        assert!(summary.contains("✓ 001_roles.sql"), "{}", summary);
        assert!(
            summary.contains("✗ 002_users.sql: failed at statement 2"),
            "{}",
            summary
        );
        assert!(summary.contains("003_claims.sql: skipped"), "{}", summary);
        assert!(
            summary.contains("1 succeeded, 1 failed, 0 blocked, 1 skipped"),
            "{}",
            summary
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(BatchReport::new().summary(), "No seed files were run.");
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = BatchReport::new();
        report.record(
            &file("001.sql"),
            ExecutionResult::Succeeded { statements: 1 },
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["counts"]["succeeded"], 1);
        assert_eq!(json["outcomes"][0]["file"], "001.sql");
        assert_eq!(json["outcomes"][0]["result"]["status"], "succeeded");
    }
}
