use crate::classify::DangerousOperation;
use crate::discover::SeedFile;

use super::result::ExecutionResult;

/// Decisions and notifications that belong to the person running the seeds.
///
/// The CLI answers these from the terminal; tests script them.
pub trait Operator {
    /// Asked before a dangerous file runs in force mode. `false` blocks it.
    fn confirm_dangerous(&mut self, file: &SeedFile, operations: &[DangerousOperation]) -> bool;

    /// Asked after a file did not succeed while more files remain.
    /// `false` stops the batch.
    fn continue_after_failure(&mut self, file: &SeedFile, result: &ExecutionResult) -> bool;

    /// Called before a file is read.
    fn file_started(&mut self, _file: &SeedFile) {}

    /// Called once a file has a result.
    fn file_finished(&mut self, _file: &SeedFile, _result: &ExecutionResult) {}
}
