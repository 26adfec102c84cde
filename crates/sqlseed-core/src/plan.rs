//! Dry-run planning: what each seed file would do, without a database.

use serde::Serialize;

use crate::classify::{classify, Classification};
use crate::discover::SeedFile;
use crate::sql::split_statements;

/// What running a file would involve.
#[derive(Debug, Clone, Serialize)]
pub struct FilePlan {
    pub file: String,
    pub statements: usize,
    pub classification: Classification,
    /// Set when the file could not be read; the other fields are empty then.
    pub error: Option<String>,
}

impl FilePlan {
    /// Whether the file would be blocked (or held for confirmation) at run time.
    pub fn needs_force(&self) -> bool {
        self.classification.is_dangerous()
    }
}

/// Read, classify and split each file. Never touches a database.
pub fn plan_files(files: &[SeedFile]) -> Vec<FilePlan> {
    files
        .iter()
        .map(|file| match file.read() {
            Ok(sql) => FilePlan {
                file: file.name.clone(),
                statements: split_statements(&sql).len(),
                classification: classify(&sql),
                error: None,
            },
            Err(e) => FilePlan {
                file: file.name.clone(),
                statements: 0,
                classification: Classification::Safe,
                error: Some(e.to_string()),
            },
        })
        .collect()
}
