//! # Seed File Discovery
//!
//! Seed files are plain `.sql` files living directly inside the seeds
//! directory. Execution order is the byte-wise order of their file names,
//! so the `NNN_description.sql` naming convention (`001_roles.sql`,
//! `002_users.sql`, ...) controls the order. The convention itself is not
//! validated; any name sorts.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Result, SeedError};

/// File extension that marks a seed file.
pub const SEED_EXTENSION: &str = "sql";

/// A `.sql` file to be applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SeedFile {
    /// File name only, e.g. `001_roles.sql`. Used for ordering and display.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
}

impl SeedFile {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    /// Read the file's SQL text.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| SeedError::Read {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl fmt::Display for SeedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// List the seed files directly inside `directory`, sorted by file name.
///
/// Non-recursive: subdirectories are ignored, as are files with any other
/// extension.
pub fn discover_files(directory: &Path) -> Result<Vec<SeedFile>> {
    if !directory.is_dir() {
        return Err(SeedError::DirectoryNotFound {
            path: directory.to_path_buf(),
        });
    }

    let entries = fs::read_dir(directory).map_err(|e| SeedError::Io {
        message: format!("Failed to list {}", directory.display()),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SeedError::Io {
            message: format!("Failed to list {}", directory.display()),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some(SEED_EXTENSION) {
            continue;
        }
        files.push(SeedFile::new(path));
    }

    // String comparison on the name gives byte-wise ordering.
    files.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        "Discovered {} seed file(s) in {}",
        files.len(),
        directory.display()
    );
    Ok(files)
}

/// Resolve an explicitly named seed file.
///
/// The name is looked up inside the seeds directory first; if it isn't
/// there but exists as given (an absolute path or a path relative to the
/// working directory), that path is used.
pub fn resolve_file(directory: &Path, name: &str) -> Result<SeedFile> {
    let in_dir = directory.join(name);
    if in_dir.is_file() {
        return Ok(SeedFile::new(in_dir));
    }

    let as_given = PathBuf::from(name);
    if as_given.is_file() {
        return Ok(SeedFile::new(as_given));
    }

    Err(SeedError::FileNotFound { path: in_dir })
}
