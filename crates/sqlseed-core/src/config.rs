//! # Configuration File Parser
//!
//! Reads and parses `sqlseed.toml`, the optional configuration file that
//! saves passing the same flags on every run. Supports:
//!
//! - `[database]`: default connection URL
//! - `[seeds]`: location of the seeds directory
//!
//! Example `sqlseed.toml`:
//!
//! ```toml
//! [database]
//! url = "postgres://localhost/workforce"
//!
//! [seeds]
//! directory = "database/seeds"
//! ```
//!
//! CLI flags always win over the file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SeedError};

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = "sqlseed.toml";

/// Seeds directory used when neither `--dir` nor the config names one.
pub const DEFAULT_SEEDS_DIR: &str = "database/seeds";

/// Top-level sqlseed.toml structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqlSeedConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Seed file settings.
    pub seeds: SeedsConfig,

    /// Absolute path to the directory containing sqlseed.toml.
    ///
    /// Populated by `read_config()` so that a relative `seeds.directory`
    /// resolves against the config file's location, not the CWD.
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

/// Database connection configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "postgres://localhost/myapp").
    pub url: Option<String>,
}

/// Seed file configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedsConfig {
    /// Directory holding the `.sql` seed files.
    pub directory: Option<String>,
}

/// Read and parse a sqlseed.toml file from the given directory.
///
/// Returns `None` if the file doesn't exist (config is optional).
/// Returns an error if the file exists but can't be parsed.
pub fn read_config(dir: &Path) -> Result<Option<SqlSeedConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| SeedError::Config {
        message: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let mut config: SqlSeedConfig = toml::from_str(&content).map_err(|e| SeedError::Config {
        message: format!("Failed to parse {}: {}", path.display(), e),
    })?;

    config.config_dir = Some(std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()));

    config.validate()?;

    Ok(Some(config))
}

impl SqlSeedConfig {
    /// Validate semantic constraints that serde cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.seeds.directory {
            if dir.trim().is_empty() {
                return Err(SeedError::Config {
                    message: "seeds.directory is empty. Remove it to use the default \
                              (database/seeds) or give a path."
                        .to_string(),
                });
            }
        }
        if let Some(url) = &self.database.url {
            if url.trim().is_empty() {
                return Err(SeedError::Config {
                    message: "database.url is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// The configured seeds directory, resolved against the config file's
    /// location when relative.
    pub fn seeds_dir(&self) -> Option<PathBuf> {
        let dir = PathBuf::from(self.seeds.directory.as_ref()?);
        match &self.config_dir {
            Some(base) if dir.is_relative() => Some(base.join(dir)),
            _ => Some(dir),
        }
    }
}

/// Pick the seeds directory: explicit flag, then config, then the default.
pub fn resolve_seeds_dir(explicit: Option<&Path>, config: Option<&SqlSeedConfig>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    config
        .and_then(|c| c.seeds_dir())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SEEDS_DIR))
}
