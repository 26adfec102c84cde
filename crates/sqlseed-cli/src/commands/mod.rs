pub mod plan;
pub mod seed;

use std::path::{Path, PathBuf};

use anyhow::Result;

use sqlseed_core::config::{self, SqlSeedConfig};
use sqlseed_core::discover::{self, SeedFile};
use sqlseed_core::error::SeedError;

use crate::args::Cli;

/// Files selected for this invocation.
pub enum Selection {
    Files(Vec<SeedFile>),
    /// The seeds directory did not exist and has been created.
    CreatedDirectory(PathBuf),
}

pub fn load_config() -> Result<Option<SqlSeedConfig>> {
    Ok(config::read_config(Path::new("."))?)
}

/// Resolve the seed files for this run: the named file, or everything in
/// the seeds directory.
///
/// A missing seeds directory is created so the next run has somewhere to
/// look; the caller reports that there was nothing to seed.
pub fn select_files(cli: &Cli, config: Option<&SqlSeedConfig>) -> Result<Selection> {
    let dir = config::resolve_seeds_dir(cli.dir.as_deref(), config);

    if let Some(name) = &cli.file {
        let file = discover::resolve_file(&dir, name)?;
        return Ok(Selection::Files(vec![file]));
    }

    match discover::discover_files(&dir) {
        Ok(files) => Ok(Selection::Files(files)),
        Err(SeedError::DirectoryNotFound { path }) => {
            std::fs::create_dir_all(&path).map_err(|e| SeedError::Io {
                message: format!("Failed to create seeds directory {}", path.display()),
                source: e,
            })?;
            tracing::info!("Created missing seeds directory {}", path.display());
            Ok(Selection::CreatedDirectory(path))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve the database URL: --db flag (or DATABASE_URL via clap), then the
/// environment, then .env, then sqlseed.toml.
pub fn resolve_db_url(explicit: Option<&str>, config: Option<&SqlSeedConfig>) -> Result<String> {
    if let Some(url) = explicit {
        return Ok(url.to_string());
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }
    if dotenvy::dotenv().is_ok() {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return Ok(url);
        }
    }
    if let Some(url) = config.and_then(|c| c.database.url.clone()) {
        return Ok(url);
    }
    Err(SeedError::NoDatabaseUrl.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config_with_url(url: &str) -> SqlSeedConfig {
        SqlSeedConfig {
            database: config::DatabaseConfig {
                url: Some(url.to_string()),
            },
            ..Default::default()
        }
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sqlseed").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_missing_seeds_dir_is_created() {
        let tmp = tempfile::tempdir().unwrap();
        let seeds = tmp.path().join("seeds");
        let cli = cli(&["--dir", seeds.to_str().unwrap()]);

        match select_files(&cli, None).unwrap() {
            Selection::CreatedDirectory(path) => assert_eq!(path, seeds),
            Selection::Files(_) => panic!("expected the directory to be created"),
        }
        assert!(seeds.is_dir());
    }

    #[test]
    fn test_existing_seeds_dir_lists_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("002_b.sql"), "SELECT 1;").unwrap();
        std::fs::write(tmp.path().join("001_a.sql"), "SELECT 1;").unwrap();
        let cli = cli(&["--dir", tmp.path().to_str().unwrap()]);

        match select_files(&cli, None).unwrap() {
            Selection::Files(files) => {
                let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
                assert_eq!(names, vec!["001_a.sql", "002_b.sql"]);
            }
            Selection::CreatedDirectory(_) => panic!("directory already existed"),
        }
    }

    #[test]
    fn test_named_file_missing_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let cli = cli(&["nope.sql", "--dir", tmp.path().to_str().unwrap()]);
        assert!(select_files(&cli, None).is_err());
    }

    #[test]
    fn test_resolve_db_url_explicit_wins() {
        let config = config_with_url("sqlite://from_config.db");
        let url = resolve_db_url(Some("postgres://localhost/flag"), Some(&config)).unwrap();
        assert_eq!(url, "postgres://localhost/flag");
    }

    #[test]
    fn test_resolve_db_url_falls_back_to_config() {
        // Only meaningful when neither the environment nor a .env file set it.
        let _ = dotenvy::dotenv();
        if std::env::var("DATABASE_URL").is_ok() {
            return;
        }
        let config = config_with_url("sqlite://from_config.db");
        assert_eq!(
            resolve_db_url(None, Some(&config)).unwrap(),
            "sqlite://from_config.db"
        );
        assert!(resolve_db_url(None, None).is_err());
    }
}
