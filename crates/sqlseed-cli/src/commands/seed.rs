use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table as ComfyTable};

use sqlseed_core::db::{sanitize_url, SqlxConnection};
use sqlseed_core::execute::{BatchReport, BlockReason, ExecutionResult, SeedExecutor};

use super::{load_config, resolve_db_url, select_files, Selection};
use crate::args::{Cli, OutputFormat};
use crate::prompt::TerminalOperator;

/// Run the selected seed files.
///
/// Returns `Ok(true)` only if every selected file succeeded:
///   exit 0: all files applied
///   exit 1: a file failed, was blocked or skipped, or there was nothing to run
///            because the seeds directory had to be created
pub async fn run(cli: &Cli) -> Result<bool> {
    let config = load_config()?;

    let files = match select_files(cli, config.as_ref())? {
        Selection::Files(files) => files,
        Selection::CreatedDirectory(path) => {
            eprintln!(
                "Seeds directory {} did not exist; created it. Nothing to seed.",
                path.display()
            );
            return Ok(false);
        }
    };

    if files.is_empty() {
        eprintln!("No .sql seed files found. Nothing to seed.");
        return Ok(true);
    }

    let db_url = resolve_db_url(cli.db.as_deref(), config.as_ref())?;
    let mut conn = SqlxConnection::connect(&db_url).await?;
    tracing::info!(
        "Applying {} seed file(s) to {}",
        files.len(),
        sanitize_url(&db_url)
    );

    let mut operator = TerminalOperator::new(cli.format == OutputFormat::Text);
    let report = SeedExecutor::new(&mut conn, &mut operator, cli.force)
        .execute_batch(&files)
        .await;

    if let Err(e) = conn.close().await {
        tracing::warn!("Failed to close database connection: {}", e);
    }

    match cli.format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize seed report")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_report(&report, cli.dir.as_deref()),
    }

    Ok(report.is_success())
}

fn print_report(report: &BatchReport, dir: Option<&Path>) {
    println!();
    println!("{}", report.summary());

    let failures: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|o| match &o.result {
            ExecutionResult::Failed {
                statement_index,
                sql,
                message,
            } => Some((&o.file, statement_index, sql, message)),
            _ => None,
        })
        .collect();

    if !failures.is_empty() {
        println!();
        let mut t = ComfyTable::new();
        t.set_header(vec!["File", "Statement", "Error", "SQL"]);
        for (file, index, sql, message) in failures {
            t.add_row(vec![
                Cell::new(file),
                Cell::new(index.map(|i| i.to_string()).unwrap_or_else(|| "-".to_string())),
                Cell::new(message),
                Cell::new(sql.as_deref().unwrap_or("")),
            ]);
        }
        println!("{}", t);
    }

    // Give the exact command that overrides each block.
    for outcome in &report.outcomes {
        if let ExecutionResult::Blocked {
            reason: BlockReason::ForceRequired,
            ..
        } = outcome.result
        {
            println!(
                "To run {} anyway: {}",
                outcome.file,
                override_command(&outcome.file, dir)
            );
        }
    }
}

/// The command that re-runs one blocked file with --force, keeping the
/// seeds directory the user chose.
fn override_command(file: &str, dir: Option<&Path>) -> String {
    match dir {
        Some(dir) => format!("sqlseed {} --dir {} --force", file, dir.display()),
        None => format!("sqlseed {} --force", file),
    }
}
