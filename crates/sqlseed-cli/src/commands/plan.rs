use anyhow::{Context, Result};
use comfy_table::{Cell, Table as ComfyTable};

use sqlseed_core::classify::{describe_operations, Classification};
use sqlseed_core::plan::plan_files;

use super::{load_config, select_files, Selection};
use crate::args::{Cli, OutputFormat};

/// Show what a run would do without connecting to the database.
///
/// Returns `Ok(false)` if any file is unreadable, or would be blocked
/// because it is dangerous and --force was not given.
pub fn run(cli: &Cli) -> Result<bool> {
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

    let plans = plan_files(&files);
    let ok = plans
        .iter()
        .all(|p| p.error.is_none() && (cli.force || !p.needs_force()));

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&plans).context("Failed to serialize plan")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if plans.is_empty() {
                println!("No .sql seed files found.");
                return Ok(true);
            }

            let mut t = ComfyTable::new();
            t.set_header(vec!["#", "File", "Statements", "Classification"]);
            for (i, plan) in plans.iter().enumerate() {
                let classification = match (&plan.error, &plan.classification) {
                    (Some(err), _) => format!("unreadable: {}", err),
                    (None, Classification::Safe) => "safe".to_string(),
                    (None, Classification::Dangerous(ops)) if cli.force => {
                        format!("dangerous ({}), will ask", describe_operations(ops))
                    }
                    (None, Classification::Dangerous(ops)) => {
                        format!("dangerous ({}), needs --force", describe_operations(ops))
                    }
                };
                t.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&plan.file),
                    Cell::new(plan.statements),
                    Cell::new(classification),
                ]);
            }
            println!("{}", t);
        }
    }

    Ok(ok)
}
