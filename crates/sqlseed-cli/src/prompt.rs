//! Terminal-backed `Operator`: progress spinners and y/n prompts on stderr,
//! answers from stdin. Closed stdin picks each prompt's default.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use sqlseed_core::classify::{describe_operations, DangerousOperation};
use sqlseed_core::discover::SeedFile;
use sqlseed_core::execute::{ExecutionResult, Operator};

pub struct TerminalOperator {
    show_progress: bool,
    spinner: Option<ProgressBar>,
}

impl TerminalOperator {
    pub fn new(show_progress: bool) -> Self {
        Self {
            show_progress,
            spinner: None,
        }
    }

    /// Run a prompt without the spinner redrawing over it.
    fn with_spinner_suspended<T>(&self, f: impl FnOnce() -> T) -> T {
        match &self.spinner {
            Some(pb) => pb.suspend(f),
            None => f(),
        }
    }
}

impl Operator for TerminalOperator {
    fn confirm_dangerous(&mut self, file: &SeedFile, operations: &[DangerousOperation]) -> bool {
        let question = format!(
            "⚠ {} contains destructive operations: {}.\n  Run it anyway?",
            file,
            describe_operations(operations)
        );
        self.with_spinner_suspended(|| ask(&question, false))
    }

    fn continue_after_failure(&mut self, _file: &SeedFile, _result: &ExecutionResult) -> bool {
        self.with_spinner_suspended(|| ask("Continue with the remaining seed files?", true))
    }

    fn file_started(&mut self, file: &SeedFile) {
        if !self.show_progress {
            return;
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Seeding {}...", file));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(pb);
    }

    fn file_finished(&mut self, file: &SeedFile, result: &ExecutionResult) {
        let Some(pb) = self.spinner.take() else {
            return;
        };
        let mark = match result {
            ExecutionResult::Succeeded { .. } => "✓",
            ExecutionResult::Failed { .. } => "✗",
            ExecutionResult::Blocked { .. } => "!",
        };
        pb.finish_with_message(format!("{} {} {}", mark, file, result));
    }
}

/// Ask a yes/no question on stderr. Empty, unrecognized or missing input
/// (EOF) selects `default`.
fn ask(question: &str, default: bool) -> bool {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    eprint!("{} {} ", question, hint);
    let _ = io::stderr().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => {
            eprintln!();
            default
        }
        Ok(_) => parse_answer(&line).unwrap_or(default),
    }
}

fn parse_answer(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
