#![warn(clippy::pedantic)]

//! # retype CLI
//!
//! Command line interface for replacing `any` placeholders in TypeScript files.
//!
//! 1. Scan (`scan`) – list every `any` with its position.
//! 2. Infer (`infer`) – print the type inferred for a selection.
//! 3. Fix (`fix`) – replace every placeholder in a type position, printing or writing the result.
//! 4. Self-test (`self-test`) – run the built-in inference smoke tests.
//!
//! Global flags: `-v` (repeatable) raises log verbosity, `--config <file>` loads a JSON
//! configuration with inference options and extra call patterns.
//!
//! ## Exit codes
//! * 0 – success.
//! * 1 – usage / IO / parse failure, or a failing self-test.
//!
//! ## Example
//! ```bash
//! retype infer src/app.ts --line 0 --column 12
//! ```

mod logger;
mod parser;

use std::{fs, path::Path, process};

use clap::Parser;
use parser::{Cli, Command};
use retype::{
    config::RetypeConfig,
    edits::apply_edits,
    placeholders::scan_placeholders,
    quick_fixes_with,
    retype_ast::locator::SourceRange,
    retype_type_inference::Engine,
    self_test, try_infer_at_with,
};

/// Entry point for the CLI executable.
///
/// On any failure a diagnostic is printed to stderr and the process exits with code `1`.
fn main() {
    let args = Cli::parse();
    if let Err(e) = logger::init(logger::level_for(args.verbose)) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = match &args.config {
        Some(path) => match RetypeConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e:#}");
                process::exit(1);
            }
        },
        None => RetypeConfig::default(),
    };
    let engine = config.engine();

    let result = match args.command {
        Command::Scan { path } => scan(&path),
        Command::Infer {
            path,
            line,
            column,
            end_line,
            end_column,
        } => {
            let range = match (end_line, end_column) {
                (Some(end_line), Some(end_column)) => {
                    SourceRange::new(line, column, end_line, end_column)
                }
                _ => SourceRange::caret(line, column),
            };
            infer(&engine, &path, range)
        }
        Command::Fix { path, write } => fix(&engine, &path, write),
        Command::SelfTest => run_self_test(&engine),
    };

    match result {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("path not found: {}", path.display());
    }
    fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))
}

fn scan(path: &Path) -> anyhow::Result<bool> {
    let source = read_source(path)?;
    for diagnostic in scan_placeholders(&source) {
        println!(
            "{}:{}:{}: {}: {}",
            path.display(),
            diagnostic.range.start.line,
            diagnostic.range.start.column,
            diagnostic.severity,
            diagnostic.message
        );
    }
    Ok(true)
}

fn infer(engine: &Engine, path: &Path, range: SourceRange) -> anyhow::Result<bool> {
    let source = read_source(path)?;
    let descriptor = try_infer_at_with(engine, &source, range)?;
    println!("{descriptor}");
    Ok(true)
}

fn fix(engine: &Engine, path: &Path, write: bool) -> anyhow::Result<bool> {
    let source = read_source(path)?;
    let fixes = quick_fixes_with(engine, &source)?;
    let edits: Vec<_> = fixes.into_iter().map(|fix| fix.edit).collect();
    let fixed = apply_edits(&source, &edits)?;
    if write {
        fs::write(path, &fixed)
            .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
        println!(
            "Fixed {} placeholder(s) in {}",
            edits.len(),
            path.display()
        );
    } else {
        print!("{fixed}");
    }
    Ok(true)
}

fn run_self_test(engine: &Engine) -> anyhow::Result<bool> {
    let report = self_test::run_with(engine, self_test::CASES);
    for outcome in &report.outcomes {
        if outcome.passed() {
            println!("PASS {} => {}", outcome.source, outcome.actual);
        } else {
            println!(
                "FAIL {} => expected {}, got {}",
                outcome.source, outcome.expected, outcome.actual
            );
        }
    }
    println!("{} passed, {} failed", report.passed(), report.failed());
    Ok(report.all_passed())
}
