//! Command line argument parsing for `retype`.
//!
//! This module defines the CLI interface using `clap`. The `Cli` struct captures
//! the global flags and the subcommand passed to the `retype` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface definition for `retype`.
///
/// ## Examples
///
/// List every `any` in a file:
/// ```bash
/// retype scan src/app.ts
/// ```
///
/// Infer the type for a selection (0-indexed line and column):
/// ```bash
/// retype infer src/app.ts --line 3 --column 12
/// ```
///
/// Replace every placeholder in place:
/// ```bash
/// retype fix src/app.ts --write
/// ```
#[derive(Parser)]
#[command(
    name = "retype",
    author,
    version,
    about = "Replace `any` placeholders with structurally inferred types",
    long_about = "The 'retype' command finds `any` placeholders in a TypeScript file and infers a \
more specific type from the shape of the value each one annotates. Positions are 0-indexed, \
columns are byte offsets within the line."
)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    /// JSON file with inference options and extra call patterns.
    #[clap(long = "config", global = true)]
    pub(crate) config: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Report every `any` placeholder as a warning.
    Scan {
        /// TypeScript source file.
        path: PathBuf,
    },

    /// Print the type inferred for a selection.
    ///
    /// When only `--line` and `--column` are given the selection is a caret.
    Infer {
        /// TypeScript source file.
        path: PathBuf,
        #[clap(long)]
        line: u32,
        #[clap(long)]
        column: u32,
        #[clap(long, requires = "end_column")]
        end_line: Option<u32>,
        #[clap(long, requires = "end_line")]
        end_column: Option<u32>,
    },

    /// Replace every placeholder in a type position with its inferred type.
    ///
    /// The result is printed to stdout unless `--write` is given.
    Fix {
        /// TypeScript source file.
        path: PathBuf,
        /// Rewrite the file instead of printing the result.
        #[clap(long, action = clap::ArgAction::SetTrue)]
        write: bool,
    },

    /// Run the built-in inference smoke tests.
    SelfTest,
}
