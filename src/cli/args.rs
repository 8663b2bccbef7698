//! Defines the command-line arguments and subcommands for the prettify CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "prettify",
    version,
    about = "Render YAML or JSON values the way test ids and debug output show them."
)]
pub struct PrettifyArgs {
    /// Log dispatch decisions to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pretty-print a YAML/JSON document.
    Render {
        #[command(flatten)]
        input: InputArgs,
        /// Spaces per nesting level.
        #[arg(long)]
        indent: Option<usize>,
        /// Render everything on one line.
        #[arg(long, conflicts_with = "indent")]
        single_line: bool,
        /// YAML/JSON file with `indent` and `newline` settings.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the parametrized-test id for a YAML/JSON document.
    Id {
        #[command(flatten)]
        input: InputArgs,
    },
    /// List the built-in plugins and the classes they apply to.
    Plugins,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file; `-` reads stdin.
    #[arg(default_value = "-")]
    pub file: PathBuf,
}
