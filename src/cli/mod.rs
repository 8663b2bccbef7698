//! The prettify Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::Read;
use std::path::Path;
use std::{fs, process};

use clap::Parser;
use tracing::debug;

use crate::cli::args::{Command, InputArgs, PrettifyArgs};
use crate::config::PrettifierConfig;
use crate::errors::{print_error, PrettifyError};
use crate::registry::default_registry;
use crate::value::convert::from_yaml_str;
use crate::value::Value;
use crate::{parametrize_id, Prettifier};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = PrettifyArgs::parse();
    init_tracing(args.verbose);

    // Dispatch to the appropriate subcommand handler.
    let result = match args.command {
        Command::Render {
            input,
            indent,
            single_line,
            config,
        } => handle_render(&input, indent, single_line, config.as_deref()),
        Command::Id { input } => handle_id(&input),
        Command::Plugins => output::print_plugins(&default_registry()).map_err(|source| PrettifyError::Io {
            path: "<stdout>".into(),
            source,
        }),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "prettifier=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the `render` subcommand.
fn handle_render(
    input: &InputArgs,
    indent: Option<usize>,
    single_line: bool,
    config_path: Option<&Path>,
) -> Result<(), PrettifyError> {
    let mut config = match config_path {
        Some(path) => PrettifierConfig::load(path)?,
        None => PrettifierConfig::default(),
    };
    if single_line {
        config = PrettifierConfig::single_line();
    }
    if let Some(indent) = indent {
        config.indent = indent;
    }
    debug!(?config, "render settings");

    let value = read_value(&input.file)?;
    let rendered = Prettifier::from_config(&config).render(&value, 0)?;
    output::print_rendered(&rendered);
    Ok(())
}

/// Handles the `id` subcommand.
fn handle_id(input: &InputArgs) -> Result<(), PrettifyError> {
    let value = read_value(&input.file)?;
    output::print_rendered(&parametrize_id(&value)?);
    Ok(())
}

fn read_value(path: &Path) -> Result<Value, PrettifyError> {
    let io_error = |source| PrettifyError::Io {
        path: path.to_path_buf(),
        source,
    };
    let source = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).map_err(io_error)?;
        buffer
    } else {
        fs::read_to_string(path).map_err(io_error)?
    };
    debug!(path = %path.display(), bytes = source.len(), "read input");
    from_yaml_str(&source)
}
