//! Prettifier Error Handling
//!
//! Every failure mode of the engine, the class model and the CLI surfaces
//! as a single [`PrettifyError`]. The dispatch variants (`NoPlugins`,
//! `NoMatch`, `AmbiguousPlugin`) signal a misconfigured plugin registry and
//! are never recovered from internally.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for dispatch, rendering, class construction and I/O.
#[derive(Debug, Error, Diagnostic)]
pub enum PrettifyError {
    #[error("No plugins found")]
    #[diagnostic(
        code(prettifier::dispatch::no_plugins),
        help("register at least one plugin, or start from `default_registry()`")
    )]
    NoPlugins,

    #[error("No matching plugin found for {value}")]
    #[diagnostic(
        code(prettifier::dispatch::no_match),
        help("register a plugin for this class or one of its ancestors, such as `object`")
    )]
    NoMatch { value: String },

    #[error("More than one plugin found for {value}: {}", plugins.join(", "))]
    #[diagnostic(
        code(prettifier::dispatch::ambiguous),
        help("two plugins claim the same class at the same distance; remove one of them")
    )]
    AmbiguousPlugin { value: String, plugins: Vec<String> },

    #[error("Plugin '{plugin}' cannot render {value}")]
    #[diagnostic(code(prettifier::render::unsupported_value))]
    UnsupportedValue { plugin: String, value: String },

    #[error("Cannot create a consistent method resolution order for class {class} with bases {}", bases.join(", "))]
    #[diagnostic(code(prettifier::class::inconsistent_hierarchy))]
    InconsistentHierarchy { class: String, bases: Vec<String> },

    #[error("I/O error on '{}'", path.display())]
    #[diagnostic(code(prettifier::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in '{}': {message}", path.display())]
    #[diagnostic(code(prettifier::config))]
    Config { path: PathBuf, message: String },

    #[error("Invalid input: {message}")]
    #[diagnostic(code(prettifier::input))]
    Input { message: String },
}

impl PrettifyError {
    /// Error for a rule that was handed a value it has no layout for.
    pub fn unsupported(plugin: &str, value: &crate::Value) -> Self {
        PrettifyError::UnsupportedValue {
            plugin: plugin.to_string(),
            value: value.repr(),
        }
    }

    /// Error for malformed CLI/config input.
    pub fn input(message: impl Into<String>) -> Self {
        PrettifyError::Input {
            message: message.into(),
        }
    }
}

/// Prints an error as a miette report on stderr.
pub fn print_error(error: PrettifyError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
