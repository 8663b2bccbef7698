//! # Prettifier
//!
//! Renders in-memory values as deterministic, readable text, for naming
//! parametrized test cases and for debugging.
//!
//! ```rust
//! use prettifier::{prettify, Value};
//! assert_eq!(prettify(&Value::dict([(Value::from("a"), Value::from(1))])).unwrap(), "{'a': 1}");
//! assert_eq!(prettify(&Value::from(vec![1, 2])).unwrap(), "[\n  1, \n  2\n]");
//! ```
//!
//! The engine ([`Prettifier`]) can be extended with custom plugins:
//!
//! ```rust
//! use prettifier::plugin::Plugin;
//! use prettifier::registry::default_registry;
//! use prettifier::value::class::{builtins, Class};
//! use prettifier::value::Object;
//! use prettifier::{Prettifier, Value};
//!
//! let foo = Class::subclass("app", "Foo", &builtins::OBJECT);
//! let mut registry = default_registry();
//! registry.register("foo", Plugin::new([foo.clone()], |p, _, level| Ok(p.render_line("0", level))));
//! let prettifier = Prettifier::with_registry(2, "\n", registry);
//! assert_eq!(prettifier.render(&Object::new(foo).into(), 0).unwrap(), "0");
//! ```

use std::io::Write;

use tracing::trace;

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fixtures;
pub mod plugin;
pub mod plugins;
pub mod registry;
pub mod timestamp;
pub mod value;

pub use config::PrettifierConfig;
pub use engine::Prettifier;
pub use errors::PrettifyError;
pub use fixtures::parametrize_id;
pub use value::{HasFields, Value};

/// Renders a value with the default layout (indent 2, `"\n"`).
pub fn prettify(value: &Value) -> Result<String, PrettifyError> {
    prettify_with(value, &PrettifierConfig::default(), 0)
}

/// Renders a value with explicit layout settings, starting at `level`.
pub fn prettify_with(value: &Value, config: &PrettifierConfig, level: usize) -> Result<String, PrettifyError> {
    trace!(indent = config.indent, level, "prettify");
    Prettifier::from_config(config).render(value, level)
}

/// Prints a prettified value to stdout, followed by a newline.
pub fn pprettify(value: &Value) -> Result<(), PrettifyError> {
    pprettify_to(&mut std::io::stdout().lock(), value)
}

/// Writes a prettified value and a newline to `writer`.
///
/// ```rust
/// use prettifier::{pprettify_to, Value};
/// let mut out = Vec::new();
/// pprettify_to(&mut out, &Value::from(vec![1])).unwrap();
/// assert_eq!(out, b"[1]\n");
/// ```
pub fn pprettify_to<W: Write>(writer: &mut W, value: &Value) -> Result<(), PrettifyError> {
    let rendered = prettify(value)?;
    writeln!(writer, "{rendered}").map_err(|source| PrettifyError::Io {
        path: "<output>".into(),
        source,
    })
}
