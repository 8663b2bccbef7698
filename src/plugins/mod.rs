//! # Built-in Plugins
//!
//! The rendering rules registered in the default registry.
//!
//! ## Module Structure
//!
//! - **`collections`**: dicts, lists, tuples and sets (`{}`, `[]`, `()`, `set([])`)
//! - **`scalars`**: text, bytes, timestamps, durations, patterns and classes
//! - **`records`**: the `object` catch-all, structured records, errors and mocks
//!
//! ## Design Principles
//!
//! - Every rule renders children through [`Prettifier::render`] at `level + 1`
//!   and lays them out through [`Prettifier::render_fields`].
//! - Rules are selected by class distance; none of them declares a priority.

use crate::engine::Prettifier;
use crate::errors::PrettifyError;
use crate::registry::PluginRegistry;
use crate::value::Value;

pub mod collections;
pub mod records;
pub mod scalars;

pub use collections::{dict_plugin, list_plugin, set_plugin, tuple_plugin};
pub use records::{exception_plugin, mock_plugin, object_plugin, record_plugin};
pub use scalars::{bytes_plugin, datetime_plugin, re_plugin, str_plugin, timedelta_plugin, type_plugin};

/// Registers every built-in plugin under its canonical name.
///
/// The `record` rule is not registered: it declares no classes and is reached
/// through `object` for values that expose fields.
pub fn register_all_plugins(registry: &mut PluginRegistry) {
    registry.register("object", object_plugin());
    registry.register("bytes", bytes_plugin());
    registry.register("datetime", datetime_plugin());
    registry.register("dict", dict_plugin());
    registry.register("exception", exception_plugin());
    registry.register("list", list_plugin());
    registry.register("mock", mock_plugin());
    registry.register("re", re_plugin());
    registry.register("set", set_plugin());
    registry.register("str", str_plugin());
    registry.register("timedelta", timedelta_plugin());
    registry.register("tuple", tuple_plugin());
    registry.register("type", type_plugin());
}

/// `key=value` with the key as a bare name, shared by records and mocks.
pub(crate) fn keyword_field(
    prettifier: &Prettifier,
    key: &str,
    value: &Value,
    level: usize,
) -> Result<String, PrettifyError> {
    Ok(format!(
        "{}={}",
        prettifier.render_line(key, level + 1).trim_end(),
        prettifier.render(value, level + 1)?.trim_start()
    ))
}
