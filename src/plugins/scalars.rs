//! Single-line rules: each renders one indented line via `render_line`.

use crate::engine::Prettifier;
use crate::errors::PrettifyError;
use crate::plugin::Plugin;
use crate::timestamp::encode_timestamp;
use crate::value::class::builtins;
use crate::value::repr::{float_literal, str_literal};
use crate::value::Value;

use super::records::render_as_object;

/// Modules whose classes are shown by bare name.
const BARE_NAME_MODULES: [&str; 5] = ["__builtin__", "_abcoll", "builtins", "collections.abc", "exceptions"];

pub fn str_plugin() -> Plugin {
    Plugin::new([builtins::STR.clone(), builtins::USER_STRING.clone()], render_str)
}

pub fn bytes_plugin() -> Plugin {
    Plugin::new([builtins::BYTES.clone()], |p, value, level| Ok(p.render_line(value, level)))
}

pub fn datetime_plugin() -> Plugin {
    Plugin::new([builtins::DATETIME.clone()], |p, value, level| match value {
        Value::Timestamp(ts) => Ok(p.render_line(format_args!("<{}>", encode_timestamp(ts)), level)),
        _ => render_as_object(p, value, level),
    })
}

pub fn timedelta_plugin() -> Plugin {
    Plugin::new([builtins::TIMEDELTA.clone()], |p, value, level| match value {
        Value::Duration(delta) => {
            let seconds = match delta.num_microseconds() {
                Some(micros) => micros as f64 / 1e6,
                None => delta.num_milliseconds() as f64 / 1e3,
            };
            Ok(p.render_line(float_literal(seconds), level))
        }
        _ => render_as_object(p, value, level),
    })
}

pub fn re_plugin() -> Plugin {
    Plugin::new([builtins::PATTERN.clone()], |p, value, level| match value {
        Value::Pattern(pattern) => Ok(p.render_line(format_args!("<{}>", pattern.0.as_str()), level)),
        _ => render_as_object(p, value, level),
    })
}

pub fn type_plugin() -> Plugin {
    Plugin::new([builtins::TYPE.clone()], |p, value, level| match value {
        Value::Type(class) if BARE_NAME_MODULES.contains(&class.module()) => Ok(p.render_line(class.name(), level)),
        Value::Type(class) => Ok(p.render_line(class.qualified_name(), level)),
        _ => render_as_object(p, value, level),
    })
}

// Objects of a `UserString` subclass carry their quoted text as repr.
fn render_str(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    match value {
        Value::Str(text) => Ok(p.render_line(str_literal(text), level)),
        other => render_as_object(p, other, level),
    }
}
