//! Rules for values shown as `ClassName(...)`: records, errors and mocks,
//! plus the `object` catch-all that falls back to the default representation.

use crate::engine::Prettifier;
use crate::errors::PrettifyError;
use crate::plugin::Plugin;
use crate::value::class::{builtins, ClassRef};
use crate::value::Value;

use super::keyword_field;

/// Modules whose errors are shown without a module prefix.
const BUILTIN_ERROR_MODULES: [&str; 2] = ["builtins", "exceptions"];

/// Lowest-specificity rule: every class descends from `object`.
pub fn object_plugin() -> Plugin {
    Plugin::new([builtins::OBJECT.clone()], render_as_object)
}

/// `ClassName(field=value, ...)` for values with named fields. Declares no
/// classes, so it never wins dispatch on its own.
pub fn record_plugin() -> Plugin {
    Plugin::new(Vec::<ClassRef>::new(), render_record)
}

pub fn exception_plugin() -> Plugin {
    Plugin::new([builtins::BASE_EXCEPTION.clone()], render_exception)
}

pub fn mock_plugin() -> Plugin {
    Plugin::new([builtins::MOCK.clone()], render_mock)
}

/// Record layout when the value has fields, else its default representation.
///
/// Rules fall back to this when a value's class selected them but its shape
/// is not the one they lay out, e.g. an opaque object of a `tuple` subclass.
pub(crate) fn render_as_object(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    if value.fields().is_some() {
        render_record(p, value, level)
    } else {
        Ok(p.render_line(value, level))
    }
}

fn render_record(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::Record(record) = value else {
        return Err(PrettifyError::unsupported("record", value));
    };
    let mut fields = record
        .fields
        .iter()
        .map(|(name, field)| keyword_field(p, name, field, level))
        .collect::<Result<Vec<String>, PrettifyError>>()?;
    fields.sort();
    Ok(p.render_fields(&format!("{}(", record.class.name()), ", ", ")", &fields, level))
}

fn render_exception(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::Error(err) = value else {
        return render_as_object(p, value, level);
    };
    let name = if BUILTIN_ERROR_MODULES.contains(&err.class.module()) {
        err.class.name().to_string()
    } else {
        err.class.qualified_name()
    };
    let args = p.render(&Value::Tuple(err.args.clone()), level)?;
    Ok(format!("{}{}", p.render_line(name, level).trim_end(), args.trim_start()))
}

fn render_mock(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::Mock(mock) = value else {
        return render_as_object(p, value, level);
    };
    let call_count = Value::Int(i64::try_from(mock.call_count).unwrap_or(i64::MAX));

    // Fixed field order; absent fields are left out rather than shown as None.
    let mut fields = vec![keyword_field(p, "call_count", &call_count, level)?];
    if let Some(return_value) = mock.reported_return_value() {
        fields.push(keyword_field(p, "return_value", return_value, level)?);
    }
    if let Some(side_effect) = mock.reported_side_effect() {
        fields.push(keyword_field(p, "side_effect", side_effect, level)?);
    }
    Ok(p.render_fields(&format!("{}(", mock.class.name()), ", ", ")", &fields, level))
}
