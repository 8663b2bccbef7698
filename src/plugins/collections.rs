//! Container rules.
//!
//! Children are rendered one level deeper than the container. Mapping
//! entries and set items are sorted by their rendered text so the output
//! does not depend on insertion or hash order; sequences keep their order.

use crate::engine::Prettifier;
use crate::errors::PrettifyError;
use crate::plugin::Plugin;
use crate::value::class::builtins;
use crate::value::Value;

use super::records::render_as_object;

pub fn dict_plugin() -> Plugin {
    Plugin::new(
        [builtins::DICT.clone(), builtins::MAPPING.clone(), builtins::USER_DICT.clone()],
        render_dict,
    )
}

pub fn list_plugin() -> Plugin {
    Plugin::new(
        [builtins::LIST.clone(), builtins::SEQUENCE.clone(), builtins::USER_LIST.clone()],
        render_list,
    )
}

pub fn tuple_plugin() -> Plugin {
    Plugin::new([builtins::TUPLE.clone()], render_tuple)
}

pub fn set_plugin() -> Plugin {
    Plugin::new(
        [builtins::SET.clone(), builtins::FROZENSET.clone(), builtins::ABSTRACT_SET.clone()],
        render_set,
    )
}

fn render_dict(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::Map(map) = value else {
        return render_as_object(p, value, level);
    };

    // Anything that is not a dict proper shows its class around the braces.
    let (start, end) = if map.class.is_subclass_of(&builtins::DICT) {
        ("{".to_string(), "}".to_string())
    } else {
        (format!("{}({{", map.class.name()), "})".to_string())
    };

    let mut fields = map
        .entries()
        .iter()
        .map(|(key, val)| {
            Ok(format!(
                "{}: {}",
                p.render(key, level + 1)?.trim_end(),
                p.render(val, level + 1)?.trim_start()
            ))
        })
        .collect::<Result<Vec<String>, PrettifyError>>()?;
    fields.sort();

    Ok(p.render_fields(&start, ", ", &end, &fields, level))
}

fn render_list(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::List(seq) = value else {
        return render_as_object(p, value, level);
    };

    let (start, end) = if seq.class.is_subclass_of(&builtins::LIST) {
        ("[".to_string(), "]".to_string())
    } else {
        (format!("{}([", seq.class.name()), "])".to_string())
    };

    let fields = render_items(p, &seq.items, level)?;
    Ok(p.render_fields(&start, ", ", &end, &fields, level))
}

fn render_tuple(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::Tuple(items) = value else {
        return render_as_object(p, value, level);
    };
    let fields = render_items(p, items, level)?;
    Ok(p.render_fields("(", ", ", ")", &fields, level))
}

fn render_set(p: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
    let Value::Set(set) = value else {
        return render_as_object(p, value, level);
    };
    let mut fields = render_items(p, set.items(), level)?;
    fields.sort();
    Ok(p.render_fields(&format!("{}([", set.class.name()), ", ", "])", &fields, level))
}

fn render_items(p: &Prettifier, items: &[Value], level: usize) -> Result<Vec<String>, PrettifyError> {
    items.iter().map(|item| p.render(item, level + 1)).collect()
}
