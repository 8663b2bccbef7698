//! Shared fixtures for the prettifier integration tests.

#![allow(dead_code)]

use prettifier::value::class::{builtins, Class, ClassRef};
use prettifier::value::{Mapping, Record, Sequence, SetValue};
use prettifier::{Prettifier, Value};

/// Engine that renders on a single line.
pub fn engine() -> Prettifier {
    Prettifier::new(0, "")
}

/// A record class deriving from `object`.
pub fn make_class(name: &str) -> ClassRef {
    Class::subclass("tests", name, &builtins::OBJECT)
}

/// `Test(a=.., b=..)`-style record with the given fields, in declaration order.
pub fn record(name: &str, fields: Vec<(&str, Value)>) -> Value {
    fields
        .into_iter()
        .fold(Record::new(make_class(name)), |record, (field, value)| record.field(field, value))
        .into()
}

/// An empty mapping that is not a dict.
pub fn stub_mapping() -> Value {
    Mapping::new(Class::subclass("tests", "StubMapping", &builtins::MAPPING), Vec::new()).into()
}

/// An empty sequence that is not a list.
pub fn stub_sequence() -> Value {
    Sequence::new(Class::subclass("tests", "StubSequence", &builtins::SEQUENCE), vec![]).into()
}

/// An empty set that is not a set.
pub fn stub_set() -> Value {
    SetValue::new(Class::subclass("tests", "StubSet", &builtins::ABSTRACT_SET), Vec::new()).into()
}

pub fn lines(parts: &[&str]) -> String {
    parts.join("\n")
}
