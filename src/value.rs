//! The dynamic value model rendered by the prettifier.
//!
//! A [`Value`] describes an in-memory value the way a test framework sees
//! it: a runtime [`Class`](class::Class) plus content. Plugins are selected
//! by walking that class's MRO, so custom container classes, record classes
//! and exception classes participate in dispatch exactly like built-ins.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};
use regex::Regex;

pub mod class;
pub mod convert;
pub mod mock;
pub mod repr;

use class::{builtins, ClassRef};
pub use mock::Mock;

/// Represents a value that can be prettified.
///
/// # Examples
///
/// ```rust
/// use prettifier::Value;
/// let v = Value::from(vec![1, 2]);
/// assert_eq!(v.type_name(), "list");
/// assert_eq!(v.repr(), "[1, 2]");
/// assert_eq!(Value::from("a").repr(), "'a'");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Sequence),
    Tuple(Vec<Value>),
    Set(SetValue),
    Map(Mapping),
    Record(Record),
    Timestamp(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Pattern(Pattern),
    Error(ErrorValue),
    Type(ClassRef),
    Mock(Mock),
    Object(Object),
}

/// An ordered, list-like container.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub class: ClassRef,
    pub items: Vec<Value>,
}

/// An unordered container of unique items.
#[derive(Debug, Clone, PartialEq)]
pub struct SetValue {
    pub class: ClassRef,
    items: Vec<Value>,
}

/// A key-value container that keeps insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub class: ClassRef,
    entries: Vec<(Value, Value)>,
}

/// A value with named fields, rendered as `ClassName(field=value, ...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub class: ClassRef,
    pub fields: Vec<(String, Value)>,
}

/// A raised error: its class and constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorValue {
    pub class: ClassRef,
    pub args: Vec<Value>,
}

/// An opaque value known only by its class and textual representation.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub class: ClassRef,
    pub repr: String,
}

/// A compiled regular expression.
#[derive(Debug, Clone)]
pub struct Pattern(pub Regex);

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

/// Opt-in for structured-record rendering.
///
/// Implementors expose a class and their named fields; [`HasFields::to_value`]
/// turns them into a [`Value::Record`].
pub trait HasFields {
    fn class(&self) -> ClassRef;
    fn fields(&self) -> Vec<(String, Value)>;

    fn to_value(&self) -> Value {
        Value::Record(Record {
            class: self.class(),
            fields: self.fields(),
        })
    }
}

impl Sequence {
    pub fn new(class: ClassRef, items: Vec<Value>) -> Self {
        Self { class, items }
    }
}

impl SetValue {
    /// Builds a set, dropping items equal (by [`Value::key_eq`]) to an earlier one.
    pub fn new(class: ClassRef, items: impl IntoIterator<Item = Value>) -> Self {
        let mut unique: Vec<Value> = Vec::new();
        for item in items {
            if !unique.iter().any(|seen| seen.key_eq(&item)) {
                unique.push(item);
            }
        }
        Self {
            class,
            items: unique,
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Mapping {
    /// Builds a mapping; a repeated key keeps its first position and its last value.
    pub fn new(class: ClassRef, entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut mapping = Self {
            class,
            entries: Vec::new(),
        };
        for (key, value) in entries {
            mapping.insert(key, value);
        }
        mapping
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| k.key_eq(&key)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k.key_eq(key)).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(Value, Value)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Record {
    pub fn new(class: ClassRef) -> Self {
        Self {
            class,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }
}

impl ErrorValue {
    pub fn new(class: ClassRef, args: Vec<Value>) -> Self {
        Self { class, args }
    }
}

impl Object {
    /// An object whose representation is `<module.Name object>`.
    pub fn new(class: ClassRef) -> Self {
        let repr = format!("<{} object>", class.qualified_name());
        Self { class, repr }
    }

    pub fn with_repr(class: ClassRef, repr: impl Into<String>) -> Self {
        Self {
            class,
            repr: repr.into(),
        }
    }
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Sequence::new(Arc::clone(&builtins::LIST), items))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items)
    }

    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetValue::new(Arc::clone(&builtins::SET), items))
    }

    pub fn frozenset(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(SetValue::new(Arc::clone(&builtins::FROZENSET), items))
    }

    pub fn dict(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Mapping::new(Arc::clone(&builtins::DICT), entries))
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    pub fn error(class: ClassRef, args: Vec<Value>) -> Self {
        Value::Error(ErrorValue::new(class, args))
    }

    pub fn object(class: ClassRef) -> Self {
        Value::Object(Object::new(class))
    }

    /// The runtime class plugins are matched against.
    pub fn class(&self) -> ClassRef {
        let class: &ClassRef = match self {
            Value::None => &*builtins::NONE_TYPE,
            Value::Bool(_) => &*builtins::BOOL,
            Value::Int(_) => &*builtins::INT,
            Value::Float(_) => &*builtins::FLOAT,
            Value::Str(_) => &*builtins::STR,
            Value::Bytes(_) => &*builtins::BYTES,
            Value::List(seq) => &seq.class,
            Value::Tuple(_) => &*builtins::TUPLE,
            Value::Set(set) => &set.class,
            Value::Map(map) => &map.class,
            Value::Record(record) => &record.class,
            Value::Timestamp(_) => &*builtins::DATETIME,
            Value::Duration(_) => &*builtins::TIMEDELTA,
            Value::Pattern(_) => &*builtins::PATTERN,
            Value::Error(err) => &err.class,
            Value::Type(_) => &*builtins::TYPE,
            Value::Mock(mock) => &mock.class,
            Value::Object(obj) => &obj.class,
        };
        Arc::clone(class)
    }

    /// Name of the runtime class, e.g. `"list"` or `"StubMapping"`.
    pub fn type_name(&self) -> String {
        self.class().name().to_string()
    }

    /// Named fields, for values that opted in to record rendering.
    pub fn fields(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Record(record) => Some(&record.fields),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Equality for set members and mapping keys.
    ///
    /// Numbers compare by value across `Bool`, `Int` and `Float`, so `True`,
    /// `1` and `1.0` are one key; tuples compare element-wise by the same
    /// rule. Everything else uses structural equality.
    ///
    /// ```rust
    /// use prettifier::Value;
    /// assert!(Value::Bool(true).key_eq(&Value::Float(1.0)));
    /// assert!(!Value::Int(1).key_eq(&Value::from("1")));
    /// ```
    pub fn key_eq(&self, other: &Value) -> bool {
        if let Some(eq) = self.numeric_eq(other) {
            return eq;
        }
        match (self, other) {
            (Value::Tuple(a), Value::Tuple(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.key_eq(y)),
            _ => self == other,
        }
    }

    /// `None` unless both sides are numbers.
    fn numeric_eq(&self, other: &Value) -> Option<bool> {
        fn integral(value: &Value) -> Option<i64> {
            match value {
                Value::Bool(b) => Some(i64::from(*b)),
                Value::Int(n) => Some(*n),
                _ => None,
            }
        }

        match (self, other) {
            (Value::Float(x), Value::Float(y)) => Some(x == y),
            (Value::Float(x), n) | (n, Value::Float(x)) => {
                // Exact only: the float must be integral and round-trip.
                integral(n).map(|n| n as f64 == *x && *x as i64 == n)
            }
            _ => Some(integral(self)? == integral(other)?),
        }
    }

    /// The default textual representation; same as `to_string()`.
    pub fn repr(&self) -> String {
        self.to_string()
    }

    // ------------------------------------------------------------------------
    // Display formatting helpers
    // ------------------------------------------------------------------------

    fn fmt_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }

    fn fmt_entries(f: &mut fmt::Formatter<'_>, entries: &[(Value, Value)]) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }

    fn fmt_duration(f: &mut fmt::Formatter<'_>, delta: &TimeDelta) -> fmt::Result {
        let total_us = delta.num_microseconds().unwrap_or(i64::MAX);
        let days = total_us.div_euclid(86_400_000_000);
        let rest = total_us.rem_euclid(86_400_000_000);
        let parts: Vec<String> = [("days", days), ("seconds", rest / 1_000_000), ("microseconds", rest % 1_000_000)]
            .into_iter()
            .filter(|(_, n)| *n != 0)
            .map(|(unit, n)| format!("{unit}={n}"))
            .collect();
        if parts.is_empty() {
            write!(f, "datetime.timedelta(0)")
        } else {
            write!(f, "datetime.timedelta({})", parts.join(", "))
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{}", repr::float_literal(*x)),
            Value::Str(s) => write!(f, "{}", repr::str_literal(s)),
            Value::Bytes(b) => write!(f, "{}", repr::bytes_literal(b)),
            Value::List(seq) => {
                let builtin = seq.class.is_subclass_of(&builtins::LIST);
                if !builtin {
                    write!(f, "{}(", seq.class.name())?;
                }
                write!(f, "[")?;
                Value::fmt_items(f, &seq.items)?;
                write!(f, "]")?;
                if !builtin {
                    write!(f, ")")?;
                }
                Ok(())
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                Value::fmt_items(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Set(set) => {
                if set.is_empty() {
                    write!(f, "{}()", set.class.name())
                } else if *set.class == **builtins::SET {
                    write!(f, "{{")?;
                    Value::fmt_items(f, set.items())?;
                    write!(f, "}}")
                } else {
                    write!(f, "{}({{", set.class.name())?;
                    Value::fmt_items(f, set.items())?;
                    write!(f, "}})")
                }
            }
            Value::Map(map) => {
                if map.class.is_subclass_of(&builtins::DICT) {
                    Value::fmt_entries(f, map.entries())
                } else {
                    write!(f, "{}(", map.class.name())?;
                    Value::fmt_entries(f, map.entries())?;
                    write!(f, ")")
                }
            }
            Value::Record(record) => {
                write!(f, "{}(", record.class.name())?;
                for (i, (name, value)) in record.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                write!(f, ")")
            }
            Value::Timestamp(ts) => write!(
                f,
                "datetime.datetime.fromisoformat('{}')",
                crate::timestamp::encode_timestamp(ts)
            ),
            Value::Duration(delta) => Value::fmt_duration(f, delta),
            Value::Pattern(pattern) => write!(f, "re.compile({})", repr::str_literal(pattern.0.as_str())),
            Value::Error(err) => {
                write!(f, "{}(", err.class.name())?;
                Value::fmt_items(f, &err.args)?;
                write!(f, ")")
            }
            Value::Type(class) => write!(f, "{class}"),
            Value::Mock(mock) => write!(f, "<{}>", mock.class.name()),
            Value::Object(obj) => write!(f, "{}", obj.repr),
        }
    }
}

// ============================================================================
// CONVERSIONS FROM RUST VALUES
// ============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_from {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(i64::from(n))
            }
        })*
    };
}

int_from!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

impl<A: Into<Value>, B: Into<Value>> From<(A, B)> for Value {
    fn from((a, b): (A, B)) -> Self {
        Value::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> From<(A, B, C)> for Value {
    fn from((a, b, c): (A, B, C)) -> Self {
        Value::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl<K: Into<Value>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::dict(map.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}

impl<K: Into<Value>, V: Into<Value>, S> From<HashMap<K, V, S>> for Value {
    fn from(map: HashMap<K, V, S>) -> Self {
        Value::dict(map.into_iter().map(|(k, v)| (k.into(), v.into())))
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(set: BTreeSet<T>) -> Self {
        Value::set(set.into_iter().map(Into::into))
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(set: HashSet<T, S>) -> Self {
        Value::set(set.into_iter().map(Into::into))
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(ts)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts.fixed_offset())
    }
}

/// Naive timestamps are taken to be UTC.
impl From<NaiveDateTime> for Value {
    fn from(ts: NaiveDateTime) -> Self {
        Value::Timestamp(ts.and_utc().fixed_offset())
    }
}

impl From<TimeDelta> for Value {
    fn from(delta: TimeDelta) -> Self {
        Value::Duration(delta)
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::Pattern(Pattern(re))
    }
}

impl From<ClassRef> for Value {
    fn from(class: ClassRef) -> Self {
        Value::Type(class)
    }
}

impl From<Sequence> for Value {
    fn from(seq: Sequence) -> Self {
        Value::List(seq)
    }
}

impl From<SetValue> for Value {
    fn from(set: SetValue) -> Self {
        Value::Set(set)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Value::Map(map)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl From<Mock> for Value {
    fn from(mock: Mock) -> Self {
        Value::Mock(mock)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}
