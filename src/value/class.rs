//! Runtime classes and their method resolution order.
//!
//! Plugins are matched against classes, not Rust types, so that user-defined
//! containers and exceptions can sit anywhere in an inheritance graph. Each
//! class linearizes its bases once, at construction, with the C3 algorithm;
//! the resulting chain is what plugin priorities are measured against.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::errors::PrettifyError;

/// Shared handle to a class. Classes are immutable once built.
pub type ClassRef = Arc<Class>;

/// A named runtime class with its bases and linearized ancestors.
pub struct Class {
    name: String,
    module: String,
    bases: Vec<ClassRef>,
    // MRO without the class itself, most-derived first.
    ancestors: Vec<ClassRef>,
}

impl Class {
    /// Creates a class with no bases. Only `object` should be built this way.
    pub fn root(module: &str, name: &str) -> ClassRef {
        Arc::new(Class {
            name: name.to_string(),
            module: module.to_string(),
            bases: Vec::new(),
            ancestors: Vec::new(),
        })
    }

    /// Creates a class with a single base. Single inheritance always linearizes.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prettifier::value::class::{builtins, Class};
    /// let stub = Class::subclass("tests", "StubSequence", &builtins::SEQUENCE);
    /// let names: Vec<_> = stub.mro().map(|c| c.name().to_string()).collect();
    /// assert_eq!(names, ["StubSequence", "Sequence", "object"]);
    /// ```
    pub fn subclass(module: &str, name: &str, base: &ClassRef) -> ClassRef {
        let mut ancestors = Vec::with_capacity(base.ancestors.len() + 1);
        ancestors.push(Arc::clone(base));
        ancestors.extend(base.ancestors.iter().cloned());
        Arc::new(Class {
            name: name.to_string(),
            module: module.to_string(),
            bases: vec![Arc::clone(base)],
            ancestors,
        })
    }

    /// Creates a class with any number of bases.
    ///
    /// # Errors
    /// Returns `InconsistentHierarchy` when the bases admit no C3 linearization,
    /// e.g. `class C(object, int)`.
    pub fn new(module: &str, name: &str, bases: &[ClassRef]) -> Result<ClassRef, PrettifyError> {
        let ancestors = linearize(bases).ok_or_else(|| PrettifyError::InconsistentHierarchy {
            class: format!("{module}.{name}"),
            bases: bases.iter().map(|b| b.qualified_name()).collect(),
        })?;
        Ok(Arc::new(Class {
            name: name.to_string(),
            module: module.to_string(),
            bases: bases.to_vec(),
            ancestors,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn bases(&self) -> &[ClassRef] {
        &self.bases
    }

    /// `module.name`; this is the identity used for class equality.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }

    /// The method resolution order: this class, then its ancestors.
    pub fn mro(&self) -> impl Iterator<Item = &Class> + '_ {
        std::iter::once(self).chain(self.ancestors.iter().map(|c| &**c))
    }

    /// Position of `other` in this class's MRO, if it is an ancestor (or self).
    pub fn distance_to(&self, other: &Class) -> Option<usize> {
        self.mro().position(|c| c == other)
    }

    pub fn is_subclass_of(&self, other: &Class) -> bool {
        self.distance_to(other).is_some()
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.module == other.module
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", self.qualified_name())
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module == "builtins" {
            write!(f, "<class '{}'>", self.name)
        } else {
            write!(f, "<class '{}'>", self.qualified_name())
        }
    }
}

/// C3 linearization of a list of bases. Returns the merged ancestor chain,
/// or `None` when the local precedence orders conflict.
fn linearize(bases: &[ClassRef]) -> Option<Vec<ClassRef>> {
    let mut sequences: Vec<Vec<ClassRef>> = bases
        .iter()
        .map(|base| {
            let mut chain = vec![Arc::clone(base)];
            chain.extend(base.ancestors.iter().cloned());
            chain
        })
        .collect();
    sequences.push(bases.to_vec());

    let mut merged = Vec::new();
    loop {
        sequences.retain(|s| !s.is_empty());
        if sequences.is_empty() {
            return Some(merged);
        }

        // A head is a valid candidate if it does not appear in any tail.
        let candidate = sequences.iter().map(|s| &s[0]).find(|head| {
            !sequences
                .iter()
                .any(|s| s[1..].iter().any(|c| c == *head))
        })?;
        let candidate = Arc::clone(candidate);

        for seq in &mut sequences {
            if seq[0] == candidate {
                seq.remove(0);
            }
        }
        merged.push(candidate);
    }
}

/// The built-in class graph the default plugins are registered against.
pub mod builtins {
    use super::*;

    pub static OBJECT: Lazy<ClassRef> = Lazy::new(|| Class::root("builtins", "object"));
    pub static NONE_TYPE: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "NoneType", &OBJECT));
    pub static INT: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "int", &OBJECT));
    pub static BOOL: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "bool", &INT));
    pub static FLOAT: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "float", &OBJECT));
    pub static STR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "str", &OBJECT));
    pub static BYTES: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "bytes", &OBJECT));
    pub static LIST: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "list", &OBJECT));
    pub static TUPLE: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "tuple", &OBJECT));
    pub static SET: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "set", &OBJECT));
    pub static FROZENSET: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "frozenset", &OBJECT));
    pub static DICT: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "dict", &OBJECT));
    pub static TYPE: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "type", &OBJECT));

    // Abstract collection bases. Built-in containers only register with these
    // virtually, so they are not part of the built-in containers' MRO.
    pub static SEQUENCE: Lazy<ClassRef> = Lazy::new(|| Class::subclass("collections.abc", "Sequence", &OBJECT));
    pub static MAPPING: Lazy<ClassRef> = Lazy::new(|| Class::subclass("collections.abc", "Mapping", &OBJECT));
    pub static ABSTRACT_SET: Lazy<ClassRef> = Lazy::new(|| Class::subclass("collections.abc", "Set", &OBJECT));

    pub static USER_LIST: Lazy<ClassRef> = Lazy::new(|| Class::subclass("collections", "UserList", &SEQUENCE));
    pub static USER_DICT: Lazy<ClassRef> = Lazy::new(|| Class::subclass("collections", "UserDict", &MAPPING));
    pub static USER_STRING: Lazy<ClassRef> = Lazy::new(|| Class::subclass("collections", "UserString", &SEQUENCE));

    pub static DATE: Lazy<ClassRef> = Lazy::new(|| Class::subclass("datetime", "date", &OBJECT));
    pub static DATETIME: Lazy<ClassRef> = Lazy::new(|| Class::subclass("datetime", "datetime", &DATE));
    pub static TIMEDELTA: Lazy<ClassRef> = Lazy::new(|| Class::subclass("datetime", "timedelta", &OBJECT));
    pub static PATTERN: Lazy<ClassRef> = Lazy::new(|| Class::subclass("re", "Pattern", &OBJECT));
    pub static MOCK: Lazy<ClassRef> = Lazy::new(|| Class::subclass("unittest.mock", "Mock", &OBJECT));

    pub static BASE_EXCEPTION: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "BaseException", &OBJECT));
    pub static EXCEPTION: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "Exception", &BASE_EXCEPTION));
    pub static LOOKUP_ERROR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "LookupError", &EXCEPTION));
    pub static KEY_ERROR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "KeyError", &LOOKUP_ERROR));
    pub static INDEX_ERROR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "IndexError", &LOOKUP_ERROR));
    pub static VALUE_ERROR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "ValueError", &EXCEPTION));
    pub static TYPE_ERROR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "TypeError", &EXCEPTION));
    pub static RUNTIME_ERROR: Lazy<ClassRef> = Lazy::new(|| Class::subclass("builtins", "RuntimeError", &EXCEPTION));
}

#[cfg(test)]
mod tests {
    use super::builtins::*;
    use super::*;

    fn names(class: &Class) -> Vec<String> {
        class.mro().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn builtin_chain_ends_at_object() {
        assert_eq!(names(&BOOL), ["bool", "int", "object"]);
        assert_eq!(names(&KEY_ERROR), ["KeyError", "LookupError", "Exception", "BaseException", "object"]);
    }

    #[test]
    fn diamond_linearizes_like_c3() {
        let a = Class::subclass("tests", "A", &OBJECT);
        let b = Class::subclass("tests", "B", &a);
        let c = Class::subclass("tests", "C", &a);
        let d = Class::new("tests", "D", &[b, c]).unwrap();
        assert_eq!(names(&d), ["D", "B", "C", "A", "object"]);
        assert_eq!(d.distance_to(&OBJECT), Some(4));
    }

    #[test]
    fn conflicting_bases_are_rejected() {
        let err = Class::new("tests", "Bad", &[OBJECT.clone(), INT.clone()]).unwrap_err();
        assert!(matches!(err, PrettifyError::InconsistentHierarchy { .. }));
        assert!(err.to_string().contains("tests.Bad"));
    }

    #[test]
    fn virtual_bases_stay_out_of_builtin_mro() {
        assert!(!LIST.is_subclass_of(&SEQUENCE));
        assert!(USER_LIST.is_subclass_of(&SEQUENCE));
    }
}
