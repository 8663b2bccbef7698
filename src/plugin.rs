//! # Prettifier Plugins
//!
//! A plugin pairs the classes it applies to with a rendering function. Plugin
//! authors never pick numeric priorities: a plugin's priority for a value is
//! derived from how close its classes sit to the value's own class in the
//! method resolution order.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::engine::Prettifier;
use crate::errors::PrettifyError;
use crate::value::class::{Class, ClassRef};
use crate::value::Value;

/// Rendering function: `(engine, value, level) -> fragment`.
pub type RenderFn =
    Arc<dyn Fn(&Prettifier, &Value, usize) -> Result<String, PrettifyError> + Send + Sync>;

/// How specifically a plugin applies to a value.
///
/// `Score(0)` is an exact class match, `Score(-n)` an ancestor `n` steps up
/// the MRO. `Inapplicable` orders below every score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Inapplicable,
    Score(i64),
}

impl Priority {
    pub fn is_applicable(self) -> bool {
        matches!(self, Priority::Score(_))
    }

    /// Numeric form; `Inapplicable` is negative infinity.
    pub fn as_f64(self) -> f64 {
        match self {
            Priority::Inapplicable => f64::NEG_INFINITY,
            Priority::Score(score) => score as f64,
        }
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Priority::Inapplicable, Priority::Inapplicable) => Ordering::Equal,
            (Priority::Inapplicable, Priority::Score(_)) => Ordering::Less,
            (Priority::Score(_), Priority::Inapplicable) => Ordering::Greater,
            (Priority::Score(a), Priority::Score(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Inapplicable => write!(f, "-inf"),
            Priority::Score(score) => write!(f, "{score}"),
        }
    }
}

/// An immutable rendering rule for a set of classes.
#[derive(Clone)]
pub struct Plugin {
    types: Vec<ClassRef>,
    render: RenderFn,
}

impl Plugin {
    /// Creates a plugin for `types`. Duplicate classes are ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prettifier::plugin::{Plugin, Priority};
    /// use prettifier::value::class::builtins;
    /// use prettifier::Value;
    ///
    /// let plugin = Plugin::new([builtins::OBJECT.clone()], |_, v, _| Ok(v.repr()));
    /// assert_eq!(plugin.priority(&Value::None), Priority::Score(-1));
    /// ```
    pub fn new<F>(types: impl IntoIterator<Item = ClassRef>, render: F) -> Self
    where
        F: Fn(&Prettifier, &Value, usize) -> Result<String, PrettifyError> + Send + Sync + 'static,
    {
        let mut unique: Vec<ClassRef> = Vec::new();
        for ty in types {
            if !unique.contains(&ty) {
                unique.push(ty);
            }
        }
        Self {
            types: unique,
            render: Arc::new(render),
        }
    }

    pub fn types(&self) -> &[ClassRef] {
        &self.types
    }

    /// Priority of this plugin for a value's runtime class.
    pub fn priority(&self, value: &Value) -> Priority {
        self.priority_for_class(&value.class())
    }

    /// Best (closest to zero) distance from `class` to any declared type.
    pub fn priority_for_class(&self, class: &Class) -> Priority {
        self.types
            .iter()
            .filter_map(|ty| class.distance_to(ty))
            .map(|distance| Priority::Score(-(distance as i64)))
            .max()
            .unwrap_or(Priority::Inapplicable)
    }

    /// Runs the rendering function. The result may carry trailing
    /// whitespace; [`Prettifier::render`] trims it.
    pub fn render(&self, prettifier: &Prettifier, value: &Value, level: usize) -> Result<String, PrettifyError> {
        (self.render)(prettifier, value, level)
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types: Vec<String> = self.types.iter().map(|t| t.qualified_name()).collect();
        f.debug_struct("Plugin").field("types", &types).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::class::builtins;

    fn plugin(types: Vec<ClassRef>) -> Plugin {
        Plugin::new(types, |_, _, _| Ok(String::new()))
    }

    #[test]
    fn exact_match_scores_zero() {
        let p = plugin(vec![builtins::OBJECT.clone()]);
        assert_eq!(p.priority(&Value::object(builtins::OBJECT.clone())), Priority::Score(0));
    }

    #[test]
    fn ancestor_scores_negative_distance() {
        let p = plugin(vec![builtins::OBJECT.clone()]);
        assert_eq!(p.priority(&Value::Int(0)), Priority::Score(-1));
        assert_eq!(p.priority(&Value::Bool(true)), Priority::Score(-2));
    }

    #[test]
    fn unrelated_class_is_negative_infinity() {
        let p = plugin(vec![builtins::INT.clone()]);
        let priority = p.priority(&Value::object(builtins::OBJECT.clone()));
        assert_eq!(priority, Priority::Inapplicable);
        assert_eq!(priority.as_f64(), f64::NEG_INFINITY);
    }

    #[test]
    fn closest_declared_type_wins() {
        let p = plugin(vec![builtins::OBJECT.clone(), builtins::INT.clone()]);
        assert_eq!(p.priority(&Value::Bool(false)), Priority::Score(-1));
    }

    #[test]
    fn inapplicable_orders_below_every_score() {
        assert!(Priority::Inapplicable < Priority::Score(i64::MIN));
        assert!(Priority::Score(-1) < Priority::Score(0));
    }
}
