//! A minimal test double.
//!
//! Only the state the mock rule reports is modelled: how often the double was
//! called, what it returns and what it raises.

use std::sync::Arc;

use super::class::{builtins, ClassRef};
use super::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Mock {
    pub class: ClassRef,
    pub call_count: u64,
    pub return_value: Option<Box<Value>>,
    pub side_effect: Option<Box<Value>>,
}

impl Mock {
    pub fn new() -> Self {
        Self {
            class: Arc::clone(&builtins::MOCK),
            call_count: 0,
            return_value: None,
            side_effect: None,
        }
    }

    /// Uses a subclass of `Mock` (e.g. a `MagicMock`) as the runtime class.
    pub fn with_class(mut self, class: ClassRef) -> Self {
        self.class = class;
        self
    }

    pub fn with_return_value(mut self, value: impl Into<Value>) -> Self {
        self.return_value = Some(Box::new(value.into()));
        self
    }

    pub fn with_side_effect(mut self, effect: impl Into<Value>) -> Self {
        self.side_effect = Some(Box::new(effect.into()));
        self
    }

    /// Records a call. Returns the side effect when one is configured,
    /// otherwise the return value (`None` when unset).
    pub fn call(&mut self) -> Value {
        self.call_count += 1;
        if let Some(effect) = &self.side_effect {
            return (**effect).clone();
        }
        self.return_value
            .as_deref()
            .cloned()
            .unwrap_or(Value::None)
    }

    /// The return value worth reporting: unset, `None` and nested mocks
    /// (the auto-created child of a real mock) all count as absent.
    pub fn reported_return_value(&self) -> Option<&Value> {
        self.return_value
            .as_deref()
            .filter(|v| !matches!(v, Value::None | Value::Mock(_)))
    }

    pub fn reported_side_effect(&self) -> Option<&Value> {
        self.side_effect
            .as_deref()
            .filter(|v| !matches!(v, Value::None))
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_counts_and_prefers_side_effect() {
        let mut mock = Mock::new().with_return_value(1).with_side_effect(2);
        assert_eq!(mock.call(), Value::Int(2));
        assert_eq!(mock.call_count, 1);
    }

    #[test]
    fn nested_mock_return_is_not_reported() {
        let mock = Mock::new().with_return_value(Mock::new());
        assert!(mock.reported_return_value().is_none());
    }
}
