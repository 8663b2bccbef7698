//! Plugin selection: class-distance priorities, registry errors and error
//! propagation out of rendering functions.

mod common;

use std::sync::Arc;

use common::make_class;
use prettifier::plugin::{Plugin, Priority};
use prettifier::plugins::{list_plugin, object_plugin, str_plugin};
use prettifier::registry::{default_registry, PluginRegistry};
use prettifier::value::class::{builtins, Class, ClassRef};
use prettifier::{Prettifier, PrettifyError, Value};

/// Plugin that renders the fixed text `label`.
fn labelled(types: Vec<ClassRef>, label: &'static str) -> Plugin {
    Plugin::new(types, move |p, _, level| Ok(p.render_line(label, level)))
}

fn engine_with(plugins: Vec<(&str, Plugin)>) -> Prettifier {
    Prettifier::with_registry(0, "", plugins.into_iter().collect())
}

#[cfg(test)]
mod priority_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_exact_class_has_priority_zero() {
        assert_eq!(str_plugin().priority(&"x".into()), Priority::Score(0));
    }

    #[test]
    fn test_object_is_one_step_up_for_builtins() {
        assert_eq!(object_plugin().priority(&"x".into()), Priority::Score(-1));
        assert_eq!(object_plugin().priority(&Value::Bool(true)), Priority::Score(-2));
    }

    #[test]
    fn test_unrelated_class_is_negative_infinity() {
        let priority = str_plugin().priority(&Value::list(vec![]));
        assert_eq!(priority, Priority::Inapplicable);
        assert_eq!(priority.as_f64(), f64::NEG_INFINITY);
        assert_eq!(priority.to_string(), "-inf");
    }

    #[test]
    fn test_abstract_base_matches_subclasses() {
        let stub = Class::subclass("tests", "StubSequence", &builtins::SEQUENCE);
        let value = Value::List(prettifier::value::Sequence::new(stub, vec![]));
        assert_eq!(list_plugin().priority(&value), Priority::Score(-1));
    }
}

#[cfg(test)]
mod selection_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_most_specific_plugin_wins() {
        let engine = engine_with(vec![
            ("object", labelled(vec![builtins::OBJECT.clone()], "object")),
            ("str", labelled(vec![builtins::STR.clone()], "str")),
        ]);
        assert_eq!(engine.render(&"x".into(), 0).unwrap(), "str");
        assert_eq!(engine.render(&1.into(), 0).unwrap(), "object");
    }

    #[test]
    fn test_select_plugin_reports_the_winner_name() {
        let engine = Prettifier::default();
        let (name, _) = engine.select_plugin(&Value::tuple(vec![])).unwrap();
        assert_eq!(name, "tuple");
        let (name, _) = engine.select_plugin(&Value::None).unwrap();
        assert_eq!(name, "object");
    }

    #[test]
    fn test_closer_ancestor_beats_farther_one() {
        let base = make_class("Base");
        let child = Class::subclass("tests", "Child", &base);
        let engine = engine_with(vec![
            ("object", labelled(vec![builtins::OBJECT.clone()], "object")),
            ("base", labelled(vec![Arc::clone(&base)], "base")),
        ]);
        assert_eq!(engine.render(&Value::object(child), 0).unwrap(), "base");
    }

    #[test]
    fn test_diamond_uses_c3_distances() {
        let a = make_class("A");
        let b = Class::subclass("tests", "B", &a);
        let c = Class::subclass("tests", "C", &a);
        let d = Class::new("tests", "D", &[b.clone(), c.clone()]).unwrap();

        let engine = engine_with(vec![
            ("a", labelled(vec![a], "a")),
            ("c", labelled(vec![c], "c")),
        ]);
        assert_eq!(engine.render(&Value::object(d.clone()), 0).unwrap(), "c");

        let engine = engine_with(vec![
            ("b", labelled(vec![b.clone()], "b")),
            ("d", labelled(vec![b, d.clone()], "d")),
        ]);
        assert_eq!(engine.render(&Value::object(d), 0).unwrap(), "d");
    }

    #[test]
    fn test_replacing_a_default_plugin() {
        let mut registry = default_registry();
        let previous = registry.register("str", labelled(vec![builtins::STR.clone()], "S"));
        assert!(previous.is_some());
        let engine = Prettifier::with_registry(0, "", registry);
        assert_eq!(engine.render(&Value::from(vec!["a", "b"]), 0).unwrap(), "[S, S]");
    }

    #[test]
    fn test_default_registry_is_not_mutated_by_copies() {
        let mut registry = default_registry();
        registry.remove("str");
        assert!(!registry.has("str"));
        assert!(default_registry().has("str"));
    }
}

#[cfg(test)]
mod dispatch_error_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_registry_has_no_plugins() {
        let engine = Prettifier::with_registry(2, "\n", PluginRegistry::new());
        let err = engine.render(&1.into(), 0).unwrap_err();
        assert!(matches!(err, PrettifyError::NoPlugins));
        assert!(err.to_string().contains("No plugins"));
    }

    #[test]
    fn test_no_applicable_plugin() {
        let engine = engine_with(vec![("str", str_plugin())]);
        let err = engine.render(&Value::from(vec![1]), 0).unwrap_err();
        assert!(matches!(err, PrettifyError::NoMatch { .. }));
        assert_eq!(err.to_string(), "No matching plugin found for [1]");
    }

    #[test]
    fn test_no_match_inside_a_container() {
        let engine = engine_with(vec![("list", list_plugin())]);
        let err = engine.render(&Value::from(vec![1]), 0).unwrap_err();
        assert_eq!(err.to_string(), "No matching plugin found for 1");
    }

    #[test]
    fn test_equal_priority_is_ambiguous() {
        let engine = engine_with(vec![("str2", str_plugin()), ("str1", str_plugin())]);
        let err = engine.render(&"x".into(), 0).unwrap_err();
        match &err {
            PrettifyError::AmbiguousPlugin { plugins, .. } => {
                assert_eq!(plugins, &vec!["str1".to_string(), "str2".to_string()]);
            }
            other => panic!("expected AmbiguousPlugin, got {other:?}"),
        }
        assert_eq!(err.to_string(), "More than one plugin found for 'x': str1, str2");
    }

    #[test]
    fn test_ambiguity_only_matters_for_the_tied_class() {
        let engine = engine_with(vec![
            ("object", object_plugin()),
            ("str1", str_plugin()),
            ("str2", str_plugin()),
        ]);
        assert_eq!(engine.render(&1.into(), 0).unwrap(), "1");
        assert!(engine.render(&"x".into(), 0).is_err());
    }
}

#[cfg(test)]
mod propagation_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failing(types: Vec<ClassRef>) -> Plugin {
        Plugin::new(types, |_, _, _| Err(PrettifyError::input("boom")))
    }

    #[test]
    fn test_plugin_error_is_returned_unchanged() {
        let engine = engine_with(vec![("int", failing(vec![builtins::INT.clone()]))]);
        let err = engine.render(&1.into(), 0).unwrap_err();
        assert!(matches!(err, PrettifyError::Input { ref message } if message == "boom"));
    }

    #[test]
    fn test_nested_plugin_error_aborts_the_container() {
        let engine = engine_with(vec![
            ("list", list_plugin()),
            ("int", failing(vec![builtins::INT.clone()])),
        ]);
        let err = engine.render(&Value::from(vec![1, 2]), 0).unwrap_err();
        assert!(matches!(err, PrettifyError::Input { .. }));
    }

    #[test]
    fn test_render_strips_trailing_whitespace() {
        let engine = Prettifier::with_registry(
            2,
            "\n",
            vec![("object", labelled(vec![builtins::OBJECT.clone()], "x  "))]
                .into_iter()
                .collect(),
        );
        assert_eq!(engine.render(&Value::None, 1).unwrap(), "  x");
    }
}
