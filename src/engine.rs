//! The rendering engine.
//!
//! [`Prettifier`] owns the layout settings and the plugin registry. It picks
//! one plugin per value and hands it the current nesting level; plugins call
//! back into [`Prettifier::render`] for children and into
//! [`Prettifier::render_fields`] / [`Prettifier::render_line`] for layout, so
//! every container type shares the same indentation and collapsing rules.

use std::fmt::Display;

use tracing::{debug, trace};

use crate::config::PrettifierConfig;
use crate::errors::PrettifyError;
use crate::plugin::{Plugin, Priority};
use crate::registry::{default_registry, PluginRegistry};
use crate::value::Value;

// ============================================================================
// ENGINE STATE
// ============================================================================

/// Immutable rendering configuration plus the plugins to dispatch to.
#[derive(Debug, Clone)]
pub struct Prettifier {
    indent: usize,
    newline: String,
    registry: PluginRegistry,
}

impl Prettifier {
    /// Engine with the default plugin registry.
    pub fn new(indent: usize, newline: impl Into<String>) -> Self {
        Self::with_registry(indent, newline, default_registry())
    }

    pub fn with_registry(indent: usize, newline: impl Into<String>, registry: PluginRegistry) -> Self {
        Self {
            indent,
            newline: newline.into(),
            registry,
        }
    }

    pub fn from_config(config: &PrettifierConfig) -> Self {
        Self::new(config.indent, config.newline.clone())
    }

    /// Everything on one line: no indentation, no line terminator.
    pub fn single_line() -> Self {
        Self::from_config(&PrettifierConfig::single_line())
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn newline(&self) -> &str {
        &self.newline
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    /// Picks the single most specific plugin for `value`.
    ///
    /// # Errors
    /// - `NoPlugins` when the registry is empty
    /// - `NoMatch` when no plugin applies to the value's class
    /// - `AmbiguousPlugin` when several plugins tie for the best priority
    pub fn select_plugin(&self, value: &Value) -> Result<(&str, &Plugin), PrettifyError> {
        if self.registry.is_empty() {
            debug!("dispatch attempted with an empty plugin registry");
            return Err(PrettifyError::NoPlugins);
        }

        let class = value.class();
        let scored: Vec<(&str, &Plugin, Priority)> = self
            .registry
            .iter()
            .map(|(name, plugin)| (name, plugin, plugin.priority_for_class(&class)))
            .collect();

        let best = scored
            .iter()
            .map(|(_, _, priority)| *priority)
            .max()
            .unwrap_or(Priority::Inapplicable);
        if !best.is_applicable() {
            debug!(class = %class.qualified_name(), "no plugin applies");
            return Err(PrettifyError::NoMatch { value: value.repr() });
        }

        let mut winners: Vec<(&str, &Plugin)> = scored
            .into_iter()
            .filter(|(_, _, priority)| *priority == best)
            .map(|(name, plugin, _)| (name, plugin))
            .collect();
        if winners.len() > 1 {
            let mut plugins: Vec<String> = winners.iter().map(|(name, _)| name.to_string()).collect();
            plugins.sort();
            debug!(class = %class.qualified_name(), ?plugins, "ambiguous plugins");
            return Err(PrettifyError::AmbiguousPlugin {
                value: value.repr(),
                plugins,
            });
        }

        let (name, plugin) = winners.remove(0);
        trace!(plugin = name, class = %class.qualified_name(), %best, "selected plugin");
        Ok((name, plugin))
    }

    // ========================================================================
    // RENDERING
    // ========================================================================

    /// Renders a value at a nesting level, trailing whitespace stripped.
    ///
    /// Errors raised by the selected plugin propagate unchanged.
    pub fn render(&self, value: &Value, level: usize) -> Result<String, PrettifyError> {
        let (_, plugin) = self.select_plugin(value)?;
        let rendered = plugin.render(self, value, level)?;
        Ok(rendered.trim_end().to_string())
    }

    /// Lays out already-rendered fields between `start` and `end`.
    ///
    /// Zero or one field stays on a single line. Two or more fields get one
    /// line each at `level + 1`, separated by `separator`, with `start` and
    /// `end` on their own lines at `level`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use prettifier::Prettifier;
    /// let p = Prettifier::default();
    /// let fields = vec!["1".to_string(), "2".to_string()];
    /// assert_eq!(p.render_fields("[", ", ", "]", &fields, 0), "[\n  1, \n  2\n]");
    /// assert_eq!(p.render_fields("[", ", ", "]", &fields[..1], 0), "[1]");
    /// ```
    pub fn render_fields<S: AsRef<str>>(
        &self,
        start: &str,
        separator: &str,
        end: &str,
        fields: &[S],
        level: usize,
    ) -> String {
        if fields.len() > 1 {
            let last = fields.len() - 1;
            let mut out = self.render_line(start, level);
            for (index, field) in fields.iter().enumerate() {
                let sep = if index < last { separator } else { "" };
                out.push_str(&self.render_line(format_args!("{}{sep}", field.as_ref().trim()), level + 1));
            }
            out.push_str(self.render_line(end, level).trim_end());
            out
        } else {
            let field = fields.first().map_or("", |f| f.as_ref().trim());
            format!("{start}{field}{end}")
        }
    }

    /// Indents `text` for `level` and appends the line terminator.
    pub fn render_line(&self, text: impl Display, level: usize) -> String {
        format!("{:width$}{text}{}", "", self.newline, width = self.indent * level)
    }
}

impl Default for Prettifier {
    fn default() -> Self {
        Self::from_config(&PrettifierConfig::default())
    }
}
