//! Test-framework integration.

use crate::config::PrettifierConfig;
use crate::errors::PrettifyError;
use crate::value::Value;

/// Id for a parametrized test case: the value rendered on a single line.
///
/// # Examples
///
/// ```rust
/// use prettifier::{parametrize_id, Value};
/// let value = Value::dict([(Value::from("a"), Value::from(1)), (Value::from("b"), Value::from(2))]);
/// assert_eq!(parametrize_id(&value).unwrap(), "{'a': 1, 'b': 2}");
/// ```
pub fn parametrize_id(value: &Value) -> Result<String, PrettifyError> {
    crate::prettify_with(value, &PrettifierConfig::single_line(), 0)
}
