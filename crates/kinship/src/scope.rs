//! Scope descriptors - named single-predicate query filters
//!
//! A scope stores its predicate in the two-field `operator_or_value` /
//! `value` shape: when `value` is absent, `operator_or_value` holds the
//! equality value and the operator is `=`; when `value` is present,
//! `operator_or_value` holds the operator string. `Option::None` marks
//! absence, so a scope whose comparison value is JSON `null` stays
//! distinguishable from the two-argument form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An immutable named query scope: one `(column, operator, value)`
/// predicate attached to a model type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    name: String,
    column: String,
    operator_or_value: Value,
    value: Option<Value>,
}

impl Scope {
    /// Equality scope: `column = value`.
    pub fn new(name: impl Into<String>, column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            operator_or_value: value.into(),
            value: None,
        }
    }

    /// Comparison scope with an explicit operator: `column <op> value`.
    pub fn with_operator(
        name: impl Into<String>,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            column: column.into(),
            operator_or_value: Value::String(operator.into()),
            value: Some(value.into()),
        }
    }

    /// The scope name; scopes are always cached under this name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column the predicate applies to.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The effective comparison operator.
    pub fn operator(&self) -> &str {
        match self.value {
            // Two-argument form: operator_or_value is the value
            None => "=",
            Some(_) => self.operator_or_value.as_str().unwrap_or("="),
        }
    }

    /// The effective comparison value.
    pub fn value(&self) -> &Value {
        self.value.as_ref().unwrap_or(&self.operator_or_value)
    }
}
