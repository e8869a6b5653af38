//! Dashboard variables: named, typed, togglable values shown next to the chart

use crate::errors::DashboardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which literal representation a variable's value holds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    String,
    Number,
    Boolean,
}

impl VariableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableKind::String => "string",
            VariableKind::Number => "number",
            VariableKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A variable value; serialized as a bare JSON literal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VariableValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl VariableValue {
    /// The kind this literal belongs to
    pub fn kind(&self) -> VariableKind {
        match self {
            VariableValue::Boolean(_) => VariableKind::Boolean,
            VariableValue::Number(_) => VariableKind::Number,
            VariableValue::String(_) => VariableKind::String,
        }
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableValue::Boolean(b) => write!(f, "{b}"),
            VariableValue::Number(n) => write!(f, "{n}"),
            VariableValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for VariableValue {
    fn from(value: bool) -> Self {
        VariableValue::Boolean(value)
    }
}

impl From<f64> for VariableValue {
    fn from(value: f64) -> Self {
        VariableValue::Number(value)
    }
}

impl From<&str> for VariableValue {
    fn from(value: &str) -> Self {
        VariableValue::String(value.to_string())
    }
}

impl From<String> for VariableValue {
    fn from(value: String) -> Self {
        VariableValue::String(value)
    }
}

/// One selectable choice for an enumerated variable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableOption {
    pub label: String,
    pub value: VariableValue,
}

impl VariableOption {
    pub fn new(label: impl Into<String>, value: impl Into<VariableValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub value: VariableValue,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    pub description: String,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<VariableOption>>,
}

impl Variable {
    /// Create a variable whose kind is taken from its initial value
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<VariableValue>,
        description: impl Into<String>,
        active: bool,
    ) -> Self {
        let value = value.into();
        Self {
            id: id.into(),
            name: name.into(),
            kind: value.kind(),
            value,
            description: description.into(),
            active,
            options: None,
        }
    }

    pub fn with_options(mut self, options: Vec<VariableOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Whether `value` is one of the declared options. Variables without
    /// options accept anything.
    pub fn is_option(&self, value: &VariableValue) -> bool {
        match &self.options {
            Some(options) => options.iter().any(|o| &o.value == value),
            None => true,
        }
    }

    /// Check that `value` fits this variable's kind and options
    pub fn check_value(&self, value: &VariableValue) -> Result<(), DashboardError> {
        if value.kind() != self.kind {
            return Err(DashboardError::Validation {
                message: format!(
                    "Variable {} is of type {} but got a {} value",
                    self.id,
                    self.kind,
                    value.kind()
                ),
                field: Some("value".to_string()),
            });
        }

        if !self.is_option(value) {
            return Err(DashboardError::Validation {
                message: format!("Value {} is not an option of variable {}", value, self.id),
                field: Some("value".to_string()),
            });
        }

        Ok(())
    }

    /// Tooltip line shown next to chart points
    pub fn summary(&self) -> String {
        format!("{}: {}", self.name, self.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariableGroup {
    pub id: String,
    pub name: String,
    pub variables: Vec<Variable>,
}

impl VariableGroup {
    pub fn new(id: impl Into<String>, name: impl Into<String>, variables: Vec<Variable>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            variables,
        }
    }

    pub fn position_of(&self, variable_id: &str) -> Option<usize> {
        self.variables.iter().position(|v| v.id == variable_id)
    }
}
