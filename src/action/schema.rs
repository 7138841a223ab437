// ABOUTME: Declarative input schemas for actions and argument validation.
// ABOUTME: Raw caller arguments are coerced into typed Arguments or rejected.

use serde_json::{Map, Value};

use crate::error::ActionError;

/// The declared type of an input parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Boolean,
}

impl ParamType {
    /// Name used in descriptors and JSON Schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Boolean => "boolean",
        }
    }

    fn article(&self) -> &'static str {
        match self {
            ParamType::Integer => "an",
            _ => "a",
        }
    }
}

/// One named input parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamType,
    pub required: bool,
    pub description: String,
    /// Reject blank strings.
    pub non_empty: bool,
}

impl ParamSpec {
    /// A required string parameter.
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamType::String,
            required: true,
            description: description.into(),
            non_empty: false,
        }
    }

    /// A required integer parameter.
    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ParamType::Integer,
            ..Self::string(name, description)
        }
    }

    /// A required boolean parameter.
    pub fn boolean(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: ParamType::Boolean,
            ..Self::string(name, description)
        }
    }

    /// Mark the parameter optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Reject blank string values.
    pub fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    fn coerce(&self, value: &Value) -> Result<Value, ActionError> {
        let mismatch = || {
            ActionError::validation(format!(
                "argument '{}' must be {} {}",
                self.name,
                self.kind.article(),
                self.kind.as_str()
            ))
        };

        match self.kind {
            ParamType::String => {
                let s = value.as_str().ok_or_else(mismatch)?;
                if self.non_empty && s.trim().is_empty() {
                    return Err(ActionError::validation(format!(
                        "argument '{}' must not be empty",
                        self.name
                    )));
                }
                Ok(Value::String(s.to_string()))
            }
            ParamType::Integer => {
                let n = match value {
                    Value::Number(n) => n.as_u64(),
                    Value::String(s) => s.trim().parse::<u64>().ok(),
                    _ => None,
                };
                n.map(Value::from).ok_or_else(|| {
                    ActionError::validation(format!(
                        "argument '{}' must be a non-negative integer",
                        self.name
                    ))
                })
            }
            ParamType::Boolean => {
                let b = match value {
                    Value::Bool(b) => Some(*b),
                    Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                        "true" | "1" | "yes" => Some(true),
                        "false" | "0" | "no" => Some(false),
                        _ => None,
                    },
                    _ => None,
                };
                b.map(Value::Bool).ok_or_else(mismatch)
            }
        }
    }
}

/// Ordered list of parameters an action accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSchema {
    params: Vec<ParamSpec>,
}

impl InputSchema {
    /// An empty schema (action takes no arguments).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Declared parameters in order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Look up a declared parameter.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Validate raw arguments, stopping at the first problem.
    ///
    /// Unknown keys are reported first (in sorted order), then declared
    /// parameters are checked in declaration order. JSON `null` counts as absent.
    pub fn validate(&self, raw: &Map<String, Value>) -> Result<Arguments, ActionError> {
        let mut keys: Vec<&String> = raw.keys().collect();
        keys.sort();
        if let Some(unknown) = keys.into_iter().find(|k| self.get(k).is_none()) {
            return Err(ActionError::validation(format!(
                "unknown argument '{}'",
                unknown
            )));
        }

        let mut values = Map::new();
        for spec in &self.params {
            match raw.get(&spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        return Err(ActionError::validation(format!(
                            "missing required argument '{}'",
                            spec.name
                        )));
                    }
                }
                Some(value) => {
                    values.insert(spec.name.clone(), spec.coerce(value)?);
                }
            }
        }

        Ok(Arguments { values })
    }

    /// Render as a JSON Schema object for model tool binding.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for p in &self.params {
            properties.insert(
                p.name.clone(),
                serde_json::json!({
                    "type": p.kind.as_str(),
                    "description": p.description,
                }),
            );
        }
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false
        })
    }
}

/// Arguments that passed schema validation, with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    /// String argument, if supplied.
    pub fn str(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(Value::as_str)
    }

    /// String argument for a required parameter.
    pub fn string(&self, name: &str) -> Result<String, ActionError> {
        self.str(name)
            .map(str::to_string)
            .ok_or_else(|| ActionError::validation(format!("missing required argument '{}'", name)))
    }

    /// Integer argument, if supplied.
    pub fn int(&self, name: &str) -> Option<u64> {
        self.values.get(name).and_then(Value::as_u64)
    }

    /// Boolean argument; absent counts as false.
    pub fn flag(&self, name: &str) -> bool {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The validated values as a JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}
