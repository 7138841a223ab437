// ABOUTME: Defines ActionOutput (what an effect returns) and InvocationResult,
// ABOUTME: the structured success/failure envelope every invocation produces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value returned by a successful effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutput {
    /// Human-readable summary.
    pub message: String,

    /// Action-specific payload.
    pub data: Value,

    /// Explicit count; when absent the invoker derives it from an array payload.
    pub count: Option<usize>,
}

impl ActionOutput {
    /// Create an output with a summary and payload.
    pub fn new(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            message: message.into(),
            data: data.into(),
            count: None,
        }
    }

    /// Override the reported count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub success: bool,
    pub message: String,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl InvocationResult {
    /// Wrap a successful effect output.
    pub fn ok(output: ActionOutput) -> Self {
        let count = output
            .count
            .or_else(|| output.data.as_array().map(Vec::len));
        Self {
            success: true,
            message: output.message,
            data: output.data,
            count,
        }
    }

    /// Create a failure result. Data is always empty and count zero.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Value::Array(Vec::new()),
            count: Some(0),
        }
    }
}
