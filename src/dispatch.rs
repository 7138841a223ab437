// ABOUTME: Dispatcher - maps an action name plus caller flags to discovery,
// ABOUTME: invocation or a not-found failure, with a process exit code.

use serde_json::{Map, Value};

use crate::action::{InvocationResult, Registry, describe, invoke};

/// What a human-facing caller asked for.
#[derive(Debug, Clone, Default)]
pub struct DispatchRequest {
    /// Raw arguments, validated by the invoker.
    pub arguments: Map<String, Value>,
    /// Describe instead of invoke. Wins over everything else.
    pub context: bool,
}

impl DispatchRequest {
    pub fn new(arguments: Map<String, Value>) -> Self {
        Self {
            arguments,
            context: false,
        }
    }

    pub fn context() -> Self {
        Self {
            arguments: Map::new(),
            context: true,
        }
    }
}

/// Structured output and the exit status that goes with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub output: Value,
    pub exit_code: i32,
}

impl Dispatch {
    fn result(result: InvocationResult) -> Self {
        let exit_code = if result.success { 0 } else { 1 };
        let output = serde_json::to_value(&result)
            .unwrap_or_else(|e| Value::String(format!("unserializable result: {}", e)));
        Self { output, exit_code }
    }

    /// Pretty JSON for stdout.
    pub fn render(&self) -> String {
        serde_json::to_string_pretty(&self.output).unwrap_or_else(|_| self.output.to_string())
    }
}

/// Route `name` through the registry.
pub async fn dispatch(registry: &Registry, name: &str, req: DispatchRequest) -> Dispatch {
    let action = match registry.lookup(name) {
        Ok(action) => action,
        Err(e) => return Dispatch::result(InvocationResult::failure(e.to_string())),
    };

    if req.context {
        tracing::debug!(action = name, "describing");
        return match serde_json::to_value(describe(action.as_ref())) {
            Ok(output) => Dispatch {
                output,
                exit_code: 0,
            },
            Err(e) => Dispatch::result(InvocationResult::failure(e.to_string())),
        };
    }

    Dispatch::result(invoke(action.as_ref(), &req.arguments).await)
}
