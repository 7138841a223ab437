// ABOUTME: The invoker - validates arguments, gates destructive actions, runs
// ABOUTME: the effect once, and folds every outcome into an InvocationResult.

use std::time::Instant;

use serde_json::{Map, Value};
use tracing::Instrument;

use super::{Action, InvocationResult};
use crate::error::ActionError;

/// Name of the argument that confirms a destructive action.
pub const CONFIRM_ARG: &str = "confirm";

/// Invoke `action` with caller-supplied arguments.
///
/// Never returns an error: validation failures, a missing confirmation and
/// effect failures all come back as `success: false` results.
pub async fn invoke(action: &dyn Action, raw: &Map<String, Value>) -> InvocationResult {
    let span = tracing::info_span!(
        "action",
        action = action.name(),
        openinference.span.kind = "TOOL",
        tool.name = action.name(),
        input.value = %serde_json::Value::Object(raw.clone()),
        output.value = tracing::field::Empty,
        success = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    );

    async {
        let started = Instant::now();
        let result = run(action, raw).await;

        let span = tracing::Span::current();
        span.record("success", result.success);
        span.record("output.value", result.message.as_str());
        span.record("duration_ms", started.elapsed().as_millis() as u64);
        if result.success {
            tracing::debug!(summary = %result.message, count = ?result.count, "action succeeded");
        } else {
            tracing::warn!(reason = %result.message, "action failed");
        }
        result
    }
    .instrument(span)
    .await
}

async fn run(action: &dyn Action, raw: &Map<String, Value>) -> InvocationResult {
    let args = match action.inputs().validate(raw) {
        Ok(args) => args,
        Err(e) => return InvocationResult::failure(e.to_string()),
    };

    if action.requires_confirmation() && !args.flag(CONFIRM_ARG) {
        let err = ActionError::ConfirmationRequired(format!(
            "'{}' is destructive; pass {}=true (--confirm) to proceed",
            action.name(),
            CONFIRM_ARG
        ));
        return InvocationResult::failure(err.to_string());
    }

    match action.execute(&args).await {
        Ok(output) => InvocationResult::ok(output),
        Err(e) => InvocationResult::failure(e.to_string()),
    }
}

/// Invoke with a JSON value that should be an object (e.g. model-supplied input).
pub async fn invoke_value(action: &dyn Action, raw: &Value) -> InvocationResult {
    match raw {
        Value::Object(map) => invoke(action, map).await,
        Value::Null => invoke(action, &Map::new()).await,
        _ => InvocationResult::failure(
            ActionError::validation("arguments must be a JSON object").to_string(),
        ),
    }
}
