// ABOUTME: Agent runner - one turn is a single selection followed by running
// ABOUTME: each selected action in order. There is no loop back to the model.

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use super::{ActionCall, Binder, Selector};
use crate::action::{InvocationResult, Registry, invoke_value};
use crate::error::LlmError;
use crate::llm::Usage;

/// One selected call and what running it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CallOutcome {
    pub call: ActionCall,
    pub result: InvocationResult,
}

/// Result of one agent turn.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub goal: String,
    pub outcomes: Vec<CallOutcome>,
    /// Free text the model returned alongside (or instead of) calls.
    pub text: String,
    pub usage: Usage,
}

impl TurnOutcome {
    /// Data of every successful call whose payload is a string.
    pub fn greetings(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.result.success)
            .filter_map(|o| o.result.data.as_str().map(str::to_string))
            .collect()
    }
}

/// Binds the registry to a selector and executes what it picks.
pub struct Agent {
    agent_id: String,
    registry: Arc<Registry>,
    selector: Arc<dyn Selector>,
}

impl Agent {
    /// Create an agent over an existing registry.
    pub fn new(registry: Arc<Registry>, selector: Arc<dyn Selector>) -> Self {
        Self {
            agent_id: Uuid::new_v4().to_string(),
            registry,
            selector,
        }
    }

    /// Get the agent ID.
    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    /// Run one turn for `goal`.
    pub async fn run(&self, goal: &str) -> Result<TurnOutcome, LlmError> {
        let span = tracing::info_span!(
            "agent_turn",
            agent_id = %self.agent_id,
            openinference.span.kind = "AGENT",
            input.value = goal,
        );

        async {
            let tools = Binder::new(&self.registry).definitions();
            let selection = self.selector.select(goal, &tools).await?;
            tracing::debug!(calls = selection.calls.len(), "selection received");

            let mut outcomes = Vec::with_capacity(selection.calls.len());
            for call in selection.calls {
                // Names come from the model and are untrusted.
                let result = match self.registry.lookup(&call.name) {
                    Ok(action) => invoke_value(action.as_ref(), &call.arguments).await,
                    Err(e) => InvocationResult::failure(e.to_string()),
                };
                outcomes.push(CallOutcome { call, result });
            }

            Ok(TurnOutcome {
                goal: goal.to_string(),
                outcomes,
                text: selection.text,
                usage: selection.usage,
            })
        }
        .instrument(span)
        .await
    }
}
