// ABOUTME: Selector - the injected decision-maker that turns a goal plus the
// ABOUTME: available tool definitions into zero or more action calls.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::llm::{LlmClient, Request, ToolCall, ToolDefinition, Usage};

/// Instructions given to the model on every selection.
pub const GREETING_SYSTEM_PROMPT: &str = "You are a greeting assistant that can greet people in different languages.
You MUST use the appropriate tool for each language:
- Use hello_english for English greetings
- Use hello_mandarin for Mandarin/Chinese greetings
- Use hello_spanish for Spanish greetings
- Use hello_hebrew for Hebrew greetings

IMPORTANT: You must ALWAYS use the tools to generate greetings. Never generate greetings yourself.";

/// One action the selector chose to run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl From<ToolCall> for ActionCall {
    fn from(call: ToolCall) -> Self {
        Self {
            id: call.id,
            name: call.name,
            arguments: call.arguments,
        }
    }
}

/// What a selector decided for one goal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub calls: Vec<ActionCall>,
    /// Any free text the selector produced alongside the calls.
    pub text: String,
    pub usage: Usage,
}

/// Decides which actions to run for a goal.
#[async_trait]
pub trait Selector: Send + Sync {
    async fn select(&self, goal: &str, tools: &[ToolDefinition]) -> Result<Selection, LlmError>;
}

/// A selector backed by exactly one model call per goal.
pub struct LlmSelector {
    client: Arc<dyn LlmClient>,
    model: String,
    system_prompt: &'static str,
}

impl LlmSelector {
    /// Create a selector with the greeting system prompt and temperature 0.
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: GREETING_SYSTEM_PROMPT,
        }
    }
}

#[async_trait]
impl Selector for LlmSelector {
    async fn select(&self, goal: &str, tools: &[ToolDefinition]) -> Result<Selection, LlmError> {
        let request = Request::new(&self.model)
            .system(self.system_prompt)
            .prompt(goal)
            .tools(tools.iter().cloned())
            .temperature(0.0)
            .max_tokens(1024);

        let response = self.client.create_message(&request).await?;

        Ok(Selection {
            calls: response.tool_calls.into_iter().map(ActionCall::from).collect(),
            text: response.text,
            usage: response.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedClient;

    #[tokio::test]
    async fn test_selection_from_tool_calls() {
        let client = Arc::new(ScriptedClient::new().respond_with(vec![
            ToolCall::new("c1", "hello_english", serde_json::json!({"name": "Alice"})),
        ]));
        let selector = LlmSelector::new(client.clone(), "gpt-3.5-turbo");

        let selection = selector.select("Say hello to Alice", &[]).await.unwrap();
        assert_eq!(selection.calls.len(), 1);
        assert_eq!(selection.calls[0].name, "hello_english");
        assert_eq!(client.calls(), 1);

        let sent = client.requests();
        assert_eq!(sent[0].system.as_deref(), Some(GREETING_SYSTEM_PROMPT));
        assert_eq!(sent[0].prompt, "Say hello to Alice");
        assert_eq!(sent[0].temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_text_only_selects_nothing() {
        let client = Arc::new(ScriptedClient::new().respond_with_text("Hi!"));
        let selector = LlmSelector::new(client, "gpt-3.5-turbo");

        let selection = selector.select("Say hi", &[]).await.unwrap();
        assert!(selection.calls.is_empty());
        assert_eq!(selection.text, "Hi!");
    }
}
