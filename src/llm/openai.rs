// ABOUTME: OpenAI chat-completions client implementing LlmClient.
// ABOUTME: Sends the system prompt, the goal and bound tools; parses tool calls back.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use super::{LlmClient, Request, Response, StopReason, ToolCall, ToolDefinition, Usage};
use crate::config::DEFAULT_OPENAI_BASE_URL;
use crate::error::LlmError;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ChatTool<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ChatFunction<'a>,
}

#[derive(Debug, Serialize)]
struct ChatFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

impl<'a> From<&'a ToolDefinition> for ChatTool<'a> {
    fn from(tool: &'a ToolDefinition) -> Self {
        ChatTool {
            kind: "function",
            function: ChatFunction {
                name: &tool.name,
                description: &tool.description,
                parameters: &tool.input_schema,
            },
        }
    }
}

impl<'a> From<&'a Request> for ChatRequest<'a> {
    fn from(req: &'a Request) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &req.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &req.prompt,
        });

        ChatRequest {
            model: &req.model,
            messages,
            max_tokens: req.max_tokens,
            temperature: req.temperature,
            tools: req.tools.iter().map(ChatTool::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    id: String,
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ChatToolCall>,
}

#[derive(Debug, Deserialize)]
struct ChatToolCall {
    id: String,
    function: ChatFunctionCall,
}

/// Arguments arrive as a JSON-encoded string.
#[derive(Debug, Deserialize)]
struct ChatFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl TryFrom<ChatResponse> for Response {
    type Error = LlmError;

    fn try_from(resp: ChatResponse) -> Result<Self, Self::Error> {
        let choice = resp.choices.into_iter().next().ok_or_else(|| LlmError::Api {
            status: 200,
            message: "response contained no choices".to_string(),
        })?;

        let tool_calls = choice
            .message
            .tool_calls
            .into_iter()
            .map(|call| {
                // Unparseable arguments stay a string; the invoker rejects non-objects.
                let arguments = serde_json::from_str(&call.function.arguments)
                    .unwrap_or(serde_json::Value::String(call.function.arguments));
                ToolCall::new(call.id, call.function.name, arguments)
            })
            .collect();

        let stop_reason = match choice.finish_reason.as_deref() {
            Some("tool_calls") => StopReason::ToolUse,
            Some("length") => StopReason::MaxTokens,
            _ => StopReason::EndTurn,
        };

        Ok(Response {
            id: resp.id,
            model: resp.model,
            text: choice.message.content.unwrap_or_default(),
            tool_calls,
            stop_reason,
            usage: resp.usage.map_or(Usage::default(), |u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Client for the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    api_key: SecretString,
    base_url: String,
    http: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the client at a different API base (proxies, compatible servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured HTTP client (timeouts etc.).
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    async fn send(&self, req: &Request) -> Result<Response, LlmError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&ChatRequest::from(req))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Response::try_from(response.json::<ChatResponse>().await?)
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        // Attribute names follow OpenInference so Phoenix shows model and token counts.
        let span = tracing::info_span!(
            "llm_call",
            openinference.span.kind = "LLM",
            llm.model_name = %req.model,
            llm.tools = req.tools.len(),
            llm.token_count.prompt = tracing::field::Empty,
            llm.token_count.completion = tracing::field::Empty,
            llm.token_count.total = tracing::field::Empty,
        );

        async {
            let response = self.send(req).await?;
            let span = tracing::Span::current();
            span.record("llm.token_count.prompt", response.usage.input_tokens);
            span.record("llm.token_count.completion", response.usage.output_tokens);
            span.record("llm.token_count.total", response.usage.total());
            Ok(response)
        }
        .instrument(span)
        .await
    }
}
