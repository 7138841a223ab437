//! Test doubles for the external collaborators.
//!
//! - [`ScriptedClient`]: an [`LlmClient`] that replays queued responses and
//!   records every request it receives.
//! - [`MemoryStore`](crate::store::MemoryStore) lives in the store module and
//!   covers the trace store side.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::LlmError;
use crate::llm::{LlmClient, Request, Response, StopReason, ToolCall, Usage};

/// Tokens reported for each scripted response unless overridden.
pub const SCRIPTED_USAGE: Usage = Usage {
    input_tokens: 100,
    output_tokens: 20,
};

/// An LLM client that replays a script.
///
/// Each call pops the next queued response. When the script runs out the
/// client answers with an API error, so a test that over-calls fails loudly.
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<(String, Vec<ToolCall>)>>,
    requests: Mutex<Vec<Request>>,
    call_count: AtomicUsize,
}

impl ScriptedClient {
    /// Create a client with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response that calls `calls`.
    pub fn respond_with(self, calls: Vec<ToolCall>) -> Self {
        self.push(String::new(), calls)
    }

    /// Queue a text-only response.
    pub fn respond_with_text(self, text: impl Into<String>) -> Self {
        self.push(text.into(), Vec::new())
    }

    fn push(self, text: String, calls: Vec<ToolCall>) -> Self {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back((text, calls));
        self
    }

    /// Number of `create_message` calls so far.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(req.clone());

        let (text, tool_calls) = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .ok_or_else(|| LlmError::Api {
                status: 500,
                message: format!("script exhausted at call {}", n + 1),
            })?;

        let stop_reason = if tool_calls.is_empty() {
            StopReason::EndTurn
        } else {
            StopReason::ToolUse
        };

        Ok(Response {
            id: format!("scripted-{}", n + 1),
            model: req.model.clone(),
            text,
            tool_calls,
            stop_reason,
            usage: SCRIPTED_USAGE,
        })
    }
}
