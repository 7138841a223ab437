// ABOUTME: Defines the LlmClient trait - the seam behind which the external
// ABOUTME: language model sits. A prompt and tools in, text or tool calls out.

use async_trait::async_trait;

use super::{Request, Response};
use crate::error::LlmError;

/// Trait for LLM client implementations.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Make one model call.
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError>;
}
