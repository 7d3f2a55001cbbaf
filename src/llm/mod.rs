//! Chat-completion client abstraction.
//!
//! The agent loop only sees [`LlmClient`]; [`OpenRouterClient`] is the HTTP
//! implementation used by the binary.

mod client;
mod types;

use async_trait::async_trait;

use crate::tools::ToolSpec;

pub use client::{LlmError, OpenRouterClient};
pub use types::{
    ChatCompletion, ChatCompletionRequest, ChatMessage, Choice, FinishReason, FunctionCall,
    FunctionDefinition, Role, ToolCall, ToolDefinition,
};

/// Sends one chat-completion request and returns the decoded response.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> Result<ChatCompletion, LlmError>;
}
