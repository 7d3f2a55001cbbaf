//! Core agent loop implementation.

use std::sync::Arc;

use thiserror::Error;

use crate::config::Config;
use crate::llm::{FinishReason, LlmClient, LlmError, OpenRouterClient};
use crate::tools::{RegistryError, ToolRegistry};

use super::conversation::{Conversation, ToolInvocation, Turn};

/// Errors that abort an agent run.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("no choices in response")]
    NoChoices,

    #[error("finish reason is tool_calls, but the response has no tool calls")]
    MissingToolCalls,
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct AgentRun {
    /// The final answer, or `None` if the iteration budget ran out first.
    pub final_text: Option<String>,
    pub conversation: Conversation,
    /// Number of chat-completion requests sent.
    pub requests: usize,
}

/// The autonomous agent.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl Agent {
    /// Create an agent backed by the OpenRouter client and the built-in tools.
    pub fn new(config: &Config) -> Result<Self, RegistryError> {
        let llm = Arc::new(OpenRouterClient::new(
            config.api_key.clone(),
            config.base_url.clone(),
        ));
        Ok(Self::with_client(config, llm, ToolRegistry::builtin()?))
    }

    /// Create an agent with an explicit client and tool registry.
    pub fn with_client(config: &Config, llm: Arc<dyn LlmClient>, tools: ToolRegistry) -> Self {
        Self {
            llm,
            tools,
            model: config.model.clone(),
            max_iterations: config.max_iterations,
        }
    }

    /// Run the loop for one prompt.
    ///
    /// Tool failures and unknown tools are fed back to the model as tool
    /// results. Transport failures and protocol violations abort the run.
    pub async fn run(&self, prompt: &str) -> Result<AgentRun, AgentError> {
        let mut conversation = Conversation::new(prompt);
        let specs = self.tools.specs();

        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);
            debug_assert!(conversation.unanswered().is_empty());

            let messages = conversation.to_messages();
            tracing::info!("Sending LLM {} messages", messages.len());

            let completion = self
                .llm
                .chat_completion(&self.model, &messages, specs)
                .await?;
            let requests = iteration + 1;

            let choice = completion
                .choices
                .into_iter()
                .next()
                .ok_or(AgentError::NoChoices)?;
            let text = choice.message.content;
            let invocations: Vec<ToolInvocation> = choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(ToolInvocation::from)
                .collect();

            match choice.finish_reason {
                Some(FinishReason::Stop) => {
                    conversation.push(Turn::Assistant {
                        text: text.clone(),
                        invocations,
                    });
                    return Ok(AgentRun {
                        final_text: Some(text.unwrap_or_default()),
                        conversation,
                        requests,
                    });
                }
                Some(FinishReason::ToolCalls) => {
                    if invocations.is_empty() {
                        return Err(AgentError::MissingToolCalls);
                    }
                    conversation.push(Turn::Assistant {
                        text,
                        invocations: invocations.clone(),
                    });

                    let names: Vec<&str> =
                        invocations.iter().map(|i| i.tool_name.as_str()).collect();
                    tracing::info!(tools = ?names, "tool_calls");

                    for invocation in invocations {
                        let result = self
                            .tools
                            .dispatch(&invocation.tool_name, &invocation.arguments_json)
                            .await;
                        conversation.push(Turn::ToolResult {
                            invocation_id: invocation.id,
                            text: result.text,
                        });
                    }
                }
                other => {
                    // Tool calls are not run without the tool_calls signal, so keep
                    // them out of the transcript to avoid unanswered invocations.
                    if !invocations.is_empty() {
                        tracing::warn!(
                            finish_reason = ?other,
                            dropped = invocations.len(),
                            "Ignoring tool calls without tool_calls finish reason"
                        );
                    }
                    tracing::debug!(finish_reason = ?other, "Non-terminal finish reason");
                    conversation.push(Turn::Assistant {
                        text,
                        invocations: Vec::new(),
                    });
                }
            }
        }

        tracing::warn!(
            "Max iterations ({}) reached without a final answer",
            self.max_iterations
        );
        Ok(AgentRun {
            final_text: None,
            conversation,
            requests: self.max_iterations,
        })
    }
}
