//! Conversation state for one agent run.

use crate::llm::{ChatMessage, FunctionCall, Role, ToolCall};

/// A model-issued request to run a named tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub id: String,
    pub tool_name: String,
    pub arguments_json: String,
}

impl From<ToolCall> for ToolInvocation {
    fn from(call: ToolCall) -> Self {
        Self {
            id: call.id,
            tool_name: call.function.name,
            arguments_json: call.function.arguments,
        }
    }
}

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    User {
        text: String,
    },
    Assistant {
        text: Option<String>,
        invocations: Vec<ToolInvocation>,
    },
    ToolResult {
        invocation_id: String,
        text: String,
    },
}

impl Turn {
    /// Render as a chat-completion wire message.
    pub fn to_message(&self) -> ChatMessage {
        match self {
            Turn::User { text } => ChatMessage::user(text.clone()),
            Turn::Assistant { text, invocations } => ChatMessage {
                role: Role::Assistant,
                content: text.clone(),
                tool_calls: (!invocations.is_empty()).then(|| {
                    invocations
                        .iter()
                        .map(|inv| ToolCall {
                            id: inv.id.clone(),
                            call_type: "function".to_string(),
                            function: FunctionCall {
                                name: inv.tool_name.clone(),
                                arguments: inv.arguments_json.clone(),
                            },
                        })
                        .collect()
                }),
                tool_call_id: None,
            },
            Turn::ToolResult {
                invocation_id,
                text,
            } => ChatMessage::tool(invocation_id.clone(), text.clone()),
        }
    }
}

/// Append-only transcript, seeded with the user's prompt.
#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![Turn::User {
                text: prompt.into(),
            }],
        }
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.turns.iter().map(Turn::to_message).collect()
    }

    /// Ids of invocations from the latest assistant turn that have no result yet.
    pub fn unanswered(&self) -> Vec<&str> {
        let Some(start) = self
            .turns
            .iter()
            .rposition(|t| matches!(t, Turn::Assistant { .. }))
        else {
            return Vec::new();
        };

        let Turn::Assistant { invocations, .. } = &self.turns[start] else {
            return Vec::new();
        };

        invocations
            .iter()
            .filter(|inv| {
                !self.turns[start + 1..].iter().any(|t| {
                    matches!(t, Turn::ToolResult { invocation_id, .. } if *invocation_id == inv.id)
                })
            })
            .map(|inv| inv.id.as_str())
            .collect()
    }
}
