//! Agent module - the core autonomous agent logic.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Seed the conversation with the user prompt
//! 2. Call the LLM with the available tool schemas
//! 3. If the LLM requests tool calls, execute them in order and feed results back
//! 4. Repeat until the LLM stops with a final answer or max iterations is reached

mod agent_loop;
mod conversation;

pub use agent_loop::{Agent, AgentError, AgentRun};
pub use conversation::{Conversation, ToolInvocation, Turn};
