//! # toolpilot
//!
//! A minimal coding agent that runs local tools on behalf of a chat model.
//!
//! This library provides:
//! - A tool-based agent loop that drives one prompt to a final answer
//! - Built-in `Read`, `Write` and `Bash` tools
//! - An OpenRouter (OpenAI-compatible) chat-completion client
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Send the conversation and the tool schemas to the LLM
//! 2. Execute any tool calls it asks for, one after another
//! 3. Append the results to the conversation and ask again
//! 4. Stop on a final answer or when the iteration budget is spent
//!
//! ## Example
//!
//! ```rust,ignore
//! use toolpilot::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(&config)?;
//! let run = agent.run("Create a hello world script").await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use config::Config;
