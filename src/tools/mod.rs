//! Tool registry and the built-in tools the model can invoke.
//!
//! The tool set is closed: [`BuiltinTool`] enumerates every capability and
//! [`ToolRegistry`] maps names to them once at startup. Tool failures never
//! escape as Rust errors past [`ToolRegistry::dispatch`]; they come back as an
//! [`ExecutionResult`] with `is_error` set so the model can react to them.

mod file_ops;
mod terminal;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use file_ops::{ReadFile, WriteFile};
pub use terminal::RunCommand;

/// Errors raised while running a single tool.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("parsing failed for {tool} tool_call arguments: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run command: {0}")]
    Spawn(#[source] std::io::Error),

    /// The command ran but exited unsuccessfully. Displays as the captured output.
    #[error("{output}")]
    CommandFailed { code: Option<i32>, output: String },
}

/// Startup-time registry misconfiguration.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("tool registered twice: {0}")]
    Duplicate(String),
}

/// Schema advertised to the model for one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Outcome of running one tool; always becomes exactly one tool-result turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub text: String,
    pub is_error: bool,
}

impl ExecutionResult {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

impl From<Result<String, ToolError>> for ExecutionResult {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(text) => Self::ok(text),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// A capability the model can call by name.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    /// Run the tool with the raw JSON arguments string sent by the model.
    async fn execute(&self, arguments: &str) -> Result<String, ToolError>;

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name(),
            description: self.description(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Decode tool arguments, failing closed on anything but a matching JSON object.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    tool: &'static str,
    arguments: &str,
) -> Result<T, ToolError> {
    let invalid = |reason: String| ToolError::InvalidArguments { tool, reason };

    let value: Value = serde_json::from_str(arguments).map_err(|e| invalid(e.to_string()))?;
    if !value.is_object() {
        return Err(invalid(format!("expected a JSON object, got {value}")));
    }
    serde_json::from_value(value).map_err(|e| invalid(e.to_string()))
}

/// The closed set of tools this agent knows how to run.
#[derive(Debug, Clone)]
pub enum BuiltinTool {
    Read(ReadFile),
    Write(WriteFile),
    Bash(RunCommand),
}

impl BuiltinTool {
    pub fn all() -> Vec<BuiltinTool> {
        vec![
            BuiltinTool::Read(ReadFile),
            BuiltinTool::Write(WriteFile),
            BuiltinTool::Bash(RunCommand),
        ]
    }
}

#[async_trait]
impl Tool for BuiltinTool {
    fn name(&self) -> &'static str {
        match self {
            BuiltinTool::Read(t) => t.name(),
            BuiltinTool::Write(t) => t.name(),
            BuiltinTool::Bash(t) => t.name(),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            BuiltinTool::Read(t) => t.description(),
            BuiltinTool::Write(t) => t.description(),
            BuiltinTool::Bash(t) => t.description(),
        }
    }

    fn parameters_schema(&self) -> Value {
        match self {
            BuiltinTool::Read(t) => t.parameters_schema(),
            BuiltinTool::Write(t) => t.parameters_schema(),
            BuiltinTool::Bash(t) => t.parameters_schema(),
        }
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        match self {
            BuiltinTool::Read(t) => t.execute(arguments).await,
            BuiltinTool::Write(t) => t.execute(arguments).await,
            BuiltinTool::Bash(t) => t.execute(arguments).await,
        }
    }
}

/// Name-to-tool mapping, built once and read-only afterwards.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, BuiltinTool>,
    specs: Vec<ToolSpec>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `Read`, `Write` and `Bash`.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for tool in BuiltinTool::all() {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool. Names are case-sensitive and must be unique.
    pub fn register(&mut self, tool: BuiltinTool) -> Result<(), RegistryError> {
        let name = tool.name();
        if self.tools.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.specs.push(tool.spec());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Specs of every registered tool, in registration order.
    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn lookup(&self, name: &str) -> Option<&BuiltinTool> {
        self.tools.get(name)
    }

    /// Run the named tool. Unknown names and tool failures come back as error results.
    pub async fn dispatch(&self, name: &str, arguments: &str) -> ExecutionResult {
        let Some(tool) = self.lookup(name) else {
            tracing::warn!(tool = name, "Model requested an unknown tool");
            return ExecutionResult::error(format!("unknown tool_call: {name}"));
        };

        tracing::info!(tool = name, "tool_call");
        tracing::debug!(tool = name, arguments, "tool_call arguments");

        let result = ExecutionResult::from(tool.execute(arguments).await);
        if result.is_error {
            tracing::warn!(tool = name, error = %result.text, "Tool reported an error");
        }
        result
    }
}
