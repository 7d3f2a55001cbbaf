//! Shell command execution tool.

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::process::Command;

use super::{parse_arguments, Tool, ToolError};

/// Run a shell command through `sh -c`, with stderr merged into stdout.
///
/// There is no timeout and no working-directory or environment isolation: a
/// command that never exits blocks the agent loop.
#[derive(Debug, Clone, Copy)]
pub struct RunCommand;

#[derive(Debug, Deserialize)]
struct BashArgs {
    command: String,
}

#[async_trait]
impl Tool for RunCommand {
    fn name(&self) -> &'static str {
        "Bash"
    }

    fn description(&self) -> &'static str {
        "Execute a shell command"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command to execute"
                }
            },
            "required": ["command"]
        })
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: BashArgs = parse_arguments(self.name(), arguments)?;
        tracing::info!(command = %args.command, "Bash");

        // Both streams share the stdout pipe so the output keeps the order it
        // was written in. Stderr stays piped for anything the shell prints
        // before the redirect takes effect.
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("exec 2>&1\n{}", args.command))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(ToolError::Spawn)?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            let code = output.status.code();
            tracing::debug!(?code, "Command exited unsuccessfully");
            Err(ToolError::CommandFailed {
                code,
                output: combined,
            })
        }
    }
}
