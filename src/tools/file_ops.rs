//! File read and write tools.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_arguments, Tool, ToolError};

/// Read a whole file into memory.
///
/// Bytes that are not valid UTF-8 are replaced rather than treated as an error.
#[derive(Debug, Clone, Copy)]
pub struct ReadFile;

#[derive(Debug, Deserialize)]
struct ReadArgs {
    file_path: String,
}

#[async_trait]
impl Tool for ReadFile {
    fn name(&self) -> &'static str {
        "Read"
    }

    fn description(&self) -> &'static str {
        "Read and return the contents of a file"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to the file to read"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: ReadArgs = parse_arguments(self.name(), arguments)?;
        tracing::info!(file_path = %args.file_path, "Read");

        let bytes = tokio::fs::read(&args.file_path)
            .await
            .map_err(|source| ToolError::Io {
                path: args.file_path.clone(),
                source,
            })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Create or truncate a file and write the given content.
#[derive(Debug, Clone, Copy)]
pub struct WriteFile;

#[derive(Debug, Deserialize)]
struct WriteArgs {
    file_path: String,
    content: String,
}

#[async_trait]
impl Tool for WriteFile {
    fn name(&self) -> &'static str {
        "Write"
    }

    fn description(&self) -> &'static str {
        "Write the contents to a file"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The path to which the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "The content of the file to write"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    async fn execute(&self, arguments: &str) -> Result<String, ToolError> {
        let args: WriteArgs = parse_arguments(self.name(), arguments)?;
        tracing::info!(file_path = %args.file_path, bytes = args.content.len(), "Write");
        tracing::debug!(content = %args.content, "Write content");

        tokio::fs::write(&args.file_path, args.content.as_bytes())
            .await
            .map_err(|source| ToolError::Io {
                path: args.file_path.clone(),
                source,
            })?;

        Ok("write file successfully".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(value: Value) -> String {
        value.to_string()
    }

    #[tokio::test]
    async fn read_returns_file_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("x.txt");
        std::fs::write(&path, "X").unwrap();

        let out = ReadFile
            .execute(&args(json!({"file_path": path})))
            .await
            .expect("read");
        assert_eq!(out, "X");
    }

    #[tokio::test]
    async fn read_missing_file_reports_os_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let err = ReadFile
            .execute(&args(json!({"file_path": path})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
        let text = err.to_string();
        assert!(text.contains("missing.txt"), "{text}");
        assert!(text.contains("os error"), "{text}");
    }

    #[tokio::test]
    async fn read_returns_non_utf8_content_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"caf\xe9 ok").unwrap();

        let out = ReadFile
            .execute(&args(json!({"file_path": path})))
            .await
            .expect("read");
        assert_eq!(out, "caf\u{FFFD} ok");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreadable_and_unwritable_files_are_errors() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.txt");
        std::fs::write(&path, "secret").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not bind a privileged user.
        if std::fs::read(&path).is_ok() {
            return;
        }

        let err = ReadFile
            .execute(&args(json!({"file_path": path})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Io { ref source, .. }
            if source.kind() == std::io::ErrorKind::PermissionDenied));

        let err = WriteFile
            .execute(&args(json!({"file_path": path, "content": "overwrite"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Io { ref source, .. }
            if source.kind() == std::io::ErrorKind::PermissionDenied));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "secret");
    }

    #[tokio::test]
    async fn read_ignores_extra_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("y.txt");
        std::fs::write(&path, "Y").unwrap();

        let out = ReadFile
            .execute(&args(json!({"file_path": path, "limit": "10"})))
            .await
            .expect("read");
        assert_eq!(out, "Y");
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hello.txt");

        let out = WriteFile
            .execute(&args(json!({"file_path": path, "content": "hello"})))
            .await
            .expect("write");
        assert_eq!(out, "write file successfully");

        let back = ReadFile
            .execute(&args(json!({"file_path": path})))
            .await
            .expect("read");
        assert_eq!(back, "hello");
    }

    #[tokio::test]
    async fn write_truncates_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("long.txt");
        std::fs::write(&path, "a much longer original body").unwrap();

        WriteFile
            .execute(&args(json!({"file_path": path, "content": "short"})))
            .await
            .expect("write");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no/such/dir/file.txt");

        let err = WriteFile
            .execute(&args(json!({"file_path": path, "content": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn write_without_content_does_not_touch_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.txt");

        let err = WriteFile
            .execute(&args(json!({"file_path": path})))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { tool: "Write", .. }));
        assert!(!path.exists());
    }
}
