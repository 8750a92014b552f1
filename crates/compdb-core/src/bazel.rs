//! Invocation of the bazel binary.
//!
//! Every child is spawned with `kill_on_drop`, so dropping one of these
//! futures (for example when the run is interrupted) also terminates the
//! bazel process it was waiting on.

use crate::error::{CompdbError, Result};
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct Bazel {
    binary: PathBuf,
}

impl Bazel {
    /// Resolve `binary` on `PATH` (or as a path) and return a handle to it.
    pub fn locate(binary: &str) -> Result<Self> {
        let binary =
            which::which(binary).map_err(|_| CompdbError::BazelNotFound(binary.to_string()))?;
        tracing::debug!(binary = %binary.display(), "using bazel");
        Ok(Self { binary })
    }

    /// `bazel info workspace`: the absolute workspace root.
    pub async fn workspace(&self) -> Result<String> {
        self.info("workspace", None).await
    }

    /// `bazel info execution_root`, run inside `workspace`.
    pub async fn execution_root(&self, workspace: &Path) -> Result<String> {
        self.info("execution_root", Some(workspace)).await
    }

    /// Run bazel with `args` inside `workspace` and return its raw stdout.
    pub async fn aquery(&self, workspace: &Path, args: &[String]) -> Result<Vec<u8>> {
        let output = self.run(args, Some(workspace)).await?;
        tracing::debug!(bytes = output.stdout.len(), "aquery finished");
        Ok(output.stdout)
    }

    async fn info(&self, key: &str, dir: Option<&Path>) -> Result<String> {
        let args = ["info".to_string(), key.to_string()];
        let output = self.run(&args, dir).await?;
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if value.is_empty() {
            return Err(CompdbError::EmptyInfo(self.command_line(&args)));
        }
        Ok(value)
    }

    async fn run(&self, args: &[String], dir: Option<&Path>) -> Result<Output> {
        let command_line = self.command_line(args);
        tracing::debug!(command = %command_line, "running bazel");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args).kill_on_drop(true);
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }

        let output = cmd.output().await?;
        if !output.status.success() {
            return Err(CompdbError::CommandFailed {
                command: command_line,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(output)
    }

    fn command_line(&self, args: &[String]) -> String {
        let name = self
            .binary
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.binary.display().to_string());
        if args.is_empty() {
            name
        } else {
            format!("{name} {}", args.join(" "))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_bazel(dir: &TempDir, body: &str) -> Bazel {
        let path = dir.path().join("bazel");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        Bazel::locate(path.to_str().unwrap()).unwrap()
    }

    #[test]
    fn locate_missing_binary() {
        let err = Bazel::locate("definitely-not-a-bazel-binary-42").unwrap_err();
        assert!(matches!(err, CompdbError::BazelNotFound(_)));
    }

    #[tokio::test]
    async fn workspace_is_trimmed() {
        let dir = TempDir::new().unwrap();
        let bazel = fake_bazel(&dir, "echo '  /home/me/ws  '");
        assert_eq!(bazel.workspace().await.unwrap(), "/home/me/ws");
    }

    #[tokio::test]
    async fn empty_info_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bazel = fake_bazel(&dir, "echo");
        let err = bazel.workspace().await.unwrap_err();
        assert_eq!(err.to_string(), "bazel info workspace returned empty path");
    }

    #[tokio::test]
    async fn failure_carries_command_and_stderr() {
        let dir = TempDir::new().unwrap();
        let bazel = fake_bazel(&dir, "echo 'ERROR: no such target' >&2\nexit 7");
        let args = vec!["aquery".to_string(), "--output=proto".to_string()];
        let err = bazel.aquery(dir.path(), &args).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("bazel aquery --output=proto failed"), "{msg}");
        assert!(msg.contains("ERROR: no such target"), "{msg}");
    }

    #[tokio::test]
    async fn aquery_returns_raw_stdout_from_workspace() {
        let dir = TempDir::new().unwrap();
        let ws = TempDir::new().unwrap();
        let bazel = fake_bazel(&dir, "printf '%s|' \"$(pwd -P)\" \"$@\"");
        let args = vec!["aquery".to_string(), "//...".to_string()];
        let stdout = bazel.aquery(ws.path(), &args).await.unwrap();
        let text = String::from_utf8(stdout).unwrap();
        let canonical = ws.path().canonicalize().unwrap();
        assert_eq!(text, format!("{}|aquery|//...|", canonical.display()));
    }
}
