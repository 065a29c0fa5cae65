//! Shell command runner.
//!
//! Spawns the platform account tools as subprocesses, captures their output,
//! and enforces the configured timeout. The timeout policy lives here, not
//! in the convergence core; a timed-out child is killed on drop.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use crate::domain::models::ExecutorConfig;
use crate::domain::ports::{CommandOutput, CommandRunner, RunnerError};

/// Runs external commands with captured output and a hard timeout.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout_secs: u64,
}

impl ShellRunner {
    /// Runner with an explicit timeout.
    #[must_use]
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    /// Runner configured from the executor section of the config.
    #[must_use]
    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self::new(config.timeout_secs)
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, args: &[String]) -> Result<CommandOutput, RunnerError> {
        debug!(command, ?args, "spawning");

        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RunnerError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let waited = timeout(
            Duration::from_secs(self.timeout_secs),
            child.wait_with_output(),
        )
        .await;

        match waited {
            Ok(Ok(output)) => Ok(CommandOutput {
                status: output.status.code().unwrap_or(-1),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }),
            Ok(Err(source)) => Err(RunnerError::Io {
                command: command.to_string(),
                source,
            }),
            Err(_) => Err(RunnerError::TimedOut {
                command: command.to_string(),
                timeout_secs: self.timeout_secs,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_stdout_and_status() {
        let runner = ShellRunner::new(5);
        let output = runner
            .run("echo", &["hello".to_string()])
            .await
            .unwrap();
        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_not_a_runner_error() {
        let runner = ShellRunner::new(5);
        let output = runner.run("false", &[]).await.unwrap();
        assert!(!output.success());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let runner = ShellRunner::new(5);
        let err = runner
            .run("accord-no-such-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_slow_command() {
        let runner = ShellRunner::new(1);
        let err = runner
            .run("sleep", &["5".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, RunnerError::TimedOut { timeout_secs: 1, .. }));
    }
}
