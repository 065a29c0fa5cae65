//! Recording command runner.
//!
//! Captures every dispatch instead of spawning anything. Backs the CLI's
//! `--dry-run` mode and the test suites.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{CommandOutput, CommandRunner, RunnerError};

/// A runner that records calls and returns a canned result.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    status: i32,
    stderr: String,
}

impl RecordingRunner {
    /// Runner where every command succeeds with empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner where every command fails with the given status and stderr.
    #[must_use]
    pub fn failing(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            status,
            stderr: stderr.into(),
        }
    }

    /// Every recorded call as `(command, args)` pairs, in dispatch order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock was poisoned by a panicking test thread.
    #[must_use]
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("recording lock poisoned").clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str, args: &[String]) -> Result<CommandOutput, RunnerError> {
        self.calls
            .lock()
            .expect("recording lock poisoned")
            .push((command.to_string(), args.to_vec()));
        Ok(CommandOutput {
            status: self.status,
            stdout: String::new(),
            stderr: self.stderr.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let runner = RecordingRunner::new();
        runner.run("useradd", &["adam".to_string()]).await.unwrap();
        runner.run("usermod", &["-L".to_string()]).await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls[0].0, "useradd");
        assert_eq!(calls[1].0, "usermod");
    }

    #[tokio::test]
    async fn test_failing_runner_reports_status() {
        let runner = RecordingRunner::failing(9, "boom");
        let output = runner.run("userdel", &[]).await.unwrap();
        assert!(!output.success());
        assert_eq!(output.status, 9);
        assert_eq!(output.stderr, "boom");
    }
}
