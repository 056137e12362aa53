//! Subprocess-backed runner.
//!
//! Streams the child's stdio through to the terminal unless the invocation
//! asks for captured output, and waits for the child without a timeout; the
//! wrapped tool handles its own signals.

use std::io::ErrorKind;
use std::process::Stdio;

use async_trait::async_trait;
use chrono::Utc;
use tokio::process::Command;
use tracing::debug;

use crate::config::Invocation;
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ExecutionResult, ToolRunner};

/// Runner that spawns real child processes.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn build_command(invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.binary);
        cmd.args(&invocation.args);
        cmd.envs(&invocation.env);

        if let Some(dir) = &invocation.workdir {
            cmd.current_dir(dir);
        }

        if invocation.capture_output {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }
        cmd.stdin(Stdio::inherit());
        cmd
    }

    fn spawn_error(invocation: &Invocation, e: std::io::Error) -> RunnerError {
        if e.kind() == ErrorKind::NotFound {
            RunnerError::BinaryNotFound(invocation.binary.clone())
        } else {
            RunnerError::SpawnFailed {
                binary: invocation.binary.clone(),
                source: e,
            }
        }
    }
}

#[async_trait]
impl ToolRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> RunnerResult<ExecutionResult> {
        debug!(
            workdir = ?invocation.workdir,
            env_vars = invocation.env.len(),
            "Executing: {}",
            invocation.command_line()
        );

        let mut cmd = Self::build_command(invocation);
        let started_at = Utc::now();

        let (status, stdout, stderr) = if invocation.capture_output {
            let output = cmd
                .output()
                .await
                .map_err(|e| Self::spawn_error(invocation, e))?;
            (
                output.status,
                String::from_utf8_lossy(&output.stdout).to_string(),
                String::from_utf8_lossy(&output.stderr).to_string(),
            )
        } else {
            let status = cmd
                .status()
                .await
                .map_err(|e| Self::spawn_error(invocation, e))?;
            (status, String::new(), String::new())
        };

        let finished_at = Utc::now();
        let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
        let exit_code = status.code().unwrap_or(-1);

        // Callers decide what a non-zero exit means.
        debug!(
            "{} exited with code {} after {}ms",
            invocation.binary, exit_code, duration_ms
        );

        Ok(ExecutionResult {
            exit_code,
            stdout,
            stderr,
            started_at,
            finished_at,
            duration_ms,
        })
    }
}
