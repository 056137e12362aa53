//! Tool runner trait and types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::Invocation;
use crate::error::RunnerResult;

/// Result of a finished invocation.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Exit code reported by the child (-1 when killed by a signal)
    pub exit_code: i32,
    /// Captured stdout (empty when output was streamed)
    pub stdout: String,
    /// Captured stderr (empty when output was streamed)
    pub stderr: String,
    /// Execution start time
    pub started_at: DateTime<Utc>,
    /// Execution end time
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Check if execution was successful (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get combined output (stdout + stderr).
    pub fn combined_output(&self) -> String {
        if self.stdout.is_empty() {
            self.stderr.clone()
        } else if self.stderr.is_empty() {
            self.stdout.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}

/// Executes invocations of an external binary.
#[async_trait]
pub trait ToolRunner: Send + Sync {
    /// Run the invocation to completion and report its exit code.
    async fn run(&self, invocation: &Invocation) -> RunnerResult<ExecutionResult>;
}
