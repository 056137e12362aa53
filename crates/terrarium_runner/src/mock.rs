//! Mock tool runner for testing.
//!
//! Provides a configurable mock implementation of the ToolRunner trait
//! so dispatch logic can be verified without the real binary installed.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::config::Invocation;
use crate::error::{RunnerError, RunnerResult};
use crate::runner::{ExecutionResult, ToolRunner};

/// Predefined mock response for an invocation.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Captured call information for verification.
#[derive(Debug, Clone)]
pub struct CapturedCall {
    pub binary: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
    pub workdir: Option<PathBuf>,
    pub capture_output: bool,
}

impl CapturedCall {
    /// First argument, i.e. the subcommand.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

/// Mock tool runner for testing.
///
/// Responses are chosen by the longest matching argument prefix registered
/// with [`MockRunner::respond_to`], then from the sequential queue, and
/// default to a silent success.
#[derive(Clone, Default)]
pub struct MockRunner {
    rules: Arc<RwLock<Vec<(Vec<String>, MockResponse)>>>,
    responses: Arc<RwLock<Vec<MockResponse>>>,
    response_index: Arc<AtomicUsize>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    simulate_failure: Arc<RwLock<Option<String>>>,
}

impl MockRunner {
    /// Create a new mock runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to every invocation whose arguments start with `prefix`.
    pub fn respond_to<I, S>(self, prefix: I, response: MockResponse) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefix = prefix.into_iter().map(Into::into).collect();
        self.rules.write().push((prefix, response));
        self
    }

    /// Add a mock response for the next unmatched invocation.
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.write().push(response);
        self
    }

    /// Make every invocation fail to launch.
    pub fn simulate_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_failure.write() = Some(message.into());
        self
    }

    /// Get all captured calls.
    pub fn get_calls(&self) -> Vec<CapturedCall> {
        self.captured_calls.read().clone()
    }

    /// Get the number of calls made.
    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Argument vectors of every call, in order.
    pub fn arg_lists(&self) -> Vec<Vec<String>> {
        self.captured_calls
            .read()
            .iter()
            .map(|c| c.args.clone())
            .collect()
    }

    /// Get calls for a specific subcommand.
    pub fn get_subcommand_calls(&self, subcommand: &str) -> Vec<CapturedCall> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.subcommand() == Some(subcommand))
            .cloned()
            .collect()
    }

    fn record_call(&self, invocation: &Invocation) {
        self.captured_calls.write().push(CapturedCall {
            binary: invocation.binary.clone(),
            args: invocation.args.clone(),
            env: invocation.env.clone(),
            workdir: invocation.workdir.clone(),
            capture_output: invocation.capture_output,
        });
    }

    fn next_response(&self, args: &[String]) -> MockResponse {
        let rules = self.rules.read();
        let matched = rules
            .iter()
            .filter(|(prefix, _)| args.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.len());
        if let Some((_, response)) = matched {
            return response.clone();
        }

        let responses = self.responses.read();
        let index = self.response_index.fetch_add(1, Ordering::SeqCst);
        responses
            .get(index)
            .cloned()
            .unwrap_or_else(|| MockResponse::success(""))
    }
}

#[async_trait]
impl ToolRunner for MockRunner {
    async fn run(&self, invocation: &Invocation) -> RunnerResult<ExecutionResult> {
        self.record_call(invocation);

        if let Some(msg) = self.simulate_failure.read().clone() {
            return Err(RunnerError::ExecutionFailed(msg));
        }

        let response = self.next_response(&invocation.args);
        let now = Utc::now();

        Ok(ExecutionResult {
            exit_code: response.exit_code,
            stdout: response.stdout,
            stderr: response.stderr,
            started_at: now,
            finished_at: now,
            duration_ms: 0,
        })
    }
}
