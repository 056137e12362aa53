//! # terrarium_runner
//!
//! External process execution for terrarium.
//!
//! Every call to the wrapped provisioning tool goes through the
//! [`ToolRunner`] trait, so the dispatcher can be exercised against a
//! [`MockRunner`] in tests and against a real [`ProcessRunner`] in the binary.
//!
//! # Example
//!
//! ```rust,no_run
//! use terrarium_runner::{Invocation, ProcessRunner, ToolRunner};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = ProcessRunner::new();
//!
//!     let invocation = Invocation::new("terraform")
//!         .workdir("stacks/network")
//!         .env("TF_VAR_region", "eu-west-1")
//!         .args(["fmt"]);
//!
//!     let result = runner.run(&invocation).await?;
//!     println!("Exit code: {}", result.exit_code);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod mock;
pub mod process;
pub mod runner;

pub use config::Invocation;
pub use error::{RunnerError, RunnerResult};
pub use mock::{CapturedCall, MockResponse, MockRunner};
pub use process::ProcessRunner;
pub use runner::{ExecutionResult, ToolRunner};
