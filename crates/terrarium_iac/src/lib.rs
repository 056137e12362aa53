//! # terrarium_iac
//!
//! Terraform stack operations for terrarium.
//!
//! A stack is a directory holding terraform definitions plus its
//! `*.tfvars.json` files. Each operation here loads the layered settings,
//! assembles the terraform arguments and environment, runs terraform through
//! a [`terrarium_runner::ToolRunner`] and returns terraform's exit code.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use terrarium_iac::{DispatchOptions, StackOperations};
//! use terrarium_runner::ProcessRunner;
//!
//! # async fn run() -> terrarium_iac::IacResult<()> {
//! let ops = StackOperations::new(Arc::new(ProcessRunner::new()), DispatchOptions::default());
//! let exit_code = ops.destroy("staging", Path::new("stacks/network")).await?;
//! std::process::exit(exit_code);
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod operations;
pub mod terraform;

pub use backend::{BackendConfig, BackendOverrides};
pub use error::{IacError, IacResult};
pub use operations::{detect_ci, plan_file_name, DispatchOptions, StackOperations, WorkspacedVerb};
pub use terraform::{InitOptions, Terraform, DEFAULT_BINARY};
