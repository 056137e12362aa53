//! Fmt command - Format a stack's terraform files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use terrarium_iac::StackOperations;

#[derive(Args)]
pub struct FmtArgs {
    /// Path to the stack directory
    pub stack: PathBuf,
}

pub async fn execute(args: FmtArgs, ops: &StackOperations) -> Result<i32> {
    ops.fmt(&args.stack)
        .await
        .with_context(|| format!("Failed to format {}", args.stack.display()))
}
