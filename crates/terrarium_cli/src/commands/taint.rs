//! Taint command.

use anyhow::{Context, Result};
use clap::Args;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct TaintArgs {
    #[command(flatten)]
    pub target: Target,

    /// Terraform resource address to recreate on the next apply
    pub resource: String,
}

pub async fn execute(args: TaintArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;

    ops.taint(&environment, &stack, &args.resource)
        .await
        .with_context(|| format!("Failed to taint {} in {}", args.resource, stack.display()))
}
