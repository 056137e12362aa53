//! Untaint command.

use anyhow::{Context, Result};
use clap::Args;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct UntaintArgs {
    #[command(flatten)]
    pub target: Target,

    /// Tainted resource address
    pub resource: String,
}

pub async fn execute(args: UntaintArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;

    ops.untaint(&environment, &stack, &args.resource)
        .await
        .with_context(|| format!("Failed to untaint {} in {}", args.resource, stack.display()))
}
