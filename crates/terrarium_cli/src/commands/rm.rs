//! Rm command - Remove a resource from a stack's state.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct RmArgs {
    #[command(flatten)]
    pub target: Target,

    /// Terraform resource address to forget
    pub resource: String,
}

pub async fn execute(args: RmArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;
    info!("Removing {} from the {} state of {:?}", args.resource, environment, stack);

    ops.remove(&environment, &stack, &args.resource)
        .await
        .with_context(|| format!("Failed to remove {} from {}", args.resource, stack.display()))
}
