//! Destroy command.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct DestroyArgs {
    #[command(flatten)]
    pub target: Target,
}

pub async fn execute(args: DestroyArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;
    info!("Destroying {:?} in {}", stack, environment);

    ops.destroy(&environment, &stack)
        .await
        .with_context(|| format!("Failed to destroy {} in {}", stack.display(), environment))
}
