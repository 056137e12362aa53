//! Apply command - Apply a stack in an environment.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub target: Target,
}

pub async fn execute(args: ApplyArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;
    info!("Applying {:?} in {}", stack, environment);

    ops.apply(&environment, &stack)
        .await
        .with_context(|| format!("Failed to apply {} in {}", stack.display(), environment))
}
