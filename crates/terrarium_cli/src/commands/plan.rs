//! Plan command - Show the pending changes for a stack.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: Target,

    /// Exit with 2 when the plan has changes, 0 when it has none
    #[arg(long)]
    pub detailed_exitcode: bool,
}

pub async fn execute(args: PlanArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;
    info!("Planning {:?} in {}", stack, environment);

    ops.plan(&environment, &stack, args.detailed_exitcode)
        .await
        .with_context(|| format!("Failed to plan {} in {}", stack.display(), environment))
}
