//! Import command - Adopt an existing resource into a stack's state.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use terrarium_iac::StackOperations;

use super::Target;

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub target: Target,

    /// Terraform resource address, e.g. aws_s3_bucket.logs
    pub resource: String,

    /// Provider-specific id of the existing resource
    pub id: String,
}

pub async fn execute(args: ImportArgs, ops: &StackOperations) -> Result<i32> {
    let Target { environment, stack } = args.target;
    info!("Importing {} as {} into {:?}", args.id, args.resource, stack);

    ops.import(&environment, &stack, &args.resource, &args.id)
        .await
        .with_context(|| format!("Failed to import {} into {}", args.resource, stack.display()))
}
