//! Init command - Initialize a stack and its remote state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args};
use tracing::info;

use terrarium_iac::{BackendOverrides, StackOperations};

#[derive(Args)]
pub struct InitArgs {
    /// First run: skip remote state configuration while the state
    /// infrastructure itself is being created
    #[arg(long)]
    pub initial: bool,

    /// Path to the stack directory
    pub stack: PathBuf,

    /// Use this region instead of the global `region` setting
    #[arg(long)]
    pub state_region: Option<String>,

    /// Use this state bucket instead of the derived name
    #[arg(long)]
    pub state_bucket: Option<String>,

    /// Use this lock table instead of the derived name
    #[arg(long)]
    pub state_lock_table: Option<String>,

    /// Use this state key instead of `<app name>.tfstate`
    #[arg(long)]
    pub state_key: Option<String>,

    /// Configure a state lock table (`--state-lock=false` to skip it)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub state_lock: bool,
}

impl InitArgs {
    fn overrides(&self) -> BackendOverrides {
        BackendOverrides {
            region: self.state_region.clone(),
            bucket: self.state_bucket.clone(),
            lock_table: self.state_lock_table.clone(),
            key: self.state_key.clone(),
            state_lock: self.state_lock,
        }
    }
}

pub async fn execute(args: InitArgs, ops: &StackOperations) -> Result<i32> {
    info!("Initializing stack {:?}", args.stack);

    ops.init(&args.stack, args.initial, &args.overrides())
        .await
        .with_context(|| format!("Failed to initialize {}", args.stack.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Cli, Commands};
    use clap::Parser;

    #[test]
    fn test_state_overrides() {
        let cli = Cli::try_parse_from([
            "terrarium",
            "init",
            "net",
            "--state-bucket",
            "shared-state",
            "--state-key",
            "net/main.tfstate",
        ])
        .unwrap();

        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        let overrides = args.overrides();
        assert!(!args.initial);
        assert_eq!(overrides.bucket.as_deref(), Some("shared-state"));
        assert_eq!(overrides.key.as_deref(), Some("net/main.tfstate"));
        assert!(overrides.region.is_none());
        assert!(overrides.lock_table.is_none());
        assert!(overrides.state_lock);
    }

    #[test]
    fn test_state_lock_can_be_disabled() {
        let cli =
            Cli::try_parse_from(["terrarium", "init", "net", "--state-lock=false"]).unwrap();

        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert!(!args.overrides().state_lock);
    }
}
