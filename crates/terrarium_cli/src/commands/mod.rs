//! CLI command definitions.
//!
//! Each subcommand wraps one terraform verb for a stack directory.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use terrarium_config::GLOBAL_CONFIG_FILE;
use terrarium_iac::{detect_ci, DispatchOptions, StackOperations, DEFAULT_BINARY};
use terrarium_runner::ProcessRunner;

pub mod apply;
pub mod destroy;
pub mod fmt;
pub mod import;
pub mod init;
pub mod plan;
pub mod rm;
pub mod taint;
pub mod untaint;

/// terrarium - layered tfvars for terraform stacks
#[derive(Parser)]
#[command(name = "terrarium")]
#[command(version, about = "terrarium - layered tfvars for terraform stacks")]
#[command(long_about = r#"
terrarium runs terraform against a stack directory with variables merged
from layered *.tfvars.json files.

SETTINGS:
  global.tfvars.json                 → TF_VAR_* environment for terraform
  <stack>/default.tfvars.json        → -var arguments (lowest precedence)
  <stack>/app.tfvars.json            → -var arguments
  <stack>/<environment>.tfvars.json  → -var arguments (highest precedence)

Set CI in the environment to plan into a file before applying it and to
skip interactive init flags.

EXIT CODES:
  terraform's exit code is passed through unchanged.
  1 - terrarium failed before terraform ran
  2 - Invalid arguments
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Global settings file
    #[arg(short, long, global = true, env = "TERRARIUM_CONFIG", default_value = GLOBAL_CONFIG_FILE)]
    pub config: PathBuf,

    /// Terraform binary to run
    #[arg(short, long, global = true, env = "TERRARIUM_TERRAFORM", default_value = DEFAULT_BINARY)]
    pub terraform: String,

    /// Print collected settings before running terraform
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    pub fn dispatch_options(&self) -> DispatchOptions {
        DispatchOptions {
            binary: self.terraform.clone(),
            global_config: self.config.clone(),
            ci: detect_ci(),
            verbose: self.verbose,
        }
    }

    pub fn operations(&self) -> StackOperations {
        StackOperations::new(Arc::new(ProcessRunner::new()), self.dispatch_options())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a stack, configuring its remote state
    Init(init::InitArgs),

    /// Apply a stack in an environment
    Apply(apply::ApplyArgs),

    /// Show the changes apply would make
    Plan(plan::PlanArgs),

    /// Destroy a stack in an environment
    Destroy(destroy::DestroyArgs),

    /// Format a stack's terraform files
    Fmt(fmt::FmtArgs),

    /// Import an existing resource into the state
    Import(import::ImportArgs),

    /// Remove a resource from the state
    Rm(rm::RmArgs),

    /// Mark a resource for recreation
    Taint(taint::TaintArgs),

    /// Clear a resource's tainted mark
    Untaint(untaint::UntaintArgs),
}

impl Commands {
    /// Commands that select the environment's workspace before running.
    pub fn is_workspaced(&self) -> bool {
        !matches!(self, Self::Init(_) | Self::Fmt(_))
    }
}

/// Environment and stack, shared by every workspaced command.
#[derive(Args, Debug)]
pub struct Target {
    /// Environment name, also the terraform workspace
    pub environment: String,

    /// Path to the stack directory
    pub stack: PathBuf,
}
