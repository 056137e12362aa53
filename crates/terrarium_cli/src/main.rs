//! terrarium CLI - Main entry point.
//!
//! Exit codes:
//! - terraform's own exit code when terraform ran
//! - 1: terrarium failed before terraform could run (bad path, malformed
//!   settings, missing backend keys, binary not found)
//! - 2: invalid arguments

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

mod commands;
mod logging;

use commands::{Cli, Commands};

/// Exit codes terrarium produces itself.
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli
        .command
        .is_workspaced()
        .then(|| Path::new(logging::DEBUG_LOG_FILE));
    if let Err(e) = logging::init(log_file) {
        eprintln!("warning: {:#}", e);
    }

    let ops = cli.global.operations();

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, &ops).await,
        Commands::Apply(args) => commands::apply::execute(args, &ops).await,
        Commands::Plan(args) => commands::plan::execute(args, &ops).await,
        Commands::Destroy(args) => commands::destroy::execute(args, &ops).await,
        Commands::Fmt(args) => commands::fmt::execute(args, &ops).await,
        Commands::Import(args) => commands::import::execute(args, &ops).await,
        Commands::Rm(args) => commands::rm::execute(args, &ops).await,
        Commands::Taint(args) => commands::taint::execute(args, &ops).await,
        Commands::Untaint(args) => commands::untaint::execute(args, &ops).await,
    };

    match result {
        Ok(code) => ExitCode::from(exit_status(code)),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ExitCodes::GENERAL_ERROR)
        }
    }
}

/// Map terraform's exit code onto a process exit status.
fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(ExitCodes::GENERAL_ERROR)
}
