//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use polydock_common::OrchestratorConfig;

use crate::commands;
use crate::output::OutputContext;

/// Inspect Polydock Lagoon app instances
#[derive(Parser)]
#[command(
    name = "polydock",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show an instance's status, app URL and values
    Status(commands::StatusArgs),

    /// Check whether a phase would accept an instance
    Doctor(commands::DoctorArgs),

    /// List phases with their entry status and guard checks
    Phases,

    /// Show the orchestrator configuration from POLYDOCK_* variables
    Config,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub fn run(self) -> Result<ExitCode> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
        } = self;
        let ctx = OutputContext::new(no_color, quiet);
        match command {
            Command::Status(args) => commands::status::run(&ctx, &args.instance, json),
            Command::Doctor(args) => {
                let config = load_config()?;
                commands::doctor::run(&ctx, &args.instance, args.phase, &config, json)
            }
            Command::Phases => commands::phases::run(&ctx, json),
            Command::Config => commands::config::run(&ctx, &load_config()?, json),
        }
    }
}

fn load_config() -> Result<OrchestratorConfig> {
    OrchestratorConfig::from_env().context("failed to load config from POLYDOCK_* env vars")
}
