//! Command implementations

pub mod config;
pub mod doctor;
pub mod phases;
pub mod status;

use std::path::PathBuf;

use clap::Args;
use polydock_common::PhaseStep;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// App instance JSON file
    pub instance: PathBuf,
}

/// Arguments for the doctor command.
#[derive(Args)]
pub struct DoctorArgs {
    /// App instance JSON file
    pub instance: PathBuf,

    /// Step to check the instance against
    #[arg(long, value_enum)]
    pub phase: PhaseStep,
}
