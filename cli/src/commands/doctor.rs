//! `polydock doctor`: would a phase accept this instance?
//!
//! Runs the offline part of a phase's guard. The hosting API is not pinged.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use polydock_common::keys::instance as keys;
use polydock_common::{OrchestratorConfig, PhaseStep};
use serde::Serialize;

use crate::domain::{AppInstance, GuardCheck, GuardSpec};
use crate::infra::JsonInstanceStore;
use crate::output::{OutputContext, json};

/// Guard diagnosis for one step.
#[derive(Debug, Serialize)]
pub struct DoctorReport {
    pub step: PhaseStep,
    pub guarded: bool,
    pub checks: Vec<GuardCheck>,
}

impl DoctorReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

/// Offline guard checks for `step`, plus the AI region when the app needs
/// an AI backend before or after create.
#[must_use]
pub fn diagnose(instance: &AppInstance, step: PhaseStep, config: &OrchestratorConfig) -> DoctorReport {
    let Some(spec) = GuardSpec::for_step(step) else {
        return DoctorReport {
            step,
            guarded: false,
            checks: Vec::new(),
        };
    };
    let mut checks = spec.report(instance);
    if config.requires_ai_infrastructure
        && matches!(step, PhaseStep::PreCreate | PhaseStep::PostCreate)
    {
        let passed = instance.value(keys::AI_BACKEND_REGION_ID).is_some();
        checks.push(GuardCheck {
            name: keys::AI_BACKEND_REGION_ID.to_string(),
            passed,
            detail: if passed { "set" } else { "not set" }.to_string(),
        });
    }
    DoctorReport {
        step,
        guarded: true,
        checks,
    }
}

/// Run the doctor command.
///
/// # Errors
///
/// Returns an error if the instance file cannot be read.
pub fn run(
    ctx: &OutputContext,
    path: &Path,
    step: PhaseStep,
    config: &OrchestratorConfig,
    as_json: bool,
) -> Result<ExitCode> {
    let instance = JsonInstanceStore::with_path(path.to_path_buf()).load()?;
    let report = diagnose(&instance, step, config);
    let code = if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if as_json {
        json::print(&report)?;
        return Ok(code);
    }

    ctx.header(&format!("{step} guard"));
    if !report.guarded {
        ctx.info(&format!("{step} runs without a guard"));
        return Ok(code);
    }
    for check in &report.checks {
        ctx.check(check.passed, &format!("{}: {}", check.name, check.detail));
    }
    ctx.info("Lagoon API ping not checked (offline)");
    if report.passed() {
        ctx.success(&format!("{step} would accept this instance"));
    } else {
        ctx.error(&format!("{step} would reject this instance"));
    }
    Ok(code)
}
