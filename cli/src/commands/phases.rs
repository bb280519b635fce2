//! `polydock phases`: list steps with their entry status and guard checks.

use std::process::ExitCode;

use anyhow::Result;
use polydock_common::{AppInstanceStatus, PhaseStep};
use serde::Serialize;

use crate::domain::GuardSpec;
use crate::output::{OutputContext, json};

#[derive(Debug, Serialize)]
pub struct PhaseRow {
    pub step: PhaseStep,
    pub entry_status: Option<AppInstanceStatus>,
    pub guard: Option<GuardSpec>,
}

#[must_use]
pub fn rows() -> Vec<PhaseRow> {
    PhaseStep::ALL
        .into_iter()
        .map(|step| PhaseRow {
            step,
            entry_status: step.entry_status(),
            guard: GuardSpec::for_step(step),
        })
        .collect()
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Run the phases command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(ctx: &OutputContext, as_json: bool) -> Result<ExitCode> {
    let rows = rows();
    if as_json {
        json::print(&rows)?;
        return Ok(ExitCode::SUCCESS);
    }
    ctx.header("Phases");
    for row in &rows {
        let detail = match row.guard {
            Some(g) => format!(
                "enters on {}  ping {}  values {}  project name {}  project id {}",
                g.expected,
                yes_no(g.ping_hosting),
                yes_no(g.require_values),
                yes_no(g.require_project_name),
                yes_no(g.require_project_id),
            ),
            None => "no guard".to_string(),
        };
        ctx.kv(&format!("{:<13}", row.step.name()), &detail);
    }
    Ok(ExitCode::SUCCESS)
}
