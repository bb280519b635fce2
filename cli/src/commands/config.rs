//! `polydock config`: show the orchestrator configuration read from the
//! environment.

use std::process::ExitCode;

use anyhow::Result;
use polydock_common::OrchestratorConfig;
use polydock_common::config::ENV_PREFIX;

use crate::output::{OutputContext, json};

/// Run the config command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(ctx: &OutputContext, config: &OrchestratorConfig, as_json: bool) -> Result<ExitCode> {
    if as_json {
        json::print(config)?;
        return Ok(ExitCode::SUCCESS);
    }
    ctx.header(&format!("Orchestrator configuration ({ENV_PREFIX}*)"));
    ctx.kv(
        "requires_ai_infrastructure",
        &config.requires_ai_infrastructure.to_string(),
    );
    ctx.kv("ai_settle_delay_secs", &config.ai_settle_delay_secs.to_string());
    ctx.kv("ai_inject_delay_secs", &config.ai_inject_delay_secs.to_string());
    ctx.kv("claim_url_ttl_hours", &config.claim_url_ttl_hours.to_string());
    ctx.kv("default_script_service", &config.default_script_service);
    ctx.kv("default_script_container", &config.default_script_container);
    Ok(ExitCode::SUCCESS)
}
