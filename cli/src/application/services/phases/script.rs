//! Scripts configured on the instance and run inside the deployed environment.

use anyhow::Result;
use polydock_common::CommandOutcome;
use polydock_common::keys::instance as keys;

use crate::application::ports::{AiBackendClient, EnvironmentCommand, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::domain::AppInstance;

/// Instance keys naming a script and where to run it.
pub(crate) struct ScriptKeys {
    pub script: &'static str,
    pub service: &'static str,
    pub container: &'static str,
}

pub(crate) const CLAIM_SCRIPT: ScriptKeys = ScriptKeys {
    script: keys::CLAIM_SCRIPT,
    service: keys::CLAIM_SCRIPT_SERVICE,
    container: keys::CLAIM_SCRIPT_CONTAINER,
};

pub(crate) const POST_DEPLOY_SCRIPT: ScriptKeys = ScriptKeys {
    script: keys::POST_DEPLOY_SCRIPT,
    service: keys::POST_DEPLOY_SCRIPT_SERVICE,
    container: keys::POST_DEPLOY_SCRIPT_CONTAINER,
};

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// Run the script named by `script_keys` on the deploy branch, or `None`
    /// when the instance has no such script.
    pub(crate) async fn run_script(
        &self,
        instance: &AppInstance,
        script_keys: &ScriptKeys,
    ) -> Option<Result<CommandOutcome>> {
        let script = instance.value(script_keys.script)?;
        let command = EnvironmentCommand {
            project: instance.value_or_empty(keys::PROJECT_NAME),
            environment: instance.value_or_empty(keys::DEPLOY_BRANCH),
            command: script,
            service: instance
                .value(script_keys.service)
                .unwrap_or(&self.config.default_script_service),
            container: instance
                .value(script_keys.container)
                .unwrap_or(&self.config.default_script_container),
        };
        tracing::info!(
            project = command.project,
            environment = command.environment,
            service = command.service,
            container = command.container,
            "running {}",
            script_keys.script
        );
        let result = self.hosting.execute_command_on_environment(&command).await;
        if let Ok(outcome) = &result {
            tracing::info!(result = outcome.result, result_text = %outcome.result_text, "script finished");
        }
        Some(result)
    }
}
