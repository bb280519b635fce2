use polydock_common::keys::instance as keys;
use polydock_common::{
    AppInstanceStatus, Phase, PhaseStep, deployment_build_step_key, deployment_status_key,
};

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::application::services::phases::script::POST_DEPLOY_SCRIPT;
use crate::domain::deployment::reconcile;
use crate::domain::{AppInstance, FlowError, PhaseOutcome};

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter pre-deploy.
    pub async fn pre_deploy(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.checkpoint(PhaseStep::PreDeploy, Phase::PreDeploy, instance)
            .await
    }

    /// Trigger a deployment of the deploy branch. The instance stays at
    /// `DEPLOY_RUNNING` until [`Self::poll_deploy`] sees the job finish.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter deploy.
    pub async fn deploy(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::Deploy, instance).await?;
        self.begin(instance, Phase::Deploy).await?;

        let project = instance.value_or_empty(keys::PROJECT_NAME).to_string();
        let branch = instance.value_or_empty(keys::DEPLOY_BRANCH).to_string();
        tracing::info!(project = %project, branch = %branch, "deploying environment");

        let triggered = match self.hosting.deploy_environment_by_name(&project, &branch).await {
            Ok(triggered) => triggered,
            Err(e) => {
                return self
                    .fail(instance, Phase::Deploy, format!("Failed to deploy: {e:#}"))
                    .await;
            }
        };
        if let Some(error) = &triggered.error {
            return self
                .fail(instance, Phase::Deploy, format!("Failed to deploy: {}", error.message()))
                .await;
        }
        let Some(deployment) = triggered.deployment_name() else {
            return self
                .fail(instance, Phase::Deploy, "Deploy returned no deployment name")
                .await;
        };

        tracing::info!(project = %project, deployment, "deployment queued");
        self.record_value(instance, keys::LATEST_DEPLOYMENT_NAME, deployment)
            .await?;
        Ok(PhaseOutcome::InProgress(instance.status()))
    }

    /// Read the latest deployment's remote state and fold it into the
    /// instance status. The status is only rewritten when it changes.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance is not `DEPLOY_RUNNING`.
    pub async fn poll_deploy(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::PollDeploy, instance).await?;

        let project_id = instance.value_or_empty(keys::PROJECT_ID);
        let branch = instance.value_or_empty(keys::DEPLOY_BRANCH);
        let latest = instance.value_or_empty(keys::LATEST_DEPLOYMENT_NAME);
        tracing::info!(project_id, branch, deployment = latest, "polling deployment");

        let deployment = match self.hosting.deployment_by_name(project_id, branch, latest).await {
            Ok(deployment) => deployment,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "error fetching deployment");
                return Ok(PhaseOutcome::Unchanged {
                    reason: format!("{e:#}"),
                });
            }
        };
        if let Some(error) = &deployment.error {
            let reason = error.message();
            tracing::error!(error = %reason, "deployment lookup returned an error");
            return Ok(PhaseOutcome::Unchanged { reason });
        }

        let empty = deployment.empty_fields();
        if !empty.is_empty() {
            let reason = format!(
                "Required deployment status fields are empty: {}",
                empty.join(", ")
            );
            tracing::warn!("{reason}");
            return Ok(PhaseOutcome::Unchanged { reason });
        }

        let name = deployment.name.unwrap_or_default();
        let remote_status = deployment.status.unwrap_or_default();
        let build_step = deployment.build_step.unwrap_or_default();
        tracing::info!(deployment = %name, status = %remote_status, build_step = %build_step, "deployment status");

        self.record_value(instance, &deployment_status_key(&name), remote_status.as_str())
            .await?;
        self.record_value(instance, &deployment_build_step_key(&name), build_step)
            .await?;

        let Some(status) = reconcile(&remote_status) else {
            let reason = format!("Unknown deployment status: {remote_status}");
            tracing::warn!("{reason}");
            return Ok(PhaseOutcome::Unchanged { reason });
        };

        let message = format!("Deploy is {remote_status}");
        if instance.status() != status {
            self.transition(instance, status, message.clone()).await?;
        }

        Ok(if status == AppInstanceStatus::completed(Phase::Deploy) {
            PhaseOutcome::Completed(status)
        } else if status == AppInstanceStatus::failed(Phase::Deploy) {
            PhaseOutcome::Failed {
                status,
                reason: message,
            }
        } else {
            PhaseOutcome::InProgress(status)
        })
    }

    /// Run the optional post-deploy script.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter post-deploy.
    pub async fn post_deploy(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::PostDeploy, instance).await?;
        self.begin(instance, Phase::PostDeploy).await?;

        if let Some(result) = self.run_script(instance, &POST_DEPLOY_SCRIPT).await {
            match result {
                Ok(outcome) if outcome.succeeded() => {
                    tracing::info!(result_text = %outcome.result_text, "post-deploy script finished");
                }
                Ok(outcome) => {
                    return self.fail(instance, Phase::PostDeploy, outcome.summary()).await;
                }
                Err(e) => {
                    return self
                        .fail(instance, Phase::PostDeploy, format!("{e:#}"))
                        .await;
                }
            }
        } else {
            tracing::info!("no post-deploy script configured");
        }

        self.complete(instance, Phase::PostDeploy).await
    }
}
