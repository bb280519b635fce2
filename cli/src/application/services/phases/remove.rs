use chrono::Utc;
use polydock_common::keys::{instance as keys, variables};
use polydock_common::{Phase, PhaseStep};

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::application::services::variables as vars;
use crate::domain::{AppInstance, FlowError, PhaseOutcome};

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter pre-remove.
    pub async fn pre_remove(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.checkpoint(PhaseStep::PreRemove, Phase::PreRemove, instance)
            .await
    }

    /// Delete the deploy branch environment.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter remove.
    pub async fn remove(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::Remove, instance).await?;
        self.begin(instance, Phase::Remove).await?;

        let project = instance.value_or_empty(keys::PROJECT_NAME);
        let branch = instance.value_or_empty(keys::DEPLOY_BRANCH);
        tracing::info!(project, branch, "deleting environment");

        let reason = match self.hosting.delete_environment_by_name(project, branch).await {
            Err(e) => Some(format!("Failed to remove environment: {e:#}")),
            Ok(deleted) => match (&deleted.error, deleted.is_success()) {
                (Some(error), _) => Some(format!("Failed to remove environment: {}", error.message())),
                (None, false) => Some(format!(
                    "Failed to remove environment: {}",
                    deleted.delete_environment.as_deref().unwrap_or("no response")
                )),
                (None, true) => None,
            },
        };
        if let Some(reason) = reason {
            return self.fail(instance, Phase::Remove, reason).await;
        }

        self.complete(instance, Phase::Remove).await
    }

    /// Stamp the removal date and time on the project.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter post-remove.
    pub async fn post_remove(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::PostRemove, instance).await?;
        self.begin(instance, Phase::PostRemove).await?;

        let now = Utc::now();
        let date = now.format("%Y-%m-%d").to_string();
        let time = now.format("%H:%M:%S").to_string();
        if let Err(e) = vars::upsert_all_global(
            &self.hosting,
            instance.value_or_empty(keys::PROJECT_NAME),
            &[
                (variables::APP_REMOVED_DATE, date.as_str()),
                (variables::APP_REMOVED_TIME, time.as_str()),
            ],
        )
        .await
        {
            return self.fail(instance, Phase::PostRemove, e.to_string()).await;
        }

        self.complete(instance, Phase::PostRemove).await
    }
}
