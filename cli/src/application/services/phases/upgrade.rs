use chrono::Utc;
use polydock_common::keys::{instance as keys, variables};
use polydock_common::{AppInstanceStatus, Phase, PhaseStep};

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::application::services::variables as vars;
use crate::domain::{AppInstance, FlowError, PhaseOutcome};

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter pre-upgrade.
    pub async fn pre_upgrade(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.checkpoint(PhaseStep::PreUpgrade, Phase::PreUpgrade, instance)
            .await
    }

    /// Refresh the app's project variables. The instance is left at
    /// `UPGRADE_RUNNING` for [`Self::poll_upgrade`].
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter upgrade.
    pub async fn upgrade(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::Upgrade, instance).await?;
        let running = AppInstanceStatus::running(Phase::Upgrade);
        // Not persisted until the variables are in place.
        instance.set_status(running, running.status_message());
        tracing::info!(project = instance.value_or_empty(keys::PROJECT_NAME), "starting upgrade");

        if let Err(e) = vars::upsert_global(
            &self.hosting,
            instance.value_or_empty(keys::PROJECT_NAME),
            variables::APP_NAME,
            &instance.app_name,
        )
        .await
        {
            return self.fail(instance, Phase::Upgrade, e.to_string()).await;
        }

        self.transition(instance, running, "Upgrade completed").await?;
        Ok(PhaseOutcome::InProgress(running))
    }

    /// Stamp the upgrade date and time on the project.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter post-upgrade.
    pub async fn post_upgrade(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::PostUpgrade, instance).await?;
        self.begin(instance, Phase::PostUpgrade).await?;

        let now = Utc::now();
        let date = now.format("%Y-%m-%d").to_string();
        let time = now.format("%H:%M:%S").to_string();
        if let Err(e) = vars::upsert_all_global(
            &self.hosting,
            instance.value_or_empty(keys::PROJECT_NAME),
            &[
                (variables::APP_LAST_UPGRADED_DATE, date.as_str()),
                (variables::APP_LAST_UPGRADED_TIME, time.as_str()),
            ],
        )
        .await
        {
            return self.fail(instance, Phase::PostUpgrade, e.to_string()).await;
        }

        self.complete(instance, Phase::PostUpgrade).await
    }

    /// Accepted but not implemented; the instance is left untouched.
    #[allow(clippy::unused_self)]
    pub fn poll_upgrade(&self, instance: &AppInstance) -> PhaseOutcome {
        tracing::warn!(status = %instance.status(), "upgrade polling is not implemented");
        PhaseOutcome::NotImplemented {
            step: PhaseStep::PollUpgrade,
        }
    }
}
