use chrono::Utc;
use polydock_common::keys::{instance as keys, variables};
use polydock_common::{Phase, PhaseStep};

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::application::services::phases::script::CLAIM_SCRIPT;
use crate::application::services::variables as vars;
use crate::domain::claim::claim_url;
use crate::domain::{AppInstance, AppUrl, FlowError, PhaseOutcome};

/// Format of `POLYDOCK_CLAIMED_AT`.
const CLAIMED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// Hand the instance to its user: run the claim script, record the app
    /// URL it prints, and stamp `POLYDOCK_CLAIMED_AT`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter claim.
    pub async fn claim(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::Claim, instance).await?;
        self.begin(instance, Phase::PolydockClaim).await?;

        if let Some(result) = self.run_script(instance, &CLAIM_SCRIPT).await {
            let url = match result.map_err(|e| format!("{e:#}")).and_then(|outcome| {
                claim_url(&outcome).map_err(|e| e.to_string())
            }) {
                Ok(url) => url,
                Err(reason) => return self.fail(instance, Phase::PolydockClaim, reason).await,
            };
            let Some(app_url) = AppUrl::valid_for(
                url.as_str(),
                url.as_str(),
                self.config.claim_url_ttl_hours,
                Utc::now(),
            ) else {
                return self
                    .fail(instance, Phase::PolydockClaim, "Claim URL expiry is out of range")
                    .await;
            };
            tracing::info!(url = %url, "claim URL received");
            self.record_value(instance, keys::CLAIM_COMMAND_OUTPUT, url.as_str())
                .await?;
            self.record_app_url(instance, app_url).await?;
        } else {
            tracing::info!("no claim script configured");
        }

        let claimed_at = Utc::now().format(CLAIMED_AT_FORMAT).to_string();
        if let Err(e) = vars::upsert_global(
            &self.hosting,
            instance.value_or_empty(keys::PROJECT_NAME),
            variables::CLAIMED_AT,
            &claimed_at,
        )
        .await
        {
            return self
                .fail(instance, Phase::PolydockClaim, e.to_string())
                .await;
        }

        self.complete(instance, Phase::PolydockClaim).await
    }
}
