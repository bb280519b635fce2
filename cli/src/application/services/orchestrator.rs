//! Application service: the phase-gated app instance orchestrator.
//!
//! `LagoonOrchestrator` owns the injected clients and exposes one executor
//! per phase (see `phases/`). Executors share the transition helpers below,
//! which keep the in-memory instance and the store in step.

use polydock_common::keys::instance as keys;
use polydock_common::{AppInstanceStatus, OrchestratorConfig, Phase, PhaseStep};

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore, NoAiBackend};
use crate::application::services::guard;
use crate::domain::{AppInstance, AppUrl, FlowError, GuardSpec, PhaseOutcome, truncate_message};

/// Drives app instances through the Lagoon life cycle.
pub struct LagoonOrchestrator<H, A, S> {
    pub(crate) hosting: H,
    ai_backend: Option<A>,
    pub(crate) store: S,
    pub(crate) config: OrchestratorConfig,
}

impl<H: HostingClient, S: InstanceStore> LagoonOrchestrator<H, NoAiBackend, S> {
    /// An orchestrator for apps that need no AI backend.
    #[must_use]
    pub fn new(hosting: H, store: S, config: OrchestratorConfig) -> Self {
        Self {
            hosting,
            ai_backend: None,
            store,
            config,
        }
    }
}

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    #[must_use]
    pub fn with_ai_backend(hosting: H, ai_backend: A, store: S, config: OrchestratorConfig) -> Self {
        Self {
            hosting,
            ai_backend: Some(ai_backend),
            store,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run one step against `instance`.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the step must not run or its outcome
    /// cannot be persisted. Failures inside the step are reported through
    /// [`PhaseOutcome::Failed`].
    pub async fn run(
        &self,
        step: PhaseStep,
        instance: &mut AppInstance,
    ) -> Result<PhaseOutcome, FlowError> {
        match step {
            PhaseStep::PreCreate => self.pre_create(instance).await,
            PhaseStep::Create => self.create(instance).await,
            PhaseStep::PostCreate => self.post_create(instance).await,
            PhaseStep::PreDeploy => self.pre_deploy(instance).await,
            PhaseStep::Deploy => self.deploy(instance).await,
            PhaseStep::PollDeploy => self.poll_deploy(instance).await,
            PhaseStep::PostDeploy => self.post_deploy(instance).await,
            PhaseStep::Claim => self.claim(instance).await,
            PhaseStep::PreRemove => self.pre_remove(instance).await,
            PhaseStep::Remove => self.remove(instance).await,
            PhaseStep::PostRemove => self.post_remove(instance).await,
            PhaseStep::PreUpgrade => self.pre_upgrade(instance).await,
            PhaseStep::Upgrade => self.upgrade(instance).await,
            PhaseStep::PollUpgrade => Ok(self.poll_upgrade(instance)),
            PhaseStep::PostUpgrade => self.post_upgrade(instance).await,
            PhaseStep::PollHealth => Ok(self.poll_health(instance)),
        }
    }

    /// The AI backend client, when the app needs one.
    pub(crate) fn ai_backend(&self) -> Result<Option<&A>, FlowError> {
        if !self.config.requires_ai_infrastructure {
            return Ok(None);
        }
        self.ai_backend
            .as_ref()
            .map(Some)
            .ok_or(FlowError::AiBackendUnavailable)
    }

    pub(crate) async fn guard(
        &self,
        step: PhaseStep,
        instance: &AppInstance,
    ) -> Result<(), FlowError> {
        let Some(spec) = GuardSpec::for_step(step) else {
            return Ok(());
        };
        guard::check(&self.hosting, &spec, instance).await
    }

    /// Set and persist a status.
    pub(crate) async fn transition(
        &self,
        instance: &mut AppInstance,
        status: AppInstanceStatus,
        message: impl Into<String>,
    ) -> Result<(), FlowError> {
        instance.set_status(status, message);
        self.store
            .save_status(instance)
            .await
            .map_err(|e| FlowError::Persistence(format!("{e:#}")))
    }

    pub(crate) async fn begin(
        &self,
        instance: &mut AppInstance,
        phase: Phase,
    ) -> Result<(), FlowError> {
        let status = AppInstanceStatus::running(phase);
        tracing::info!(
            phase = phase.token(),
            project = instance.value_or_empty(keys::PROJECT_NAME),
            "starting"
        );
        self.transition(instance, status, status.status_message())
            .await
    }

    pub(crate) async fn complete(
        &self,
        instance: &mut AppInstance,
        phase: Phase,
    ) -> Result<PhaseOutcome, FlowError> {
        let status = AppInstanceStatus::completed(phase);
        self.transition(instance, status, status.status_message())
            .await?;
        tracing::info!(phase = phase.token(), "completed");
        Ok(PhaseOutcome::Completed(status))
    }

    /// Persist `<PHASE>_FAILED` with `reason` cut to the message limit.
    pub(crate) async fn fail(
        &self,
        instance: &mut AppInstance,
        phase: Phase,
        reason: impl AsRef<str>,
    ) -> Result<PhaseOutcome, FlowError> {
        let status = AppInstanceStatus::failed(phase);
        let reason = truncate_message(reason.as_ref());
        tracing::error!(phase = phase.token(), reason = %reason, "failed");
        self.transition(instance, status, reason.clone()).await?;
        Ok(PhaseOutcome::Failed { status, reason })
    }

    /// Store and persist one key/value entry.
    pub(crate) async fn record_value(
        &self,
        instance: &mut AppInstance,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), FlowError> {
        instance.store_value(key, value);
        self.store
            .save_value(instance, key)
            .await
            .map_err(|e| FlowError::Persistence(format!("{e:#}")))
    }

    /// Store and persist the app URL.
    pub(crate) async fn record_app_url(
        &self,
        instance: &mut AppInstance,
        app_url: AppUrl,
    ) -> Result<(), FlowError> {
        instance.set_app_url(app_url);
        self.store
            .save_app_url(instance)
            .await
            .map_err(|e| FlowError::Persistence(format!("{e:#}")))
    }
}
