//! Phase executors, one module per life-cycle stage.
//!
//! Every executor follows the same shape: guard, move to `<PHASE>_RUNNING`,
//! do the work, then settle on `<PHASE>_COMPLETED` or `<PHASE>_FAILED`.

mod claim;
mod create;
mod deploy;
mod health;
mod remove;
mod script;
mod upgrade;

use polydock_common::{Phase, PhaseStep};

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::domain::{AppInstance, FlowError, PhaseOutcome};

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// A phase with no remote work of its own: guard, running, completed.
    pub(crate) async fn checkpoint(
        &self,
        step: PhaseStep,
        phase: Phase,
        instance: &mut AppInstance,
    ) -> Result<PhaseOutcome, FlowError> {
        self.guard(step, instance).await?;
        self.begin(instance, phase).await?;
        self.complete(instance, phase).await
    }
}
