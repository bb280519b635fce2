use polydock_common::PhaseStep;

use crate::application::ports::{AiBackendClient, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::domain::{AppInstance, PhaseOutcome};

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// Accepted but not implemented; the instance is left untouched.
    #[allow(clippy::unused_self)]
    pub fn poll_health(&self, instance: &AppInstance) -> PhaseOutcome {
        tracing::warn!(status = %instance.status(), "health polling is not implemented");
        PhaseOutcome::NotImplemented {
            step: PhaseStep::PollHealth,
        }
    }
}
