//! What a phase call did to the instance.

use polydock_common::{AppInstanceStatus, PhaseStep};
use serde::Serialize;

/// Longest status message stored on a failure.
pub const MAX_STATUS_MESSAGE_CHARS: usize = 100;

/// Result of one phase executor call that passed its guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum PhaseOutcome {
    /// The phase finished; the instance sits at its `*_COMPLETED` state.
    Completed(AppInstanceStatus),
    /// Work continues remotely and will be picked up by a later poll.
    InProgress(AppInstanceStatus),
    /// The phase ran and failed; the failure is persisted on the instance.
    Failed {
        status: AppInstanceStatus,
        reason: String,
    },
    /// Nothing was learned; the status was not rewritten.
    Unchanged { reason: String },
    /// Accepted but not implemented yet.
    NotImplemented { step: PhaseStep },
}

impl PhaseOutcome {
    /// The status this outcome left the instance in, when it set one.
    #[must_use]
    pub fn status(&self) -> Option<AppInstanceStatus> {
        match self {
            PhaseOutcome::Completed(status)
            | PhaseOutcome::InProgress(status)
            | PhaseOutcome::Failed { status, .. } => Some(*status),
            PhaseOutcome::Unchanged { .. } | PhaseOutcome::NotImplemented { .. } => None,
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, PhaseOutcome::Failed { .. })
    }
}

/// Cut a failure message to [`MAX_STATUS_MESSAGE_CHARS`] characters.
#[must_use]
pub fn truncate_message(message: &str) -> String {
    message.chars().take(MAX_STATUS_MESSAGE_CHARS).collect()
}
