//! Mapping of remote deployment job states onto the deploy phase.

use polydock_common::{AppInstanceStatus, Phase};

/// Remote job states the hosting API reports, with the deploy status each maps to.
pub const DEPLOYMENT_STATUSES: [(&str, AppInstanceStatus); 7] = [
    ("new", AppInstanceStatus::running(Phase::Deploy)),
    ("pending", AppInstanceStatus::running(Phase::Deploy)),
    ("running", AppInstanceStatus::running(Phase::Deploy)),
    ("cancelled", AppInstanceStatus::failed(Phase::Deploy)),
    ("error", AppInstanceStatus::failed(Phase::Deploy)),
    ("failed", AppInstanceStatus::failed(Phase::Deploy)),
    ("complete", AppInstanceStatus::completed(Phase::Deploy)),
];

/// Local status for a remote deployment state; `None` for states we do not know.
#[must_use]
pub fn reconcile(remote_status: &str) -> Option<AppInstanceStatus> {
    DEPLOYMENT_STATUSES
        .iter()
        .find(|(name, _)| *name == remote_status)
        .map(|(_, status)| *status)
}
