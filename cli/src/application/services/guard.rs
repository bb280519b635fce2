//! Application service: phase entry guard.
//!
//! Runs the offline checks of a [`GuardSpec`] around an optional ping of the
//! hosting API.

use crate::application::ports::HostingClient;
use crate::domain::{AppInstance, FlowError, GuardSpec};

/// Check that `instance` may enter the guarded phase.
///
/// Order: entry status, hosting ping, required values, project name, project id.
///
/// # Errors
///
/// Returns the first failed check as a [`FlowError`]; the instance is not touched.
pub async fn check(
    hosting: &impl HostingClient,
    spec: &GuardSpec,
    instance: &AppInstance,
) -> Result<(), FlowError> {
    spec.check_status(instance)?;
    if spec.ping_hosting {
        ping(hosting).await?;
    }
    spec.check_values(instance)
}

async fn ping(hosting: &impl HostingClient) -> Result<(), FlowError> {
    match hosting.ping().await {
        Ok(true) => Ok(()),
        Ok(false) => {
            tracing::warn!("Lagoon API ping failed");
            Err(FlowError::HostingUnreachable("ping failed".to_string()))
        }
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "error pinging Lagoon API");
            Err(FlowError::HostingUnreachable(format!("{e:#}")))
        }
    }
}
