//! Application service: AI backend credential provisioning.
//!
//! Finds or creates the backend user for a project, then asks the backend
//! for private database and LLM credentials scoped to that user.

use polydock_common::CredentialRecord;
use polydock_common::keys::instance as keys;
use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::application::ports::AiBackendClient;
use crate::domain::credentials::{backend_user_email, credential_name};
use crate::domain::{AppInstance, ProvisioningError};

/// Length of passwords generated for new backend users.
pub const GENERATED_PASSWORD_LEN: usize = 6;

fn backend_error(e: &anyhow::Error) -> ProvisioningError {
    ProvisioningError::Backend(format!("{e:#}"))
}

/// Validate the AI backend before any phase relies on it: a region is set,
/// the backend is healthy, and this client is an active admin.
///
/// # Errors
///
/// Returns the first failed check.
pub async fn ensure_backend_ready(
    ai: &impl AiBackendClient,
    instance: &AppInstance,
) -> Result<(), ProvisioningError> {
    if instance.value(keys::AI_BACKEND_REGION_ID).is_none() {
        return Err(ProvisioningError::MissingRegion);
    }
    check_health(ai).await?;
    check_auth(ai).await
}

async fn check_health(ai: &impl AiBackendClient) -> Result<(), ProvisioningError> {
    let health = ai.health().await.map_err(|e| backend_error(&e))?;
    if health.is_healthy() {
        tracing::info!("AI backend is healthy");
        Ok(())
    } else {
        tracing::error!(status = ?health.status, "AI backend is not healthy");
        Err(ProvisioningError::Unhealthy)
    }
}

async fn check_auth(ai: &impl AiBackendClient) -> Result<(), ProvisioningError> {
    let me = ai.current_user().await.map_err(|e| backend_error(&e))?;
    if !me.is_admin {
        tracing::error!("AI backend client is not an admin");
        return Err(ProvisioningError::NotAdmin);
    }
    if !me.is_active {
        tracing::error!("AI backend client is not an active admin");
        return Err(ProvisioningError::NotActive);
    }
    Ok(())
}

/// Issue credentials for the instance's project.
///
/// # Errors
///
/// Returns a [`ProvisioningError`] when the backend is not usable, no user
/// can be found or created, or the response lacks a credential key.
pub async fn provision(
    ai: &impl AiBackendClient,
    instance: &AppInstance,
) -> Result<CredentialRecord, ProvisioningError> {
    check_auth(ai).await?;
    check_health(ai).await?;

    let region = instance
        .value(keys::AI_BACKEND_REGION_ID)
        .ok_or(ProvisioningError::MissingRegion)?;
    let project_name = instance.value_or_empty(keys::PROJECT_NAME);
    let email = backend_user_email(instance);

    let users = ai
        .search_users(&email)
        .await
        .map_err(|e| backend_error(&e))?;
    tracing::info!(email = %email, count = users.len(), "searched AI backend users");

    let ambiguous = users.len() > 1;
    let user = match users.into_iter().next() {
        Some(user) => {
            if ambiguous {
                tracing::warn!(email = %email, user_id = user.id, "multiple AI backend users match, using the first");
            }
            Some(user)
        }
        None => {
            let password = generate_password();
            match ai.create_user(&email, &password).await {
                Ok(user) => {
                    tracing::info!(email = %email, user_id = user.id, "created AI backend user");
                    Some(user)
                }
                Err(e) => {
                    tracing::error!(email = %email, error = %format!("{e:#}"), "error creating AI backend user");
                    None
                }
            }
        }
    };
    let Some(user) = user else {
        return Err(ProvisioningError::UserUnavailable { email });
    };

    let name = credential_name(project_name);
    tracing::info!(region, credential = %name, user_id = user.id, "requesting private AI credentials");
    let raw = ai
        .create_private_ai_keys(region, &name, user.id)
        .await
        .map_err(|e| backend_error(&e))?;

    CredentialRecord::from_map(&raw).map_err(|key| {
        tracing::error!(key, "credential response missing key");
        ProvisioningError::MissingCredentialKey(key)
    })
}

/// Random alphanumeric password for a new backend user.
#[must_use]
pub fn generate_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}
