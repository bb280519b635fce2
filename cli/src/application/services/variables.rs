//! Application service: project variable upsert.

use polydock_common::VariableScope;

use crate::application::ports::HostingClient;
use crate::domain::VariableError;

/// Add or update one project variable.
///
/// # Errors
///
/// Returns a [`VariableError`] naming the variable when the client call fails
/// or the hosting API reports an error.
pub async fn upsert(
    hosting: &impl HostingClient,
    project: &str,
    name: &str,
    value: &str,
    scope: VariableScope,
) -> Result<(), VariableError> {
    let response = hosting
        .add_or_update_scoped_variable(project, name, value, scope)
        .await
        .map_err(|e| VariableError {
            name: name.to_string(),
            detail: format!("{e:#}"),
        })?;
    if let Some(error) = response.error {
        return Err(VariableError {
            name: name.to_string(),
            detail: error.message(),
        });
    }
    tracing::debug!(project, variable = name, %scope, "project variable set");
    Ok(())
}

/// [`upsert`] with [`VariableScope::Global`].
///
/// # Errors
///
/// See [`upsert`].
pub async fn upsert_global(
    hosting: &impl HostingClient,
    project: &str,
    name: &str,
    value: &str,
) -> Result<(), VariableError> {
    upsert(hosting, project, name, value, VariableScope::Global).await
}

/// Upsert `(name, value)` pairs in order, stopping at the first failure.
///
/// # Errors
///
/// See [`upsert`].
pub async fn upsert_all_global(
    hosting: &impl HostingClient,
    project: &str,
    pairs: &[(&str, &str)],
) -> Result<(), VariableError> {
    for (name, value) in pairs {
        upsert_global(hosting, project, name, value).await?;
    }
    Ok(())
}
