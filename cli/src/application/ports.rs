//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `polydock_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use anyhow::{Result, bail};
use polydock_common::{
    BackendHealth, BackendIdentity, BackendUser, CommandOutcome, Deployment, DeploymentTriggered,
    EnvironmentDeleted, GroupsAdded, ProjectCreated, VariableScope, VariableUpserted,
};
use serde_json::{Map, Value};

use crate::domain::AppInstance;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Parameters for creating a project inside an organization.
pub struct CreateProjectRequest<'a> {
    pub name: &'a str,
    pub git_url: &'a str,
    pub branch: &'a str,
    pub production_environment: &'a str,
    /// Hosting cluster the project lands on.
    pub cluster_id: &'a str,
    /// Never logged.
    pub private_key: &'a str,
    pub organization_id: &'a str,
    pub add_org_owner: bool,
    pub auto_idle: i64,
}

/// A command to run inside one container of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvironmentCommand<'a> {
    pub project: &'a str,
    pub environment: &'a str,
    pub command: &'a str,
    pub service: &'a str,
    pub container: &'a str,
}

// ── Remote Service Ports ──────────────────────────────────────────────────────

/// The hosting control plane (Lagoon).
///
/// `Err` means the call itself failed; in-band errors come back inside the
/// typed response.
#[allow(async_fn_in_trait)]
pub trait HostingClient {
    /// `Ok(true)` when the API answers.
    async fn ping(&self) -> Result<bool>;
    async fn create_project_in_organization(
        &self,
        request: &CreateProjectRequest<'_>,
    ) -> Result<ProjectCreated>;
    async fn add_group_to_project(&self, group: &str, project: &str) -> Result<GroupsAdded>;
    async fn add_or_update_scoped_variable(
        &self,
        project: &str,
        name: &str,
        value: &str,
        scope: VariableScope,
    ) -> Result<VariableUpserted>;
    async fn deploy_environment_by_name(
        &self,
        project: &str,
        environment: &str,
    ) -> Result<DeploymentTriggered>;
    async fn deployment_by_name(
        &self,
        project_id: &str,
        environment: &str,
        deployment: &str,
    ) -> Result<Deployment>;
    async fn execute_command_on_environment(
        &self,
        command: &EnvironmentCommand<'_>,
    ) -> Result<CommandOutcome>;
    async fn delete_environment_by_name(
        &self,
        project: &str,
        environment: &str,
    ) -> Result<EnvironmentDeleted>;
}

/// The AI backend that issues database and LLM credentials.
#[allow(async_fn_in_trait)]
pub trait AiBackendClient {
    async fn health(&self) -> Result<BackendHealth>;
    /// The account this client is authenticated as.
    async fn current_user(&self) -> Result<BackendIdentity>;
    async fn search_users(&self, email: &str) -> Result<Vec<BackendUser>>;
    async fn create_user(&self, email: &str, password: &str) -> Result<BackendUser>;
    /// Raw credential response; validated by the caller.
    async fn create_private_ai_keys(
        &self,
        region: &str,
        name: &str,
        user_id: i64,
    ) -> Result<Map<String, Value>>;
}

/// Stand-in for orchestrators built without an AI backend. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAiBackend;

impl AiBackendClient for NoAiBackend {
    async fn health(&self) -> Result<BackendHealth> {
        bail!("no AI backend client configured")
    }

    async fn current_user(&self) -> Result<BackendIdentity> {
        bail!("no AI backend client configured")
    }

    async fn search_users(&self, _email: &str) -> Result<Vec<BackendUser>> {
        bail!("no AI backend client configured")
    }

    async fn create_user(&self, _email: &str, _password: &str) -> Result<BackendUser> {
        bail!("no AI backend client configured")
    }

    async fn create_private_ai_keys(
        &self,
        _region: &str,
        _name: &str,
        _user_id: i64,
    ) -> Result<Map<String, Value>> {
        bail!("no AI backend client configured")
    }
}

// ── Persistence Port ──────────────────────────────────────────────────────────

/// Persists app instance changes made by phases.
#[allow(async_fn_in_trait)]
pub trait InstanceStore {
    /// Persist the current status and status message.
    async fn save_status(&self, instance: &AppInstance) -> Result<()>;
    /// Persist one key/value entry.
    async fn save_value(&self, instance: &AppInstance, key: &str) -> Result<()>;
    /// Persist the app URL recorded by claim.
    async fn save_app_url(&self, instance: &AppInstance) -> Result<()>;
}
