//! Typed responses of the hosting API and the AI backend.
//!
//! The hosting API reports failures in-band through an `error` field that is
//! either a bare string or a list of `{ "message": ... }` objects; every
//! response type carries it as [`RemoteError`].

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// An in-band error reported by a remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RemoteError {
    Text(String),
    Entries(Vec<Value>),
    Other(Value),
}

impl RemoteError {
    /// One loggable line: the first entry's `message` when present,
    /// otherwise the error as JSON.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            RemoteError::Text(text) => text.clone(),
            RemoteError::Entries(entries) => entries
                .first()
                .and_then(|entry| entry.get("message"))
                .and_then(Value::as_str)
                .map_or_else(|| Value::from(entries.clone()).to_string(), str::to_string),
            RemoteError::Other(value) => value.to_string(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Accepts ids sent either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// `{ "id": ... }` as returned by mutations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteId {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
}

impl RemoteId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCreated {
    #[serde(rename = "addProject", default)]
    pub add_project: Option<RemoteId>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

impl ProjectCreated {
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.add_project
            .as_ref()
            .and_then(|p| non_empty(p.id.as_ref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupsAdded {
    #[serde(rename = "addGroupsToProject", default)]
    pub add_groups_to_project: Option<RemoteId>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

impl GroupsAdded {
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.add_groups_to_project
            .as_ref()
            .and_then(|p| non_empty(p.id.as_ref()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariableUpserted {
    #[serde(default)]
    pub error: Option<RemoteError>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentTriggered {
    /// Name of the deployment the hosting API queued.
    #[serde(rename = "deployEnvironmentBranch", default)]
    pub deploy_environment_branch: Option<String>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

impl DeploymentTriggered {
    #[must_use]
    pub fn deployment_name(&self) -> Option<&str> {
        non_empty(self.deploy_environment_branch.as_ref())
    }
}

/// A deployment job as reported by the hosting API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub priority: Option<String>,
    #[serde(rename = "buildStep", default)]
    pub build_step: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub started: Option<String>,
    #[serde(default)]
    pub completed: Option<String>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

impl Deployment {
    /// Names of the identifying fields that came back empty.
    #[must_use]
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("id", &self.id),
            ("name", &self.name),
            ("status", &self.status),
        ]
        .into_iter()
        .filter(|(_, value)| non_empty(value.as_ref()).is_none())
        .map(|(field, _)| field)
        .collect()
    }
}

/// Result of running a command inside an environment container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub result: i32,
    #[serde(default)]
    pub result_text: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl CommandOutcome {
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.result == 0
    }

    /// `<result> | <result_text> | <error>`
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} | {} | {}",
            self.result,
            self.result_text,
            self.error.as_deref().unwrap_or_default()
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDeleted {
    #[serde(rename = "deleteEnvironment", default)]
    pub delete_environment: Option<String>,
    #[serde(default)]
    pub error: Option<RemoteError>,
}

impl EnvironmentDeleted {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.delete_environment.as_deref() == Some("success")
    }
}

/// Where a project variable is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableScope {
    #[default]
    Global,
    Build,
    Runtime,
    ContainerRegistry,
    InternalContainerRegistry,
}

impl VariableScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VariableScope::Global => "GLOBAL",
            VariableScope::Build => "BUILD",
            VariableScope::Runtime => "RUNTIME",
            VariableScope::ContainerRegistry => "CONTAINER_REGISTRY",
            VariableScope::InternalContainerRegistry => "INTERNAL_CONTAINER_REGISTRY",
        }
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── AI backend ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendHealth {
    #[serde(default)]
    pub status: Option<String>,
}

impl BackendHealth {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status.as_deref() == Some("healthy")
    }
}

/// The account the AI backend client is authenticated as.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendIdentity {
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: i64,
    #[serde(default)]
    pub email: String,
}

/// Keys a credential response must carry, in the order they are checked.
pub const CREDENTIAL_KEYS: [&str; 8] = [
    "name",
    "region",
    "database_name",
    "database_host",
    "database_username",
    "database_password",
    "litellm_token",
    "litellm_api_url",
];

/// Database and LLM credentials issued by the AI backend for one project.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub name: String,
    pub region: String,
    pub database_name: String,
    pub database_host: String,
    pub database_username: String,
    pub database_password: String,
    pub litellm_token: String,
    pub litellm_api_url: String,
}

impl CredentialRecord {
    /// Build a record from the raw backend response.
    ///
    /// Returns the first key of [`CREDENTIAL_KEYS`] that is absent or null.
    pub fn from_map(raw: &Map<String, Value>) -> Result<Self, &'static str> {
        let field = |key: &'static str| -> Result<String, &'static str> {
            match raw.get(key) {
                None | Some(Value::Null) => Err(key),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(other) => Ok(other.to_string()),
            }
        };
        let [name, region, database_name, database_host, database_username, database_password, litellm_token, litellm_api_url] =
            CREDENTIAL_KEYS;
        Ok(Self {
            name: field(name)?,
            region: field(region)?,
            database_name: field(database_name)?,
            database_host: field(database_host)?,
            database_username: field(database_username)?,
            database_password: field(database_password)?,
            litellm_token: field(litellm_token)?,
            litellm_api_url: field(litellm_api_url)?,
        })
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("database_name", &self.database_name)
            .field("database_host", &self.database_host)
            .field("database_username", &self.database_username)
            .field("database_password", &"<redacted>")
            .field("litellm_token", &"<redacted>")
            .field("litellm_api_url", &self.litellm_api_url)
            .finish()
    }
}
