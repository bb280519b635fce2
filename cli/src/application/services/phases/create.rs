use anyhow::{Context, Result, bail};
use polydock_common::keys::{instance as keys, variables};
use polydock_common::{Phase, PhaseStep};

use crate::application::ports::{AiBackendClient, CreateProjectRequest, HostingClient, InstanceStore};
use crate::application::services::orchestrator::LagoonOrchestrator;
use crate::application::services::{credentials, variables as vars};
use crate::domain::credentials::llm_api_hostname;
use crate::domain::{AppInstance, FlowError, PhaseOutcome};

/// Stored on a failed post-create; details go to the log only.
const POST_CREATE_FAILURE_MESSAGE: &str = "An exception occurred";

impl<H: HostingClient, A: AiBackendClient, S: InstanceStore> LagoonOrchestrator<H, A, S> {
    /// Validate everything create will need, including the AI backend when
    /// the app uses one. Makes no remote changes.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter pre-create or
    /// the AI backend is not ready.
    pub async fn pre_create(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::PreCreate, instance).await?;
        if let Some(ai) = self.ai_backend()? {
            credentials::ensure_backend_ready(ai, instance).await?;
        }
        self.begin(instance, Phase::PreCreate).await?;
        self.complete(instance, Phase::PreCreate).await
    }

    /// Create the hosting project and record its id.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter create or a
    /// status cannot be persisted.
    pub async fn create(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::Create, instance).await?;
        self.begin(instance, Phase::Create).await?;

        let branch = instance.value_or_empty(keys::DEPLOY_BRANCH);
        let request = CreateProjectRequest {
            name: instance.value_or_empty(keys::PROJECT_NAME),
            git_url: instance.value_or_empty(keys::DEPLOY_GIT),
            branch,
            production_environment: instance
                .value(keys::PRODUCTION_ENVIRONMENT)
                .unwrap_or(branch),
            cluster_id: instance.value_or_empty(keys::DEPLOY_REGION_ID),
            private_key: instance.value_or_empty(keys::DEPLOY_PRIVATE_KEY),
            organization_id: instance.value_or_empty(keys::DEPLOY_ORGANIZATION_ID),
            add_org_owner: true,
            auto_idle: auto_idle(instance),
        };
        tracing::info!(
            project = request.name,
            git = request.git_url,
            branch = request.branch,
            production = request.production_environment,
            cluster = request.cluster_id,
            organization = request.organization_id,
            auto_idle = request.auto_idle,
            "creating Lagoon project"
        );

        let created = match self.hosting.create_project_in_organization(&request).await {
            Ok(created) => created,
            Err(e) => {
                return self
                    .fail(instance, Phase::Create, format!("Failed to create Lagoon project: {e:#}"))
                    .await;
            }
        };
        if let Some(error) = &created.error {
            return self
                .fail(
                    instance,
                    Phase::Create,
                    format!("Failed to create Lagoon project: {}", error.message()),
                )
                .await;
        }
        let Some(project_id) = created.project_id() else {
            return self
                .fail(instance, Phase::Create, "Lagoon project created without an id")
                .await;
        };

        tracing::info!(project_id, "Lagoon project created");
        self.record_value(instance, keys::PROJECT_ID, project_id).await?;
        self.complete(instance, Phase::Create).await
    }

    /// Attach the deploy group, push the app's project variables and, for AI
    /// apps, provision and inject AI credentials.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] when the instance may not enter post-create or
    /// the AI backend is not ready.
    pub async fn post_create(&self, instance: &mut AppInstance) -> Result<PhaseOutcome, FlowError> {
        self.guard(PhaseStep::PostCreate, instance).await?;
        let ai = self.ai_backend()?;
        if let Some(ai) = ai {
            credentials::ensure_backend_ready(ai, instance).await?;
        }
        self.begin(instance, Phase::PostCreate).await?;

        match self.configure_project(instance, ai).await {
            Ok(()) => self.complete(instance, Phase::PostCreate).await,
            Err(e) => {
                tracing::error!(
                    project = instance.value_or_empty(keys::PROJECT_NAME),
                    error = %format!("{e:#}"),
                    "post-create failed"
                );
                self.fail(instance, Phase::PostCreate, POST_CREATE_FAILURE_MESSAGE)
                    .await
            }
        }
    }

    async fn configure_project(&self, instance: &AppInstance, ai: Option<&A>) -> Result<()> {
        let project = instance.value_or_empty(keys::PROJECT_NAME);
        let group = instance.value_or_empty(keys::DEPLOY_GROUP_NAME);

        let added = self
            .hosting
            .add_group_to_project(group, project)
            .await
            .context("adding group to project")?;
        if let Some(error) = &added.error {
            bail!("adding group {group} to project failed: {}", error.message());
        }
        if added.project_id().is_none() {
            bail!("adding group {group} to project returned no project id");
        }
        tracing::info!(project, group, "group added to project");

        vars::upsert_all_global(
            &self.hosting,
            project,
            &[
                (variables::APP_NAME, instance.app_name.as_str()),
                (
                    variables::GENERATED_APP_ADMIN_USERNAME,
                    instance.value_or_empty(keys::GENERATE_APP_ADMIN_USERNAME),
                ),
                (
                    variables::GENERATED_APP_ADMIN_PASSWORD,
                    instance.value_or_empty(keys::GENERATE_APP_ADMIN_PASSWORD),
                ),
                (variables::USER_FIRST_NAME, instance.value_or_empty(keys::USER_FIRST_NAME)),
                (variables::USER_LAST_NAME, instance.value_or_empty(keys::USER_LAST_NAME)),
                (variables::USER_EMAIL, instance.value_or_empty(keys::USER_EMAIL)),
                (
                    variables::HEALTH_WEBHOOK_URL,
                    instance.value_or_empty(keys::HEALTH_WEBHOOK_URL),
                ),
                (variables::FEATURE_FLAG_INSIGHTS, "false"),
            ],
        )
        .await?;

        if let Some(ai) = ai {
            self.inject_ai_credentials(instance, ai).await?;
        }
        Ok(())
    }

    async fn inject_ai_credentials(&self, instance: &AppInstance, ai: &A) -> Result<()> {
        let project = instance.value_or_empty(keys::PROJECT_NAME);

        tokio::time::sleep(self.config.ai_settle_delay()).await;
        let creds = credentials::provision(ai, instance).await?;
        let hostname = llm_api_hostname(&creds.litellm_api_url);
        tracing::info!(project, credential = %creds.name, region = %creds.region, "AI credentials issued");

        vars::upsert_all_global(&self.hosting, project, &[(variables::AI_REGION, creds.region.as_str())])
            .await?;

        tokio::time::sleep(self.config.ai_inject_delay()).await;
        vars::upsert_all_global(
            &self.hosting,
            project,
            &[
                (variables::AI_DB_HOST_NAME, creds.database_host.as_str()),
                (variables::AI_DB_NAME, creds.database_name.as_str()),
                (variables::AI_DB_USERNAME, creds.database_username.as_str()),
                (variables::AI_DB_PASSWORD, creds.database_password.as_str()),
            ],
        )
        .await?;

        tokio::time::sleep(self.config.ai_inject_delay()).await;
        vars::upsert_all_global(
            &self.hosting,
            project,
            &[
                (variables::AI_LLM_API_URL, creds.litellm_api_url.as_str()),
                (variables::AI_LLM_API_HOSTNAME, hostname.as_str()),
                (variables::AI_LLM_API_HOST_NAME, creds.litellm_api_url.as_str()),
                (variables::AI_LLM_API_TOKEN, creds.litellm_token.as_str()),
            ],
        )
        .await?;
        Ok(())
    }
}

/// `lagoon-auto-idle` as an integer; 0 when unset or not a number.
fn auto_idle(instance: &AppInstance) -> i64 {
    instance
        .value(keys::AUTO_IDLE)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}
