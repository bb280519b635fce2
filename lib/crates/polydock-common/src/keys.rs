/// Key/value names read from and written to an app instance
pub mod instance {
    /// Git URL the project is created from
    pub const DEPLOY_GIT: &str = "lagoon-deploy-git";

    /// Branch deployed and removed; also the production environment fallback
    pub const DEPLOY_BRANCH: &str = "lagoon-deploy-branch";

    /// Hosting cluster id
    pub const DEPLOY_REGION_ID: &str = "lagoon-deploy-region-id";

    /// Deploy key handed to the hosting API. Secret.
    pub const DEPLOY_PRIVATE_KEY: &str = "lagoon-deploy-private-key";

    pub const DEPLOY_ORGANIZATION_ID: &str = "lagoon-deploy-organization-id";

    /// Group added to the project after creation
    pub const DEPLOY_GROUP_NAME: &str = "lagoon-deploy-group-name";

    pub const DEPLOY_PROJECT_PREFIX: &str = "lagoon-deploy-project-prefix";

    pub const PROJECT_NAME: &str = "lagoon-project-name";

    /// Written by create
    pub const PROJECT_ID: &str = "lagoon-project-id";

    pub const PRODUCTION_ENVIRONMENT: &str = "lagoon-production-environment";

    /// Integer; 0 when absent or unparseable
    pub const AUTO_IDLE: &str = "lagoon-auto-idle";

    /// Written by deploy, read by poll-deploy
    pub const LATEST_DEPLOYMENT_NAME: &str = "lagoon-latest-deployment-name";

    /// Stands for the instance's app type in required-value checks. The app
    /// type lives on the instance itself, not in its key/value map.
    pub const APP_TYPE: &str = "app-type";

    pub const HEALTH_WEBHOOK_URL: &str = "polydock-app-instance-health-webhook-url";

    pub const CLAIM_SCRIPT: &str = "lagoon-claim-script";
    pub const CLAIM_SCRIPT_SERVICE: &str = "lagoon-claim-script-service";
    pub const CLAIM_SCRIPT_CONTAINER: &str = "lagoon-claim-script-container";

    /// Written by claim: trimmed script output
    pub const CLAIM_COMMAND_OUTPUT: &str = "claim-command-output";

    pub const POST_DEPLOY_SCRIPT: &str = "lagoon-post-deploy-script";
    pub const POST_DEPLOY_SCRIPT_SERVICE: &str = "lagoon-post-deploy-script-service";
    pub const POST_DEPLOY_SCRIPT_CONTAINER: &str = "lagoon-post-deploy-script-container";

    pub const GENERATE_APP_ADMIN_USERNAME: &str = "lagoon-generate-app-admin-username";

    /// Secret.
    pub const GENERATE_APP_ADMIN_PASSWORD: &str = "lagoon-generate-app-admin-password";

    pub const AI_BACKEND_REGION_ID: &str = "amazee-ai-backend-region-id";
    pub const AI_BACKEND_USER_EMAIL: &str = "amazee-ai-backend-user-email";

    pub const USER_FIRST_NAME: &str = "user-first-name";
    pub const USER_LAST_NAME: &str = "user-last-name";
    pub const USER_EMAIL: &str = "user-email";

    /// Values every guarded phase checks before touching a remote service,
    /// in the order they are checked.
    pub const REQUIRED_VALUES: &[&str] = &[
        DEPLOY_GIT,
        DEPLOY_REGION_ID,
        DEPLOY_PRIVATE_KEY,
        DEPLOY_ORGANIZATION_ID,
        DEPLOY_GROUP_NAME,
        DEPLOY_PROJECT_PREFIX,
        APP_TYPE,
        PROJECT_NAME,
        HEALTH_WEBHOOK_URL,
    ];

    /// Values never echoed by logs or the inspection CLI.
    pub const SECRET_VALUES: &[&str] = &[DEPLOY_PRIVATE_KEY, GENERATE_APP_ADMIN_PASSWORD];
}

/// Remote project variable names upserted on the hosting API
pub mod variables {
    pub const APP_NAME: &str = "POLYDOCK_APP_NAME";
    pub const GENERATED_APP_ADMIN_USERNAME: &str = "POLYDOCK_GENERATED_APP_ADMIN_USERNAME";
    pub const GENERATED_APP_ADMIN_PASSWORD: &str = "POLYDOCK_GENERATED_APP_ADMIN_PASSWORD";
    pub const USER_FIRST_NAME: &str = "POLYDOCK_USER_FIRST_NAME";
    pub const USER_LAST_NAME: &str = "POLYDOCK_USER_LAST_NAME";
    pub const USER_EMAIL: &str = "POLYDOCK_USER_EMAIL";
    pub const HEALTH_WEBHOOK_URL: &str = "POLYDOCK_APP_INSTANCE_HEALTH_WEBHOOK_URL";
    pub const FEATURE_FLAG_INSIGHTS: &str = "LAGOON_FEATURE_FLAG_INSIGHTS";

    pub const AI_REGION: &str = "AI_REGION";
    pub const AI_DB_HOST_NAME: &str = "AI_DB_HOST_NAME";
    pub const AI_DB_NAME: &str = "AI_DB_NAME";
    pub const AI_DB_USERNAME: &str = "AI_DB_USERNAME";
    pub const AI_DB_PASSWORD: &str = "AI_DB_PASSWORD";
    pub const AI_LLM_API_URL: &str = "AI_LLM_API_URL";
    pub const AI_LLM_API_HOSTNAME: &str = "AI_LLM_API_HOSTNAME";
    /// Carries the full URL, not a hostname. Kept for apps that read it.
    pub const AI_LLM_API_HOST_NAME: &str = "AI_LLM_API_HOST_NAME";
    pub const AI_LLM_API_TOKEN: &str = "AI_LLM_API_TOKEN";

    /// Format: YYYY-MM-DD HH:MM:SS (UTC)
    pub const CLAIMED_AT: &str = "POLYDOCK_CLAIMED_AT";

    /// Format: YYYY-MM-DD
    pub const APP_REMOVED_DATE: &str = "POLYDOCK_APP_REMOVED_DATE";
    /// Format: HH:MM:SS
    pub const APP_REMOVED_TIME: &str = "POLYDOCK_APP_REMOVED_TIME";

    pub const APP_LAST_UPGRADED_DATE: &str = "POLYDOCK_APP_LAST_UPGRADED_DATE";
    pub const APP_LAST_UPGRADED_TIME: &str = "POLYDOCK_APP_LAST_UPGRADED_TIME";
}

/// Key under which poll-deploy records the remote status of a deployment.
/// Format: lagoon-deployment-{name}.status
#[must_use]
pub fn deployment_status_key(deployment_name: &str) -> String {
    format!("lagoon-deployment-{deployment_name}.status")
}

/// Format: lagoon-deployment-{name}.buildStep
#[must_use]
pub fn deployment_build_step_key(deployment_name: &str) -> String {
    format!("lagoon-deployment-{deployment_name}.buildStep")
}
