use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

/// Environment prefix read by [`OrchestratorConfig::from_env`].
pub const ENV_PREFIX: &str = "POLYDOCK_";

/// Longest accepted claim URL validity: one year.
pub const MAX_CLAIM_URL_TTL_HOURS: i64 = 24 * 366;

/// Orchestrator configuration loaded from environment variables via `envy`.
///
/// Each field maps to `POLYDOCK_<FIELD>`:
///   - `POLYDOCK_REQUIRES_AI_INFRASTRUCTURE` (default `false`)
///   - `POLYDOCK_AI_SETTLE_DELAY_SECS`       (default `2`)
///   - `POLYDOCK_AI_INJECT_DELAY_SECS`       (default `4`)
///   - `POLYDOCK_CLAIM_URL_TTL_HOURS`        (default `24`)
///   - `POLYDOCK_DEFAULT_SCRIPT_SERVICE`     (default `cli`)
///   - `POLYDOCK_DEFAULT_SCRIPT_CONTAINER`   (default `cli`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Whether the app needs AI backend credentials provisioned after create.
    #[serde(default)]
    pub requires_ai_infrastructure: bool,

    /// Pause before requesting AI credentials, giving the new project time to settle.
    #[serde(default = "default_ai_settle_delay_secs")]
    pub ai_settle_delay_secs: u64,

    /// Pause between batches of AI variables.
    #[serde(default = "default_ai_inject_delay_secs")]
    pub ai_inject_delay_secs: u64,

    /// Validity of the app URL recorded by claim.
    #[serde(
        default = "default_claim_url_ttl_hours",
        deserialize_with = "claim_url_ttl_hours"
    )]
    pub claim_url_ttl_hours: i64,

    /// Service used for claim and post-deploy scripts when the instance names none.
    #[serde(default = "default_script_target")]
    pub default_script_service: String,

    #[serde(default = "default_script_target")]
    pub default_script_container: String,
}

fn default_ai_settle_delay_secs() -> u64 {
    2
}

fn default_ai_inject_delay_secs() -> u64 {
    4
}

fn default_claim_url_ttl_hours() -> i64 {
    24
}

fn claim_url_ttl_hours<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let hours = i64::deserialize(deserializer)?;
    if (1..=MAX_CLAIM_URL_TTL_HOURS).contains(&hours) {
        Ok(hours)
    } else {
        Err(serde::de::Error::custom(format!(
            "claim URL TTL must be between 1 and {MAX_CLAIM_URL_TTL_HOURS} hours, got {hours}"
        )))
    }
}

fn default_script_target() -> String {
    "cli".to_string()
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            requires_ai_infrastructure: false,
            ai_settle_delay_secs: default_ai_settle_delay_secs(),
            ai_inject_delay_secs: default_ai_inject_delay_secs(),
            claim_url_ttl_hours: default_claim_url_ttl_hours(),
            default_script_service: default_script_target(),
            default_script_container: default_script_target(),
        }
    }
}

impl OrchestratorConfig {
    /// Load from `POLYDOCK_*` environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Load from explicit `(name, value)` pairs using the same prefix rules.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(pairs)
    }

    /// Same as the defaults but without the pacing delays.
    #[must_use]
    pub fn without_delays(mut self) -> Self {
        self.ai_settle_delay_secs = 0;
        self.ai_inject_delay_secs = 0;
        self
    }

    #[must_use]
    pub fn ai_settle_delay(&self) -> Duration {
        Duration::from_secs(self.ai_settle_delay_secs)
    }

    #[must_use]
    pub fn ai_inject_delay(&self) -> Duration {
        Duration::from_secs(self.ai_inject_delay_secs)
    }
}
