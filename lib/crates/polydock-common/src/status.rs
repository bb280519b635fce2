use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named stage of the app instance life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    PreCreate,
    Create,
    PostCreate,
    PreDeploy,
    Deploy,
    PostDeploy,
    PolydockClaim,
    PreRemove,
    Remove,
    PostRemove,
    PreUpgrade,
    Upgrade,
    PostUpgrade,
}

impl Phase {
    /// Every phase, in life-cycle order.
    pub const ALL: [Phase; 13] = [
        Phase::PreCreate,
        Phase::Create,
        Phase::PostCreate,
        Phase::PreDeploy,
        Phase::Deploy,
        Phase::PostDeploy,
        Phase::PolydockClaim,
        Phase::PreRemove,
        Phase::Remove,
        Phase::PostRemove,
        Phase::PreUpgrade,
        Phase::Upgrade,
        Phase::PostUpgrade,
    ];

    /// Upper-snake token used inside status strings, e.g. `POST_CREATE`.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Phase::PreCreate => "PRE_CREATE",
            Phase::Create => "CREATE",
            Phase::PostCreate => "POST_CREATE",
            Phase::PreDeploy => "PRE_DEPLOY",
            Phase::Deploy => "DEPLOY",
            Phase::PostDeploy => "POST_DEPLOY",
            Phase::PolydockClaim => "POLYDOCK_CLAIM",
            Phase::PreRemove => "PRE_REMOVE",
            Phase::Remove => "REMOVE",
            Phase::PostRemove => "POST_REMOVE",
            Phase::PreUpgrade => "PRE_UPGRADE",
            Phase::Upgrade => "UPGRADE",
            Phase::PostUpgrade => "POST_UPGRADE",
        }
    }

    /// Human-readable name, e.g. `Post-create`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Phase::PreCreate => "Pre-create",
            Phase::Create => "Create",
            Phase::PostCreate => "Post-create",
            Phase::PreDeploy => "Pre-deploy",
            Phase::Deploy => "Deploy",
            Phase::PostDeploy => "Post-deploy",
            Phase::PolydockClaim => "Claim",
            Phase::PreRemove => "Pre-remove",
            Phase::Remove => "Remove",
            Phase::PostRemove => "Post-remove",
            Phase::PreUpgrade => "Pre-upgrade",
            Phase::Upgrade => "Upgrade",
            Phase::PostUpgrade => "Post-upgrade",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Phase::ALL.into_iter().find(|p| p.token() == token)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Position of an instance within a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Pending,
    Running,
    Completed,
    Failed,
}

/// Status of an app instance: one phase paired with one stage.
///
/// Serialized as the upper-snake status string, e.g. `PENDING_DEPLOY` or
/// `DEPLOY_RUNNING`. Every value of this type is a declared state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AppInstanceStatus {
    phase: Phase,
    stage: Stage,
}

impl AppInstanceStatus {
    #[must_use]
    pub const fn new(phase: Phase, stage: Stage) -> Self {
        Self { phase, stage }
    }

    #[must_use]
    pub const fn pending(phase: Phase) -> Self {
        Self::new(phase, Stage::Pending)
    }

    #[must_use]
    pub const fn running(phase: Phase) -> Self {
        Self::new(phase, Stage::Running)
    }

    #[must_use]
    pub const fn completed(phase: Phase) -> Self {
        Self::new(phase, Stage::Completed)
    }

    #[must_use]
    pub const fn failed(phase: Phase) -> Self {
        Self::new(phase, Stage::Failed)
    }

    #[must_use]
    pub const fn phase(self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn stage(self) -> Stage {
        self.stage
    }

    /// `true` for `*_COMPLETED` and `*_FAILED`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self.stage, Stage::Completed | Stage::Failed)
    }

    /// Display text recorded alongside the status when no more specific
    /// message is available.
    #[must_use]
    pub fn status_message(self) -> String {
        let label = self.phase.label();
        match self.stage {
            Stage::Pending => format!("Pending {}", label.to_lowercase()),
            Stage::Running => format!("{label} running"),
            Stage::Completed => format!("{label} completed"),
            Stage::Failed => format!("{label} failed"),
        }
    }

    /// All declared statuses, phase by phase.
    pub fn all() -> impl Iterator<Item = AppInstanceStatus> {
        Phase::ALL.into_iter().flat_map(|phase| {
            [
                Stage::Pending,
                Stage::Running,
                Stage::Completed,
                Stage::Failed,
            ]
            .into_iter()
            .map(move |stage| AppInstanceStatus::new(phase, stage))
        })
    }
}

impl fmt::Display for AppInstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.phase.token();
        match self.stage {
            Stage::Pending => write!(f, "PENDING_{token}"),
            Stage::Running => write!(f, "{token}_RUNNING"),
            Stage::Completed => write!(f, "{token}_COMPLETED"),
            Stage::Failed => write!(f, "{token}_FAILED"),
        }
    }
}

/// Returned when a string is not one of the declared status values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown app instance status: {0}")]
pub struct StatusParseError(pub String);

impl FromStr for AppInstanceStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = if let Some(token) = s.strip_prefix("PENDING_") {
            Phase::from_token(token).map(AppInstanceStatus::pending)
        } else if let Some(token) = s.strip_suffix("_RUNNING") {
            Phase::from_token(token).map(AppInstanceStatus::running)
        } else if let Some(token) = s.strip_suffix("_COMPLETED") {
            Phase::from_token(token).map(AppInstanceStatus::completed)
        } else if let Some(token) = s.strip_suffix("_FAILED") {
            Phase::from_token(token).map(AppInstanceStatus::failed)
        } else {
            None
        };
        parsed.ok_or_else(|| StatusParseError(s.to_string()))
    }
}

impl TryFrom<String> for AppInstanceStatus {
    type Error = StatusParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AppInstanceStatus> for String {
    fn from(status: AppInstanceStatus) -> Self {
        status.to_string()
    }
}

/// One callable operation of the orchestrator.
///
/// Most steps run a phase; the poll steps re-enter a phase that is already
/// running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PhaseStep {
    PreCreate,
    Create,
    PostCreate,
    PreDeploy,
    Deploy,
    PollDeploy,
    PostDeploy,
    Claim,
    PreRemove,
    Remove,
    PostRemove,
    PreUpgrade,
    Upgrade,
    PollUpgrade,
    PostUpgrade,
    PollHealth,
}

impl PhaseStep {
    pub const ALL: [PhaseStep; 16] = [
        PhaseStep::PreCreate,
        PhaseStep::Create,
        PhaseStep::PostCreate,
        PhaseStep::PreDeploy,
        PhaseStep::Deploy,
        PhaseStep::PollDeploy,
        PhaseStep::PostDeploy,
        PhaseStep::Claim,
        PhaseStep::PreRemove,
        PhaseStep::Remove,
        PhaseStep::PostRemove,
        PhaseStep::PreUpgrade,
        PhaseStep::Upgrade,
        PhaseStep::PollUpgrade,
        PhaseStep::PostUpgrade,
        PhaseStep::PollHealth,
    ];

    /// The phase whose states this step reads and writes. `PollHealth` has
    /// no phase of its own.
    #[must_use]
    pub const fn phase(self) -> Option<Phase> {
        match self {
            PhaseStep::PreCreate => Some(Phase::PreCreate),
            PhaseStep::Create => Some(Phase::Create),
            PhaseStep::PostCreate => Some(Phase::PostCreate),
            PhaseStep::PreDeploy => Some(Phase::PreDeploy),
            PhaseStep::Deploy | PhaseStep::PollDeploy => Some(Phase::Deploy),
            PhaseStep::PostDeploy => Some(Phase::PostDeploy),
            PhaseStep::Claim => Some(Phase::PolydockClaim),
            PhaseStep::PreRemove => Some(Phase::PreRemove),
            PhaseStep::Remove => Some(Phase::Remove),
            PhaseStep::PostRemove => Some(Phase::PostRemove),
            PhaseStep::PreUpgrade => Some(Phase::PreUpgrade),
            PhaseStep::Upgrade | PhaseStep::PollUpgrade => Some(Phase::Upgrade),
            PhaseStep::PostUpgrade => Some(Phase::PostUpgrade),
            PhaseStep::PollHealth => None,
        }
    }

    /// Status an instance must hold for this step to run, if the step is
    /// guarded.
    #[must_use]
    pub const fn entry_status(self) -> Option<AppInstanceStatus> {
        match self {
            PhaseStep::PollDeploy => Some(AppInstanceStatus::running(Phase::Deploy)),
            PhaseStep::PollUpgrade | PhaseStep::PollHealth => None,
            _ => match self.phase() {
                Some(phase) => Some(AppInstanceStatus::pending(phase)),
                None => None,
            },
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PhaseStep::PreCreate => "pre-create",
            PhaseStep::Create => "create",
            PhaseStep::PostCreate => "post-create",
            PhaseStep::PreDeploy => "pre-deploy",
            PhaseStep::Deploy => "deploy",
            PhaseStep::PollDeploy => "poll-deploy",
            PhaseStep::PostDeploy => "post-deploy",
            PhaseStep::Claim => "claim",
            PhaseStep::PreRemove => "pre-remove",
            PhaseStep::Remove => "remove",
            PhaseStep::PostRemove => "post-remove",
            PhaseStep::PreUpgrade => "pre-upgrade",
            PhaseStep::Upgrade => "upgrade",
            PhaseStep::PollUpgrade => "poll-upgrade",
            PhaseStep::PostUpgrade => "post-upgrade",
            PhaseStep::PollHealth => "poll-health",
        }
    }
}

impl fmt::Display for PhaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
