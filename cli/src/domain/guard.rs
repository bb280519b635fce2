//! Entry checks run before a phase body.
//!
//! Everything here is offline. Pinging the hosting API happens in the
//! application layer, between the status check and the value checks.

use polydock_common::keys::instance as keys;
use polydock_common::{AppInstanceStatus, PhaseStep};
use serde::Serialize;

use crate::domain::error::FlowError;
use crate::domain::instance::AppInstance;

/// Which checks a phase runs before touching a remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)] // one flag per independent check
pub struct GuardSpec {
    pub expected: AppInstanceStatus,
    pub ping_hosting: bool,
    pub require_values: bool,
    pub require_project_name: bool,
    pub require_project_id: bool,
}

impl GuardSpec {
    /// All checks, entering on `expected`.
    #[must_use]
    pub const fn full(expected: AppInstanceStatus) -> Self {
        Self {
            expected,
            ping_hosting: true,
            require_values: true,
            require_project_name: true,
            require_project_id: true,
        }
    }

    /// The guard for `step`, or `None` for steps that run unguarded.
    #[must_use]
    pub const fn for_step(step: PhaseStep) -> Option<Self> {
        let Some(expected) = step.entry_status() else {
            return None;
        };
        let spec = Self::full(expected);
        Some(match step {
            // The project id only exists once create has run.
            PhaseStep::PreCreate | PhaseStep::Create => Self {
                require_project_id: false,
                ..spec
            },
            _ => spec,
        })
    }

    pub fn check_status(&self, instance: &AppInstance) -> Result<(), FlowError> {
        if instance.status() == self.expected {
            Ok(())
        } else {
            Err(FlowError::UnexpectedStatus {
                expected: self.expected,
                actual: instance.status(),
            })
        }
    }

    /// Required values, then project name, then project id, as selected.
    pub fn check_values(&self, instance: &AppInstance) -> Result<(), FlowError> {
        if self.require_values && !verify_required_values(instance) {
            let key = missing_required_value(instance).unwrap_or(keys::PROJECT_NAME);
            return Err(FlowError::MissingValue(key));
        }
        if self.require_project_name && instance.value(keys::PROJECT_NAME).is_none() {
            return Err(FlowError::MissingValue(keys::PROJECT_NAME));
        }
        if self.require_project_id && instance.value(keys::PROJECT_ID).is_none() {
            return Err(FlowError::MissingValue(keys::PROJECT_ID));
        }
        Ok(())
    }

    /// Every offline check with its result, for diagnosis.
    #[must_use]
    pub fn report(&self, instance: &AppInstance) -> Vec<GuardCheck> {
        let mut checks = vec![GuardCheck {
            name: "status".to_string(),
            passed: instance.status() == self.expected,
            detail: format!("expected {}, found {}", self.expected, instance.status()),
        }];
        if self.require_values {
            checks.extend(keys::REQUIRED_VALUES.iter().map(|key| value_check(instance, key)));
        }
        if self.require_project_name && !self.require_values {
            checks.push(value_check(instance, keys::PROJECT_NAME));
        }
        if self.require_project_id {
            checks.push(value_check(instance, keys::PROJECT_ID));
        }
        checks
    }
}

/// Outcome of one offline guard check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardCheck {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

fn value_check(instance: &AppInstance, key: &str) -> GuardCheck {
    let passed = instance.required_value(key).is_some();
    GuardCheck {
        name: key.to_string(),
        passed,
        detail: if passed { "set" } else { "not set" }.to_string(),
    }
}

/// First required value the instance lacks, in check order.
#[must_use]
pub fn missing_required_value(instance: &AppInstance) -> Option<&'static str> {
    keys::REQUIRED_VALUES
        .iter()
        .copied()
        .find(|key| instance.required_value(key).is_none())
}

/// `true` when every required value is set; logs the first missing one.
#[must_use]
pub fn verify_required_values(instance: &AppInstance) -> bool {
    match missing_required_value(instance) {
        Some(key) => {
            tracing::debug!(key, app = %instance.app_name, "required value not set");
            false
        }
        None => true,
    }
}
