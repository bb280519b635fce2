//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use polydock_common::AppInstanceStatus;
use thiserror::Error;

// ── Flow errors ───────────────────────────────────────────────────────────────

/// A phase was called when it must not run. The instance status is left as is.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("App instance status is {actual}, expected {expected}")]
    UnexpectedStatus {
        expected: AppInstanceStatus,
        actual: AppInstanceStatus,
    },

    #[error("Lagoon API is unreachable: {0}")]
    HostingUnreachable(String),

    #[error("Required value '{0}' is not set on the app instance")]
    MissingValue(&'static str),

    #[error("App requires AI infrastructure but no AI backend client is configured")]
    AiBackendUnavailable,

    #[error(transparent)]
    Provisioning(#[from] ProvisioningError),

    #[error("Failed to persist app instance: {0}")]
    Persistence(String),
}

// ── Provisioning errors ───────────────────────────────────────────────────────

/// Failures while validating the AI backend or issuing credentials.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("AI backend region is required to be set in the app instance")]
    MissingRegion,

    #[error("AI backend is not healthy")]
    Unhealthy,

    #[error("AI backend is not authorized as an admin")]
    NotAdmin,

    #[error("AI backend is not an active admin")]
    NotActive,

    #[error("Failed to find or create AI backend user {email}")]
    UserUnavailable { email: String },

    #[error("Missing required credential key: {0}")]
    MissingCredentialKey(&'static str),

    #[error("AI backend request failed: {0}")]
    Backend(String),
}

// ── Variable errors ───────────────────────────────────────────────────────────

/// Setting a project variable failed; carries the variable name.
#[derive(Debug, Error)]
#[error("Failed to set project variable {name}: {detail}")]
pub struct VariableError {
    pub name: String,
    pub detail: String,
}

// ── Claim errors ──────────────────────────────────────────────────────────────

/// The claim script did not yield a usable app URL.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("{0}")]
    CommandFailed(String),

    #[error("No output from claim command: {0}")]
    NoOutput(String),

    #[error("Claim command output is not a valid URL: {0}")]
    NotAUrl(String),
}
