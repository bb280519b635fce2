//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod claim;
pub mod credentials;
pub mod deployment;
pub mod error;
pub mod guard;
pub mod instance;
pub mod outcome;

pub use error::{ClaimError, FlowError, ProvisioningError, VariableError};
pub use guard::{GuardCheck, GuardSpec};
pub use instance::{AppInstance, AppUrl};
pub use outcome::{PhaseOutcome, truncate_message};
