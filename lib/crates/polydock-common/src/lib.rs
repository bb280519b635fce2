pub mod config;
pub mod keys;
pub mod remote;
pub mod status;

pub use config::OrchestratorConfig;
pub use keys::{deployment_build_step_key, deployment_status_key, instance, variables};
pub use remote::*;
pub use status::*;
