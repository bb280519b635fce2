//! Property-based tests for failure messages and credential naming.

#![allow(clippy::expect_used)]

use polydock_common::{AppInstanceStatus, Phase, PhaseStep};
use polydock_lagoon::domain::credentials::{credential_name, llm_api_hostname};
use polydock_lagoon::domain::{GuardSpec, truncate_message};
use proptest::prelude::*;

use crate::mocks::{MemoryStore, RecordingHosting, configured_instance, orchestrator};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
}

proptest! {
    #[test]
    fn truncation_keeps_a_prefix_of_at_most_100_chars(message in "\\PC{0,300}") {
        let cut = truncate_message(&message);
        prop_assert!(cut.chars().count() <= 100);
        prop_assert!(message.starts_with(&cut));
    }

    #[test]
    fn create_failures_are_stored_truncated(detail in "[a-zA-Z0-9 ]{0,400}") {
        let hosting = RecordingHosting::new().with(|s| s.create_project = Err(detail.clone()));
        let store = MemoryStore::new();
        let orch = orchestrator(&hosting, &store);
        let mut instance = configured_instance(AppInstanceStatus::pending(Phase::Create));

        runtime().block_on(orch.create(&mut instance)).expect("create runs");

        prop_assert_eq!(instance.status(), AppInstanceStatus::failed(Phase::Create));
        prop_assert!(instance.status_message().chars().count() <= 100);
        prop_assert!(instance.status_message().starts_with("Failed to create Lagoon project"));
    }

    #[test]
    fn credential_names_are_slugs(project in "\\PC{0,40}") {
        let name = credential_name(&project);
        prop_assert!(name.ends_with("-proj-creds"));
        prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn hostnames_have_no_scheme_or_path(host in "[a-z]{1,10}(\\.[a-z]{2,5}){1,3}", path in "(/[a-z0-9]{0,8}){0,3}") {
        prop_assert_eq!(llm_api_hostname(&format!("https://{host}{path}")), host.clone());
        prop_assert_eq!(llm_api_hostname(&format!("http://{host}{path}")), host);
    }

    #[test]
    fn guards_accept_only_their_entry_status(step in prop::sample::select(PhaseStep::ALL.to_vec()),
                                             status in prop::sample::select(AppInstanceStatus::all().collect::<Vec<_>>())) {
        if let Some(spec) = GuardSpec::for_step(step) {
            let instance = configured_instance(status);
            prop_assert_eq!(spec.check_status(&instance).is_ok(), Some(status) == step.entry_status());
        }
    }
}
