//! Claim: script output becomes the app URL.

#![allow(clippy::expect_used)]

use chrono::{Duration, Utc};
use polydock_common::keys::{instance as keys, variables};
use polydock_common::{AppInstanceStatus, CommandOutcome, OrchestratorConfig, Phase};
use polydock_lagoon::application::LagoonOrchestrator;
use polydock_lagoon::domain::{AppInstance, PhaseOutcome};

use crate::mocks::{MemoryStore, RecordingHosting, created_instance, orchestrator, test_config};

fn claim_instance() -> AppInstance {
    created_instance(AppInstanceStatus::pending(Phase::PolydockClaim))
        .with_value(keys::CLAIM_SCRIPT, "/app/claim.sh")
}

fn printing(output: &str) -> CommandOutcome {
    CommandOutcome {
        result: 0,
        result_text: "ok".to_string(),
        error: None,
        output: Some(output.to_string()),
    }
}

#[tokio::test]
async fn claim_records_the_printed_url() {
    let hosting =
        RecordingHosting::new().with(|s| s.command = Ok(printing("https://x.example/abc\n")));
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = claim_instance();
    let before = Utc::now();

    let outcome = orch.claim(&mut instance).await.expect("claim runs");

    assert_eq!(
        outcome,
        PhaseOutcome::Completed(AppInstanceStatus::completed(Phase::PolydockClaim))
    );
    assert_eq!(instance.status_message(), "Claim completed");
    assert_eq!(
        instance.value(keys::CLAIM_COMMAND_OUTPUT),
        Some("https://x.example/abc")
    );

    let app_url = instance.app_url().expect("app url set");
    assert_eq!(app_url.url, "https://x.example/abc");
    assert_eq!(app_url.one_time_login_url, "https://x.example/abc");
    let ttl = app_url.expires_at - before;
    assert!(ttl >= Duration::hours(24) && ttl < Duration::hours(24) + Duration::minutes(1));
    assert_eq!(store.state().app_urls, vec![app_url.clone()]);

    assert!(hosting.variable(variables::CLAIMED_AT).is_some());
    let command = hosting.state().commands[0].clone();
    assert_eq!(command.command, "/app/claim.sh");
    assert_eq!(command.service, "cli");
    assert_eq!(command.container, "cli");
}

#[tokio::test]
async fn claimed_at_uses_date_time_format() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = claim_instance();

    orch.claim(&mut instance).await.expect("claim runs");

    let stamp = hosting.variable(variables::CLAIMED_AT).expect("stamped");
    assert!(chrono::NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S").is_ok(), "{stamp}");
}

#[tokio::test]
async fn non_url_output_fails_the_claim() {
    let hosting = RecordingHosting::new().with(|s| s.command = Ok(printing("not-a-url")));
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = claim_instance();

    let outcome = orch.claim(&mut instance).await.expect("claim runs");

    assert!(outcome.is_failure());
    assert_eq!(instance.status(), AppInstanceStatus::failed(Phase::PolydockClaim));
    assert!(instance.status_message().contains("not-a-url"));
    assert!(instance.app_url().is_none());
    assert!(store.state().app_urls.is_empty());
    assert!(hosting.variable(variables::CLAIMED_AT).is_none());
}

#[tokio::test]
async fn failed_script_fails_the_claim() {
    let hosting = RecordingHosting::new().with(|s| {
        s.command = Ok(CommandOutcome {
            result: 1,
            result_text: "exit 1".to_string(),
            error: Some("claim.sh: not found".to_string()),
            output: None,
        });
    });
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = claim_instance();

    let outcome = orch.claim(&mut instance).await.expect("claim runs");

    assert!(outcome.is_failure());
    assert_eq!(store.statuses().last(), Some(&AppInstanceStatus::failed(Phase::PolydockClaim)));
    assert_eq!(instance.value(keys::CLAIM_COMMAND_OUTPUT), None);
}

#[tokio::test]
async fn claim_without_script_only_stamps() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::PolydockClaim));

    orch.claim(&mut instance).await.expect("claim runs");

    assert_eq!(instance.status(), AppInstanceStatus::completed(Phase::PolydockClaim));
    assert!(hosting.state().commands.is_empty());
    assert!(instance.app_url().is_none());
    assert!(store.state().app_urls.is_empty());
    assert_eq!(hosting.variable_names(), vec![variables::CLAIMED_AT]);
}

#[tokio::test]
async fn claim_stamp_failure_fails_the_claim() {
    let hosting = RecordingHosting::new()
        .with(|s| s.failing_variable = Some(variables::CLAIMED_AT.to_string()));
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = claim_instance();

    let outcome = orch.claim(&mut instance).await.expect("claim runs");

    assert!(outcome.is_failure());
    assert!(instance.status_message().contains(variables::CLAIMED_AT));
}

#[tokio::test]
async fn unrepresentable_url_expiry_fails_the_claim() {
    let hosting =
        RecordingHosting::new().with(|s| s.command = Ok(printing("https://x.example/abc")));
    let store = MemoryStore::new();
    let config = OrchestratorConfig {
        claim_url_ttl_hours: 10_000_000_000,
        ..test_config()
    };
    let orch = LagoonOrchestrator::new(hosting.clone(), store.clone(), config);
    let mut instance = claim_instance();

    let outcome = orch.claim(&mut instance).await.expect("claim runs");

    assert!(outcome.is_failure());
    assert_eq!(instance.status(), AppInstanceStatus::failed(Phase::PolydockClaim));
    assert_eq!(instance.status_message(), "Claim URL expiry is out of range");
    assert!(instance.app_url().is_none());
    assert!(store.state().app_urls.is_empty());
    assert!(hosting.variable(variables::CLAIMED_AT).is_none());
}
