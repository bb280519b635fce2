//! Pre-deploy, deploy, deployment polling and post-deploy.

#![allow(clippy::expect_used)]

use polydock_common::keys::instance as keys;
use polydock_common::{
    AppInstanceStatus, CommandOutcome, DeploymentTriggered, Phase, deployment_build_step_key,
    deployment_status_key,
};
use polydock_lagoon::domain::{AppInstance, PhaseOutcome};

use crate::mocks::{
    BRANCH, MemoryStore, PROJECT, PROJECT_ID, RecordingHosting, created_instance,
    deployment_with_status, orchestrator, remote_text_error,
};

const DEPLOYMENT: &str = "lagoon-build-x1y2z3";

fn polling_instance() -> AppInstance {
    created_instance(AppInstanceStatus::running(Phase::Deploy))
        .with_value(keys::LATEST_DEPLOYMENT_NAME, DEPLOYMENT)
}

#[tokio::test]
async fn pre_deploy_is_a_checkpoint() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::PreDeploy));

    let outcome = orch.pre_deploy(&mut instance).await.expect("pre-deploy runs");

    assert_eq!(
        outcome,
        PhaseOutcome::Completed(AppInstanceStatus::completed(Phase::PreDeploy))
    );
    assert_eq!(instance.status_message(), "Pre-deploy completed");
    assert_eq!(hosting.mutation_count(), 0);
}

#[tokio::test]
async fn deploy_queues_and_stays_running() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::Deploy));

    let outcome = orch.deploy(&mut instance).await.expect("deploy runs");

    assert_eq!(
        outcome,
        PhaseOutcome::InProgress(AppInstanceStatus::running(Phase::Deploy))
    );
    assert_eq!(instance.value(keys::LATEST_DEPLOYMENT_NAME), Some(DEPLOYMENT));
    assert_eq!(
        hosting.state().deploys,
        vec![(PROJECT.to_string(), BRANCH.to_string())]
    );
    assert_eq!(store.statuses(), vec![AppInstanceStatus::running(Phase::Deploy)]);
}

#[tokio::test]
async fn deploy_error_fails_the_phase() {
    let hosting = RecordingHosting::new().with(|s| {
        s.deploy = Ok(DeploymentTriggered {
            deploy_environment_branch: None,
            error: Some(remote_text_error("branch not found")),
        });
    });
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::Deploy));

    let outcome = orch.deploy(&mut instance).await.expect("deploy runs");

    assert!(outcome.is_failure());
    assert_eq!(instance.status(), AppInstanceStatus::failed(Phase::Deploy));
    assert_eq!(instance.status_message(), "Failed to deploy: branch not found");
    assert_eq!(instance.value(keys::LATEST_DEPLOYMENT_NAME), None);
}

#[tokio::test]
async fn poll_maps_remote_states() {
    let cases = [
        ("new", AppInstanceStatus::running(Phase::Deploy)),
        ("pending", AppInstanceStatus::running(Phase::Deploy)),
        ("running", AppInstanceStatus::running(Phase::Deploy)),
        ("complete", AppInstanceStatus::completed(Phase::Deploy)),
        ("failed", AppInstanceStatus::failed(Phase::Deploy)),
        ("error", AppInstanceStatus::failed(Phase::Deploy)),
        ("cancelled", AppInstanceStatus::failed(Phase::Deploy)),
    ];
    for (remote, expected) in cases {
        let hosting =
            RecordingHosting::new().with(|s| s.deployment = Ok(deployment_with_status(remote)));
        let store = MemoryStore::new();
        let orch = orchestrator(&hosting, &store);
        let mut instance = polling_instance();

        let outcome = orch.poll_deploy(&mut instance).await.expect("poll runs");

        assert_eq!(outcome.status(), Some(expected), "{remote}");
        assert_eq!(instance.status(), expected, "{remote}");
        assert_eq!(
            instance.value(&deployment_status_key(DEPLOYMENT)),
            Some(remote),
            "{remote}"
        );
        assert_eq!(
            instance.value(&deployment_build_step_key(DEPLOYMENT)),
            Some("deployCompleted")
        );
        if expected != AppInstanceStatus::running(Phase::Deploy) {
            assert_eq!(instance.status_message(), format!("Deploy is {remote}"));
        }
    }
}

#[tokio::test]
async fn poll_looks_up_the_latest_deployment() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = polling_instance();

    orch.poll_deploy(&mut instance).await.expect("poll runs");

    assert_eq!(
        hosting.state().deployment_lookups,
        vec![(
            PROJECT_ID.to_string(),
            BRANCH.to_string(),
            DEPLOYMENT.to_string()
        )]
    );
}

#[tokio::test]
async fn repeated_running_polls_do_not_rewrite_status() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = polling_instance();

    for _ in 0..3 {
        let outcome = orch.poll_deploy(&mut instance).await.expect("poll runs");
        assert_eq!(
            outcome,
            PhaseOutcome::InProgress(AppInstanceStatus::running(Phase::Deploy))
        );
    }

    assert!(store.statuses().is_empty());
    assert_eq!(store.state().values.len(), 6);
}

#[tokio::test]
async fn unknown_remote_state_leaves_status_alone() {
    let hosting =
        RecordingHosting::new().with(|s| s.deployment = Ok(deployment_with_status("queued")));
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = polling_instance();

    let outcome = orch.poll_deploy(&mut instance).await.expect("poll runs");

    assert_eq!(
        outcome,
        PhaseOutcome::Unchanged {
            reason: "Unknown deployment status: queued".to_string()
        }
    );
    assert_eq!(instance.status(), AppInstanceStatus::running(Phase::Deploy));
    assert!(store.statuses().is_empty());
}

#[tokio::test]
async fn empty_deployment_fields_leave_status_alone() {
    let hosting = RecordingHosting::new().with(|s| {
        let mut deployment = deployment_with_status("complete");
        deployment.id = None;
        s.deployment = Ok(deployment);
    });
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = polling_instance();

    let outcome = orch.poll_deploy(&mut instance).await.expect("poll runs");

    assert!(matches!(outcome, PhaseOutcome::Unchanged { ref reason } if reason.contains("id")));
    assert_eq!(store.save_count(), 0);
    assert_eq!(instance.value(&deployment_status_key(DEPLOYMENT)), None);
}

#[tokio::test]
async fn lookup_failure_leaves_status_alone() {
    let hosting = RecordingHosting::new().with(|s| s.deployment = Err("gateway timeout".to_string()));
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = polling_instance();

    let outcome = orch.poll_deploy(&mut instance).await.expect("poll runs");

    assert!(matches!(outcome, PhaseOutcome::Unchanged { .. }));
    assert_eq!(instance.status(), AppInstanceStatus::running(Phase::Deploy));
    assert_eq!(store.save_count(), 0);
}

#[tokio::test]
async fn post_deploy_without_script_completes() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::PostDeploy));

    let outcome = orch.post_deploy(&mut instance).await.expect("post-deploy runs");

    assert_eq!(
        outcome,
        PhaseOutcome::Completed(AppInstanceStatus::completed(Phase::PostDeploy))
    );
    assert!(hosting.state().commands.is_empty());
}

#[tokio::test]
async fn post_deploy_runs_the_script_with_default_target() {
    let hosting = RecordingHosting::new();
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::PostDeploy))
        .with_value(keys::POST_DEPLOY_SCRIPT, "drush cr")
        .with_value(keys::POST_DEPLOY_SCRIPT_CONTAINER, "php");

    orch.post_deploy(&mut instance).await.expect("post-deploy runs");

    let command = hosting.state().commands[0].clone();
    assert_eq!(command.command, "drush cr");
    assert_eq!(command.environment, BRANCH);
    assert_eq!(command.service, "cli");
    assert_eq!(command.container, "php");
    assert_eq!(instance.status(), AppInstanceStatus::completed(Phase::PostDeploy));
}

#[tokio::test]
async fn post_deploy_script_failure_is_summarised() {
    let hosting = RecordingHosting::new().with(|s| {
        s.command = Ok(CommandOutcome {
            result: 2,
            result_text: "drush failed".to_string(),
            error: Some("e".repeat(200)),
            output: None,
        });
    });
    let store = MemoryStore::new();
    let orch = orchestrator(&hosting, &store);
    let mut instance = created_instance(AppInstanceStatus::pending(Phase::PostDeploy))
        .with_value(keys::POST_DEPLOY_SCRIPT, "drush cr");

    let outcome = orch.post_deploy(&mut instance).await.expect("post-deploy runs");

    assert!(outcome.is_failure());
    assert_eq!(instance.status(), AppInstanceStatus::failed(Phase::PostDeploy));
    assert!(instance.status_message().starts_with("2 | drush failed | eee"));
    assert_eq!(instance.status_message().chars().count(), 100);
}
