//! Integration tests for the builder-to-supervisor path: a spec built by
//! the generic builder, executed under both completion modes.

use fabnet::command::CommandBuilder;
use fabnet::config::ConfigTemplate;
use fabnet::error::ProcessError;
use fabnet::process::{CancelToken, Completion, Supervisor};
use regex::Regex;

fn script_builder(script: &str) -> CommandBuilder {
    let mut builder = CommandBuilder::new("sh", &ConfigTemplate::empty());
    builder.push_positional("-c").push_positional(script);
    builder
}

#[tokio::test]
async fn test_one_shot_exit_zero_resolves() {
    let supervisor = Supervisor::default();
    let result = script_builder("echo packaged")
        .execute(&supervisor, Completion::WaitForExit)
        .await
        .unwrap();
    assert_eq!(result.exit_code, Some(0));
    assert!(!result.ready_observed);
    assert!(result.stdout.contains("packaged"));
}

#[tokio::test]
async fn test_one_shot_nonzero_rejects_with_output() {
    let supervisor = Supervisor::default();
    let err = script_builder("echo stdout-line; echo stderr-line >&2; exit 2")
        .execute(&supervisor, Completion::WaitForExit)
        .await
        .unwrap_err();
    match err {
        ProcessError::Exit {
            exit_code,
            stdout,
            stderr,
            ..
        } => {
            assert_eq!(exit_code, Some(2));
            assert!(stdout.contains("stdout-line"));
            assert!(stderr.contains("stderr-line"));
        }
        other => panic!("expected Exit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_mode_readiness_on_stderr() {
    let supervisor = Supervisor::default();
    let cancel = CancelToken::new();
    let result = script_builder("echo 'Beginning to serve requests' >&2; sleep 10")
        .execute(
            &supervisor,
            Completion::WaitForReady {
                pattern: Regex::new("Beginning to serve requests").unwrap(),
                cancel: cancel.clone(),
            },
        )
        .await
        .unwrap();
    assert!(result.ready_observed);
    assert_eq!(result.exit_code, None);
    assert!(result.stderr.contains("Beginning to serve requests"));
    cancel.cancel();
}

#[tokio::test]
async fn test_server_mode_early_exit_rejects() {
    let supervisor = Supervisor::default();
    let cancel = CancelToken::new();
    let err = script_builder("echo 'bind: address already in use' >&2; exit 1")
        .execute(
            &supervisor,
            Completion::WaitForReady {
                pattern: Regex::new("Listening on").unwrap(),
                cancel,
            },
        )
        .await
        .unwrap_err();
    match err {
        ProcessError::Exit {
            exit_code, stderr, ..
        } => {
            assert_eq!(exit_code, Some(1));
            assert!(stderr.contains("address already in use"));
        }
        other => panic!("expected Exit, got {:?}", other),
    }
}
