//! Integration tests for the quorum-gated chaincode commit workflow,
//! driven by shell stand-ins for the status check and commit commands.

use fabnet::command::CommandSpec;
use fabnet::error::{FabnetError, PollError};
use fabnet::network::CommitQuorum;
use fabnet::process::{CancelToken, Supervisor};
use std::time::Duration;
use tempfile::TempDir;

fn sh(script: &str) -> CommandSpec {
    CommandSpec {
        binary: "sh".to_string(),
        command: None,
        subcommand: None,
        positional: vec!["-c".to_string(), script.to_string()],
        args: vec![],
    }
}

#[tokio::test]
async fn test_commit_waits_for_approvals_to_accumulate() {
    let temp = TempDir::new().unwrap();
    let count_file = temp.path().join("count");
    // Approvals cross the majority threshold on the third check.
    let check = sh(&format!(
        r#"
n=$(cat {count} 2>/dev/null || echo 0)
n=$((n + 1))
echo $n > {count}
if [ $n -ge 3 ]; then
  echo '{{"approvals":{{"Org1MSP":true,"Org2MSP":true,"Org3MSP":false}}}}'
else
  echo '{{"approvals":{{"Org1MSP":true,"Org2MSP":false,"Org3MSP":false}}}}'
fi
"#,
        count = count_file.display()
    ));
    let commit = sh("echo committed");

    let result = CommitQuorum::new(Duration::from_millis(5), 10)
        .wait_and_commit(&Supervisor::default(), &check, &commit, &CancelToken::new())
        .await
        .unwrap();
    assert!(result.stdout.contains("committed"));
    assert_eq!(
        std::fs::read_to_string(&count_file).unwrap().trim(),
        "3",
        "the commit should have fired on the third status check"
    );
}

#[tokio::test]
async fn test_commit_failure_propagates_after_quorum() {
    let check = sh(r#"echo '{"approvals":{"Org1MSP":true}}'"#);
    let commit = sh("echo 'ENDORSEMENT_POLICY_FAILURE' >&2; exit 1");
    let err = CommitQuorum::new(Duration::from_millis(5), 3)
        .wait_and_commit(&Supervisor::default(), &check, &commit, &CancelToken::new())
        .await
        .unwrap_err();
    match err {
        FabnetError::Process(fabnet::error::ProcessError::Exit { stderr, .. }) => {
            assert!(stderr.contains("ENDORSEMENT_POLICY_FAILURE"));
        }
        other => panic!("expected Process(Exit), got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancellation_stops_the_poll() {
    let cancel = CancelToken::new();
    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        stopper.cancel();
    });

    let check = sh(r#"echo '{"approvals":{"Org1MSP":false,"Org2MSP":false}}'"#);
    let commit = sh("echo committed");
    let err = CommitQuorum::new(Duration::from_secs(60), 100)
        .wait_and_commit(&Supervisor::default(), &check, &commit, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, FabnetError::Poll(PollError::Cancelled)));
}

#[tokio::test]
async fn test_missing_binary_aborts_instead_of_retrying() {
    let check = CommandSpec {
        binary: "no-such-peer-binary".to_string(),
        command: None,
        subcommand: None,
        positional: vec![],
        args: vec![],
    };
    let commit = sh("echo committed");
    let err = CommitQuorum::new(Duration::from_millis(5), 10)
        .wait_and_commit(&Supervisor::default(), &check, &commit, &CancelToken::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FabnetError::Process(fabnet::error::ProcessError::Spawn { .. })
    ));
}
