//! Integration tests for the CLI surface: parsing and dry-run routing.

use clap::Parser;
use fabnet::cli::{Cli, RunContext};
use fabnet::config::FabnetConfig;
use fabnet::process::CancelToken;

fn dry_run_context() -> RunContext {
    RunContext::new(FabnetConfig::default(), true, CancelToken::new())
}

#[test]
fn test_parse_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["fabnet", "nonsense"]).is_err());
    assert!(Cli::try_parse_from(["fabnet", "ca", "nonsense"]).is_err());
}

#[test]
fn test_parse_global_flags() {
    let cli = Cli::try_parse_from([
        "fabnet",
        "--bin-dir",
        "/opt/fabric/bin",
        "--dry-run",
        "orderer",
        "start",
    ])
    .unwrap();
    assert_eq!(
        cli.bin_dir.as_deref(),
        Some(std::path::Path::new("/opt/fabric/bin"))
    );
    assert!(cli.dry_run);
}

#[tokio::test]
async fn test_dry_run_ca_start_prints_command_line() {
    let cli = Cli::try_parse_from([
        "fabnet",
        "--dry-run",
        "ca",
        "start",
        "--port",
        "7054",
        "--boot",
        "admin:adminpw",
    ])
    .unwrap();
    let output = dry_run_context().execute(&cli.command).await.unwrap();
    assert_eq!(
        output,
        "fabric-ca-server start --port 7054 --boot admin:adminpw"
    );
}

#[tokio::test]
async fn test_dry_run_chaincode_commit_prints_check_and_commit() {
    let cli = Cli::try_parse_from([
        "fabnet",
        "--dry-run",
        "chaincode",
        "commit",
        "--channel",
        "mychannel",
        "--name",
        "basic",
        "--version",
        "1.0",
        "--sequence",
        "1",
        "--peer-addresses",
        "peer0.org1:7051,peer0.org2:9051",
    ])
    .unwrap();
    let output = dry_run_context().execute(&cli.command).await.unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "peer lifecycle chaincode checkcommitreadiness --channelID mychannel \
         --name basic --version 1.0 --sequence 1 --output json"
    );
    assert_eq!(
        lines[1],
        "peer lifecycle chaincode commit --channelID mychannel --name basic \
         --version 1.0 --sequence 1 --peerAddresses peer0.org1:7051,peer0.org2:9051"
    );
}

#[test]
fn test_fetch_block_requires_both_positionals() {
    // Both positionals are required; a bare invocation is a parse error,
    // not a panic.
    assert!(Cli::try_parse_from(["fabnet", "peer", "fetch-block"]).is_err());
    assert!(Cli::try_parse_from(["fabnet", "peer", "fetch-block", "newest"]).is_err());
    assert!(
        Cli::try_parse_from(["fabnet", "peer", "fetch-block", "newest", "latest.block"]).is_ok()
    );
}

#[tokio::test]
async fn test_dry_run_peer_fetch_block_positionals() {
    let cli = Cli::try_parse_from([
        "fabnet",
        "--dry-run",
        "peer",
        "fetch-block",
        "0",
        "genesis.block",
        "--channel",
        "mychannel",
    ])
    .unwrap();
    let output = dry_run_context().execute(&cli.command).await.unwrap();
    assert_eq!(
        output,
        "peer channel fetch 0 genesis.block --channelID mychannel"
    );
}

#[tokio::test]
async fn test_dry_run_spawns_nothing() {
    // A dry run for a command whose binary does not exist must still
    // succeed: nothing may be spawned or written.
    let cli = Cli::try_parse_from(["fabnet", "--dry-run", "channel", "generate"]).unwrap();
    let output = dry_run_context().execute(&cli.command).await.unwrap();
    assert_eq!(output, "configtxgen");
}
