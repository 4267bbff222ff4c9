//! Chaincode lifecycle builders and the quorum-gated commit workflow.
//!
//! Committing a chaincode definition requires approvals from a strict
//! majority of the channel's organizations. [`CommitQuorum`] polls the
//! `checkcommitreadiness` status payload until that majority exists,
//! then issues the commit transaction.

use crate::command::{CommandBuilder, CommandSpec, SettingValue};
use crate::config::ConfigTemplate;
use crate::error::{BuildError, FabnetError, ProcessError, StatusError};
use crate::process::{CancelToken, PollOutcome, Poller, ProcessResult, Supervisor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};

const PACKAGE: &str = "lifecycle chaincode package";
const INSTALL: &str = "lifecycle chaincode install";
const APPROVE: &str = "lifecycle chaincode approveformyorg";
const CHECK: &str = "lifecycle chaincode checkcommitreadiness";
const COMMIT: &str = "lifecycle chaincode commit";

/// Builder for one `peer lifecycle chaincode` invocation.
#[derive(Debug, Clone)]
pub struct Chaincode {
    builder: CommandBuilder,
}

impl Chaincode {
    pub fn new() -> Self {
        Self {
            builder: CommandBuilder::new("peer", &ConfigTemplate::empty()),
        }
    }

    pub fn package(mut self, output: &str) -> Self {
        self.builder.set_command(PACKAGE).push_positional(output);
        self
    }

    pub fn install(mut self, package_file: &str) -> Self {
        self.builder.set_command(INSTALL).push_positional(package_file);
        self
    }

    pub fn approve(mut self) -> Self {
        self.builder.set_command(APPROVE);
        self
    }

    pub fn check_commit_readiness(mut self) -> Self {
        self.builder.set_command(CHECK);
        self
    }

    pub fn commit(mut self) -> Self {
        self.builder.set_command(COMMIT);
        self
    }

    /// Chaincode source path (package only).
    pub fn path(mut self, path: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "path",
            &[PACKAGE],
            "path",
            path.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn lang(mut self, lang: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "lang",
            &[PACKAGE],
            "lang",
            lang.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn label(mut self, label: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "label",
            &[PACKAGE],
            "label",
            label.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn channel_id(mut self, id: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "channel_id",
            &[APPROVE, CHECK, COMMIT],
            "channelID",
            id.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn name(mut self, name: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "name",
            &[APPROVE, CHECK, COMMIT],
            "name",
            name.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn version(mut self, version: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "version",
            &[APPROVE, CHECK, COMMIT],
            "version",
            version.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn sequence(mut self, sequence: Option<u32>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "sequence",
            &[APPROVE, CHECK, COMMIT],
            "sequence",
            sequence.map(SettingValue::from),
        )?;
        Ok(self)
    }

    /// Package ID returned by install (approve only).
    pub fn package_id(mut self, id: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "package_id",
            &[APPROVE],
            "package-id",
            id.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn orderer(mut self, endpoint: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "orderer",
            &[APPROVE, COMMIT],
            "orderer",
            endpoint.map(SettingValue::from),
        )?;
        Ok(self)
    }

    /// Endorsing peer addresses (commit only); serialized comma-joined.
    pub fn peer_addresses(mut self, addresses: Option<Vec<String>>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "peer_addresses",
            &[COMMIT],
            "peerAddresses",
            addresses.map(SettingValue::from),
        )?;
        Ok(self)
    }

    /// Emit the status payload as JSON (checkcommitreadiness only).
    pub fn output_json(mut self, enabled: Option<bool>) -> Result<Self, BuildError> {
        // Some(false) is a defined value and must still hit the guard.
        let Some(enabled) = enabled else {
            return Ok(self);
        };
        self.builder.guard("output_json", &[CHECK])?;
        self.builder
            .set_flag("output", enabled.then(|| SettingValue::from("json")));
        Ok(self)
    }

    pub fn build(&self) -> CommandSpec {
        self.builder.build()
    }

    pub async fn execute(
        &self,
        supervisor: &Supervisor,
        completion: crate::process::Completion,
    ) -> Result<ProcessResult, ProcessError> {
        self.builder.execute(supervisor, completion).await
    }
}

impl Default for Chaincode {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-organization approval map from the `checkcommitreadiness` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalStatus {
    pub approvals: BTreeMap<String, bool>,
}

impl ApprovalStatus {
    pub fn parse(payload: &str) -> Result<Self, StatusError> {
        serde_json::from_str(payload).map_err(|source| StatusError::Parse {
            payload: payload.to_string(),
            source,
        })
    }

    pub fn approved(&self) -> usize {
        self.approvals.values().filter(|ok| **ok).count()
    }

    pub fn total(&self) -> usize {
        self.approvals.len()
    }

    /// Strict majority: more than half of the organizations approved.
    /// Ties on an even total do not pass.
    pub fn has_majority(&self) -> bool {
        2 * self.approved() > self.total()
    }
}

/// Quorum-gated commit: poll the status check until a strict majority of
/// organizations has approved, then run the commit command.
#[derive(Debug, Clone)]
pub struct CommitQuorum {
    poller: Poller,
}

impl CommitQuorum {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            poller: Poller::new(interval, max_attempts),
        }
    }

    /// Drive `check` until quorum, then run `commit` and return its result.
    ///
    /// A failed status-check invocation is treated like "not yet
    /// approved" and retried (it consumes an attempt); a payload that a
    /// *successful* check produced but that cannot be parsed aborts
    /// immediately. Spawn failures abort: a missing binary will not fix
    /// itself by waiting.
    pub async fn wait_and_commit(
        &self,
        supervisor: &Supervisor,
        check: &CommandSpec,
        commit: &CommandSpec,
        cancel: &CancelToken,
    ) -> Result<ProcessResult, FabnetError> {
        self.poller
            .poll(cancel, |attempt| async move {
                match supervisor.run(check).await {
                    Ok(result) => {
                        let status = ApprovalStatus::parse(&result.stdout)?;
                        let approved = status.approved();
                        let total = status.total();
                        if status.has_majority() {
                            info!(attempt, approved, total, "commit quorum reached");
                            Ok(PollOutcome::Done(()))
                        } else {
                            info!(attempt, approved, total, "waiting for commit quorum");
                            Ok(PollOutcome::Retry)
                        }
                    }
                    Err(err @ ProcessError::Spawn { .. }) => Err(err.into()),
                    Err(err) => {
                        warn!(attempt, error = %err, "status check failed; retrying");
                        Ok(PollOutcome::Retry)
                    }
                }
            })
            .await?;

        Ok(supervisor.run(commit).await?)
    }
}
