//! Peer builders: `peer node start` with its `core.yaml`, and the
//! one-shot `peer channel` operations.

use crate::command::{CommandBuilder, CommandSpec, SettingValue};
use crate::config::ConfigTemplate;
use crate::error::{BuildError, ConfigError, ProcessError};
use crate::process::{Completion, ProcessResult, Supervisor};
use std::path::{Path, PathBuf};

const NODE_START: &str = "node start";

/// Builder for `peer node start` plus its config document.
#[derive(Debug, Clone)]
pub struct PeerNode {
    builder: CommandBuilder,
}

impl PeerNode {
    pub fn new(template: &ConfigTemplate) -> Self {
        let mut builder = CommandBuilder::new("peer", template);
        builder.set_command(NODE_START);
        Self { builder }
    }

    pub fn peer_id(mut self, id: Option<&str>) -> Self {
        self.builder.set_config("peer.id", id.map(SettingValue::from));
        self
    }

    pub fn listen_address(mut self, address: Option<&str>) -> Self {
        self.builder
            .set_config("peer.listenAddress", address.map(SettingValue::from));
        self
    }

    /// Externally advertised address.
    pub fn address(mut self, address: Option<&str>) -> Self {
        self.builder
            .set_config("peer.address", address.map(SettingValue::from));
        self
    }

    pub fn local_msp_id(mut self, id: Option<&str>) -> Self {
        self.builder
            .set_config("peer.localMspId", id.map(SettingValue::from));
        self
    }

    pub fn msp_config_path(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_config("peer.mspConfigPath", path.map(SettingValue::from));
        self
    }

    pub fn gossip_bootstrap(mut self, endpoints: Option<Vec<String>>) -> Self {
        self.builder.set_config(
            "peer.gossip.bootstrap",
            endpoints.map(SettingValue::from),
        );
        self
    }

    pub fn tls_enabled(mut self, enabled: Option<bool>) -> Self {
        self.builder
            .set_config("peer.tls.enabled", enabled.map(SettingValue::from));
        self
    }

    /// State database backend: `goleveldb` or `CouchDB`.
    pub fn state_database(mut self, database: Option<&str>) -> Self {
        self.builder.set_config(
            "ledger.state.stateDatabase",
            database.map(SettingValue::from),
        );
        self
    }

    pub fn build(&self) -> CommandSpec {
        self.builder.build()
    }

    pub fn save(&self, dest: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        self.builder.save(dest)
    }

    pub async fn execute(
        &self,
        supervisor: &Supervisor,
        completion: Completion,
    ) -> Result<ProcessResult, ProcessError> {
        self.builder.execute(supervisor, completion).await
    }
}

const FETCH: &str = "channel fetch";
const JOIN: &str = "channel join";
const CREATE: &str = "channel create";

/// Builder for the one-shot `peer channel` operations. No config
/// document; the peer reads its own `core.yaml` from `FABRIC_CFG_PATH`.
#[derive(Debug, Clone)]
pub struct PeerChannel {
    builder: CommandBuilder,
}

impl PeerChannel {
    pub fn new() -> Self {
        Self {
            builder: CommandBuilder::new("peer", &ConfigTemplate::empty()),
        }
    }

    /// `peer channel fetch <target>` — target is `newest`, `oldest`, or a
    /// block number.
    pub fn fetch(mut self, target: &str, output: &str) -> Self {
        self.builder
            .set_command(FETCH)
            .push_positional(target)
            .push_positional(output);
        self
    }

    pub fn join(mut self) -> Self {
        self.builder.set_command(JOIN);
        self
    }

    pub fn create(mut self) -> Self {
        self.builder.set_command(CREATE);
        self
    }

    pub fn channel_id(mut self, id: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "channel_id",
            &[FETCH, CREATE],
            "channelID",
            id.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn orderer(mut self, endpoint: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "orderer",
            &[FETCH, CREATE],
            "orderer",
            endpoint.map(SettingValue::from),
        )?;
        Ok(self)
    }

    /// Genesis block to join from.
    pub fn block_path(mut self, path: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "block_path",
            &[JOIN],
            "blockpath",
            path.map(SettingValue::from),
        )?;
        Ok(self)
    }

    /// Channel creation transaction file.
    pub fn channel_tx(mut self, path: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "channel_tx",
            &[CREATE],
            "file",
            path.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn output_block(mut self, path: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "output_block",
            &[CREATE],
            "outputBlock",
            path.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn tls_ca_file(mut self, path: Option<&str>) -> Result<Self, BuildError> {
        self.builder.guarded_flag(
            "tls_ca_file",
            &[FETCH, JOIN, CREATE],
            "cafile",
            path.map(SettingValue::from),
        )?;
        Ok(self)
    }

    pub fn build(&self) -> CommandSpec {
        self.builder.build()
    }

    pub async fn execute(
        &self,
        supervisor: &Supervisor,
        completion: Completion,
    ) -> Result<ProcessResult, ProcessError> {
        self.builder.execute(supervisor, completion).await
    }
}

impl Default for PeerChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::templates;

    #[test]
    fn test_node_start_tokens() {
        let node = PeerNode::new(&templates::peer().unwrap());
        assert_eq!(node.build().tokens(), vec!["peer", "node", "start"]);
    }

    #[test]
    fn test_core_yaml_projection() {
        let temp = tempfile::tempdir().unwrap();
        let node = PeerNode::new(&templates::peer().unwrap())
            .peer_id(Some("peer0.org1"))
            .local_msp_id(Some("Org1MSP"))
            .gossip_bootstrap(Some(vec![
                "peer0.org1:7051".to_string(),
                "peer1.org1:8051".to_string(),
            ]))
            .state_database(None);
        let written = node.save(Some(temp.path())).unwrap().unwrap();
        assert!(written.ends_with("core.yaml"));

        let tree = crate::config::ConfigTree::from_path(&written).unwrap();
        assert_eq!(
            tree.get_path("peer.id"),
            Some(&serde_yaml::Value::String("peer0.org1".into()))
        );
        // Template default survives the None setter.
        assert_eq!(
            tree.get_path("ledger.state.stateDatabase"),
            Some(&serde_yaml::Value::String("goleveldb".into()))
        );
    }

    #[test]
    fn test_fetch_block_tokens() {
        let channel = PeerChannel::new()
            .fetch("0", "genesis.block")
            .channel_id(Some("mychannel"))
            .unwrap()
            .orderer(Some("orderer.example.com:7050"))
            .unwrap();
        assert_eq!(
            channel.build().tokens(),
            vec![
                "peer",
                "channel",
                "fetch",
                "0",
                "genesis.block",
                "--channelID",
                "mychannel",
                "--orderer",
                "orderer.example.com:7050"
            ]
        );
    }

    #[test]
    fn test_join_tokens() {
        let channel = PeerChannel::new()
            .join()
            .block_path(Some("genesis.block"))
            .unwrap();
        assert_eq!(
            channel.build().tokens(),
            vec!["peer", "channel", "join", "--blockpath", "genesis.block"]
        );
    }

    #[test]
    fn test_block_path_rejected_for_fetch() {
        let err = PeerChannel::new()
            .fetch("newest", "latest.block")
            .block_path(Some("genesis.block"))
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidCommandState { .. }));
    }
}
