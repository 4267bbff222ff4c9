//! Channel artifact generation via `configtxgen`.
//!
//! `configtxgen` takes no sub-commands; the profile and output flags
//! select what gets generated.

use crate::command::{CommandBuilder, CommandSpec, SettingValue};
use crate::config::ConfigTemplate;
use crate::error::ProcessError;
use crate::process::{Completion, ProcessResult, Supervisor};

#[derive(Debug, Clone)]
pub struct ConfigTxGen {
    builder: CommandBuilder,
}

impl ConfigTxGen {
    pub fn new() -> Self {
        Self {
            builder: CommandBuilder::new("configtxgen", &ConfigTemplate::empty()),
        }
    }

    /// Profile name from `configtx.yaml`.
    pub fn profile(mut self, profile: Option<&str>) -> Self {
        self.builder
            .set_flag("profile", profile.map(SettingValue::from));
        self
    }

    pub fn channel_id(mut self, id: Option<&str>) -> Self {
        self.builder
            .set_flag("channelID", id.map(SettingValue::from));
        self
    }

    pub fn output_block(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_flag("outputBlock", path.map(SettingValue::from));
        self
    }

    pub fn output_create_channel_tx(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_flag("outputCreateChannelTx", path.map(SettingValue::from));
        self
    }

    /// Directory holding `configtx.yaml`.
    pub fn config_path(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_flag("configPath", path.map(SettingValue::from));
        self
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

impl Default for ConfigTxGen {
    fn default() -> Self {
        Self::new()
    }
}
