//! Ordering node builder. The `orderer` binary takes no sub-commands;
//! everything it needs is read from `orderer.yaml`, so this façade is
//! config-document-heavy and the argument vector stays empty.

use crate::command::{CommandBuilder, CommandSpec, SettingValue};
use crate::config::ConfigTemplate;
use crate::error::{ConfigError, ProcessError};
use crate::process::{Completion, ProcessResult, Supervisor};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Orderer {
    builder: CommandBuilder,
}

impl Orderer {
    pub fn new(template: &ConfigTemplate) -> Self {
        Self {
            builder: CommandBuilder::new("orderer", template),
        }
    }

    pub fn listen_address(mut self, address: Option<&str>) -> Self {
        self.builder.set_config(
            "General.ListenAddress",
            address.map(SettingValue::from),
        );
        self
    }

    pub fn listen_port(mut self, port: Option<u16>) -> Self {
        self.builder
            .set_config("General.ListenPort", port.map(SettingValue::from));
        self
    }

    /// Bootstrap method: `file` (genesis block) or `none`.
    pub fn bootstrap_method(mut self, method: Option<&str>) -> Self {
        self.builder.set_config(
            "General.BootstrapMethod",
            method.map(SettingValue::from),
        );
        self
    }

    pub fn genesis_file(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_config("General.BootstrapFile", path.map(SettingValue::from));
        self
    }

    pub fn local_msp_dir(mut self, dir: Option<&str>) -> Self {
        self.builder
            .set_config("General.LocalMSPDir", dir.map(SettingValue::from));
        self
    }

    pub fn local_msp_id(mut self, id: Option<&str>) -> Self {
        self.builder
            .set_config("General.LocalMSPID", id.map(SettingValue::from));
        self
    }

    pub fn tls_enabled(mut self, enabled: Option<bool>) -> Self {
        self.builder
            .set_config("General.TLS.Enabled", enabled.map(SettingValue::from));
        self
    }

    pub fn tls_certificate(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_config("General.TLS.Certificate", path.map(SettingValue::from));
        self
    }

    pub fn tls_private_key(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_config("General.TLS.PrivateKey", path.map(SettingValue::from));
        self
    }

    pub fn ledger_location(mut self, path: Option<&str>) -> Self {
        self.builder
            .set_config("FileLedger.Location", path.map(SettingValue::from));
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
