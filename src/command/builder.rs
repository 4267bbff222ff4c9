//! Generic command builder: one instance describes one external command
//! invocation and, optionally, one config document to emit.
//!
//! Per-binary façades in [`crate::network`] wrap this core with typed
//! setters; the core owns command-state guarding, the canonical settings
//! store, and the two projections (argv and config tree).

use crate::command::settings::{SettingValue, Settings};
use crate::command::spec::CommandSpec;
use crate::config::{ConfigTemplate, ConfigTree};
use crate::error::{BuildError, ConfigError, ProcessError};
use crate::process::{Completion, ProcessResult, Supervisor};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    binary: String,
    command: Option<String>,
    subcommand: Option<String>,
    positional: Vec<String>,
    settings: Settings,
    base: ConfigTree,
    deletions: Vec<String>,
    canonical_filename: String,
}

impl CommandBuilder {
    /// Builder for one binary, seeded from an injected template.
    pub fn new(binary: &str, template: &ConfigTemplate) -> Self {
        Self {
            binary: binary.to_string(),
            command: None,
            subcommand: None,
            positional: Vec::new(),
            settings: Settings::new(),
            base: template.instantiate(),
            deletions: Vec::new(),
            canonical_filename: template.canonical_filename().to_string(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    /// Select the active command; determines which setters are valid.
    pub fn set_command(&mut self, command: &str) -> &mut Self {
        self.command = Some(command.to_string());
        self
    }

    pub fn set_subcommand(&mut self, subcommand: &str) -> &mut Self {
        self.subcommand = Some(subcommand.to_string());
        self
    }

    pub fn push_positional(&mut self, arg: &str) -> &mut Self {
        self.positional.push(arg.to_string());
        self
    }

    /// Guard for façade setters: the active command must be one of
    /// `allowed`, otherwise the setter is being used out of state.
    pub fn guard(&mut self, setter: &str, allowed: &[&str]) -> Result<&mut Self, BuildError> {
        match self.command.as_deref() {
            None => Err(BuildError::NoCommandSelected {
                setter: setter.to_string(),
            }),
            Some(active) if !allowed.contains(&active) => Err(BuildError::InvalidCommandState {
                setter: setter.to_string(),
                active: active.to_string(),
                allowed: allowed.iter().map(|s| s.to_string()).collect(),
            }),
            Some(_) => Ok(self),
        }
    }

    /// Argument-only setting. `None` leaves the builder untouched.
    pub fn set_flag(&mut self, flag: &str, value: Option<SettingValue>) -> &mut Self {
        self.settings.set_flag(flag, value);
        self
    }

    /// Document-only setting. `None` leaves the builder untouched.
    pub fn set_config(&mut self, path: &str, value: Option<SettingValue>) -> &mut Self {
        self.settings.set_config(path, value);
        self
    }

    /// Setting written to both the argv and the config document.
    pub fn set_dual(&mut self, flag: &str, path: &str, value: Option<SettingValue>) -> &mut Self {
        self.settings.set_dual(flag, path, value);
        self
    }

    /// Guarded argument setting: `None` short-circuits before the guard,
    /// so an undefined value never mutates state or raises.
    pub fn guarded_flag(
        &mut self,
        setter: &str,
        allowed: &[&str],
        flag: &str,
        value: Option<SettingValue>,
    ) -> Result<&mut Self, BuildError> {
        if value.is_none() {
            return Ok(self);
        }
        self.guard(setter, allowed)?;
        Ok(self.set_flag(flag, value))
    }

    /// Guarded document setting; same `None` short-circuit.
    pub fn guarded_config(
        &mut self,
        setter: &str,
        allowed: &[&str],
        path: &str,
        value: Option<SettingValue>,
    ) -> Result<&mut Self, BuildError> {
        if value.is_none() {
            return Ok(self);
        }
        self.guard(setter, allowed)?;
        Ok(self.set_config(path, value))
    }

    /// Guarded dual setting; same `None` short-circuit.
    pub fn guarded_dual(
        &mut self,
        setter: &str,
        allowed: &[&str],
        flag: &str,
        path: &str,
        value: Option<SettingValue>,
    ) -> Result<&mut Self, BuildError> {
        if value.is_none() {
            return Ok(self);
        }
        self.guard(setter, allowed)?;
        Ok(self.set_dual(flag, path, value))
    }

    /// Drop a template subtree from the emitted document (applied after
    /// settings, e.g. to remove unused signing profiles).
    pub fn delete_config(&mut self, path: &str) -> &mut Self {
        self.deletions.push(path.to_string());
        self
    }

    /// Project the config document: template, then settings, then deletions.
    pub fn config_tree(&self) -> ConfigTree {
        let mut tree = self.base.clone();
        self.settings.apply_to(&mut tree);
        for path in &self.deletions {
            tree.delete_field(path);
        }
        tree
    }

    /// Produce the immutable command description. Does not reset settings;
    /// repeated calls yield identical specs.
    pub fn build(&self) -> CommandSpec {
        CommandSpec {
            binary: self.binary.clone(),
            command: self.command.clone(),
            subcommand: self.subcommand.clone(),
            positional: self.positional.clone(),
            args: self.settings.to_args(),
        }
    }

    /// Persist the projected config document. `None` destination is a
    /// no-op; idempotent while settings are unchanged.
    pub fn save(&self, dest: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
        self.config_tree().save(dest, &self.canonical_filename)
    }

    /// Run the built command under a supervisor. The completion mode is
    /// always the caller's explicit choice, never inferred from the
    /// command name.
    pub async fn execute(
        &self,
        supervisor: &Supervisor,
        completion: Completion,
    ) -> Result<ProcessResult, ProcessError> {
        supervisor.execute(&self.build(), completion).await
    }
}
