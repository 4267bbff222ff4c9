//! Tool configuration for fabnet itself.
//!
//! Hierarchical loading with defaults, an optional `fabnet.toml`, and
//! `FABNET_*` environment variable overrides. The documents fabnet
//! generates for the managed binaries live in [`tree`]/[`template`].

use crate::error::FabnetError;
use crate::logging::LoggingConfig;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod template;
pub mod tree;

pub use template::ConfigTemplate;
pub use tree::ConfigTree;

/// Root configuration for the fabnet tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabnetConfig {
    /// Directory holding the managed binaries (fabric-ca-server, orderer,
    /// peer, configtxgen). `None` falls back to PATH lookup at spawn time.
    pub bin_dir: Option<PathBuf>,

    /// Directory where generated config documents are written.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Commit-quorum polling tuning.
    #[serde(default)]
    pub poll: PollConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tuning for the chaincode commit approval poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay between approval checks, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,

    /// Maximum number of approval checks before giving up.
    #[serde(default = "default_poll_max_attempts")]
    pub max_attempts: u32,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".fabnet")
}

fn default_poll_interval_ms() -> u64 {
    30_000
}

fn default_poll_max_attempts() -> u32 {
    20
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            max_attempts: default_poll_max_attempts(),
        }
    }
}

impl Default for FabnetConfig {
    fn default() -> Self {
        Self {
            bin_dir: None,
            out_dir: default_out_dir(),
            poll: PollConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Loader facade: defaults, then file, then environment.
pub struct ConfigLoader;

impl ConfigLoader {
    fn builder_with_defaults(
    ) -> Result<ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
        Config::builder()
            .set_default("out_dir", ".fabnet")?
            .set_default("poll.interval_ms", 30_000i64)?
            .set_default("poll.max_attempts", 20i64)
    }

    /// Load from an explicit TOML file, with env overrides applied on top.
    pub fn load_from_file(path: &Path) -> Result<FabnetConfig, FabnetError> {
        let settings = Self::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()))
            .add_source(Environment::with_prefix("FABNET").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load the default stack: built-in defaults, `fabnet.toml` in the
    /// working directory when present, then env overrides.
    pub fn load(cwd: &Path) -> Result<FabnetConfig, FabnetError> {
        let file = cwd.join("fabnet.toml");
        let mut builder = Self::builder_with_defaults()?;
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }
        let settings = builder
            .add_source(Environment::with_prefix("FABNET").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
