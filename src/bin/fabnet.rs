//! Fabnet CLI Binary
//!
//! Command-line interface for bootstrapping and operating
//! permissioned-ledger network components.

use clap::Parser;
use fabnet::cli::{Cli, RunContext};
use fabnet::config::{ConfigLoader, FabnetConfig};
use fabnet::logging::{init_logging, LoggingConfig};
use fabnet::process::CancelToken;
use std::process;
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

fn main() {
    let cli = Cli::parse();

    let mut config = load_tool_config(&cli);

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli, &config);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Fabnet CLI starting");

    // CLI flags override the loaded tool config
    if let Some(ref bin_dir) = cli.bin_dir {
        config.bin_dir = Some(bin_dir.clone());
    }
    if let Some(ref out_dir) = cli.out_dir {
        config.out_dir = out_dir.clone();
    }

    let runtime = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            process::exit(1);
        }
    };

    let context = RunContext::new(config, cli.dry_run, CancelToken::new());

    // Ctrl-C cancels readiness waits and approval polling instead of
    // leaving half-started children behind.
    let cancel = context.cancel_token();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; cancelling");
            cancel.cancel();
        }
    });

    match runtime.block_on(context.execute(&cli.command)) {
        Ok(output) => {
            info!("Command completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", fabnet::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Load the tool config: explicit --config file when given, otherwise the
/// default stack rooted at the working directory. Load failures fall back
/// to defaults so logging flags still work; the failure is reported once
/// logging is up.
fn load_tool_config(cli: &Cli) -> FabnetConfig {
    let loaded = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
    } else {
        match std::env::current_dir() {
            Ok(cwd) => ConfigLoader::load(&cwd),
            Err(e) => {
                eprintln!("Cannot determine working directory: {}", e);
                process::exit(1);
            }
        }
    };

    match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load tool config, using defaults: {}", e);
            FabnetConfig::default()
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &FabnetConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }

    logging
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_logging_config_default() {
        let cli = Cli::try_parse_from(["fabnet", "orderer", "start"]).unwrap();
        let config = build_logging_config(&cli, &FabnetConfig::default());
        assert!(config.enabled, "default should have logging enabled");
        assert_eq!(config.level, "info", "default level should be info");
        assert_eq!(config.format, "text", "default format should be text");
    }

    #[test]
    fn test_build_logging_config_quiet() {
        let cli = Cli::try_parse_from(["fabnet", "--quiet", "orderer", "start"]).unwrap();
        let config = build_logging_config(&cli, &FabnetConfig::default());
        assert!(!config.enabled, "quiet should disable logging");
    }

    #[test]
    fn test_build_logging_config_verbose_then_explicit_level() {
        let cli = Cli::try_parse_from([
            "fabnet",
            "--verbose",
            "--log-level",
            "trace",
            "orderer",
            "start",
        ])
        .unwrap();
        let config = build_logging_config(&cli, &FabnetConfig::default());
        assert_eq!(config.level, "trace", "explicit --log-level should win over verbose");
    }

    #[test]
    fn test_build_logging_config_format_override() {
        let cli = Cli::try_parse_from(["fabnet", "--log-format", "json", "orderer", "start"])
            .unwrap();
        let config = build_logging_config(&cli, &FabnetConfig::default());
        assert_eq!(config.format, "json");
    }
}
