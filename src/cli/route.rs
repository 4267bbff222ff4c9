//! CLI route: single route table and run context. Dispatches to the
//! builder façades and the supervisor; no flag parsing here.

use crate::cli::parse::{
    CaCommands, ChaincodeCommands, ChannelCommands, Commands, OrdererCommands, PeerCommands,
};
use crate::config::FabnetConfig;
use crate::error::FabnetError;
use crate::network::{
    templates, CaServer, Chaincode, CommitQuorum, ConfigTxGen, Orderer, PeerChannel, PeerNode,
};
use crate::process::{CancelToken, Completion, ProcessResult, Supervisor, SupervisorOptions};
use regex::Regex;
use std::time::Duration;
use tracing::info;

/// Runtime context for CLI execution: tool config, supervisor, and the
/// cancellation token wired to Ctrl-C by the binary.
pub struct RunContext {
    config: FabnetConfig,
    supervisor: Supervisor,
    dry_run: bool,
    cancel: CancelToken,
}

impl RunContext {
    pub fn new(config: FabnetConfig, dry_run: bool, cancel: CancelToken) -> Self {
        let supervisor = Supervisor::new(SupervisorOptions {
            bin_dir: config.bin_dir.clone(),
            env: Vec::new(),
        });
        Self {
            config,
            supervisor,
            dry_run,
            cancel,
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn ready(pattern: &str) -> Result<Regex, FabnetError> {
        Regex::new(pattern)
            .map_err(|e| FabnetError::ToolConfig(format!("Invalid readiness pattern: {}", e)))
    }

    fn summarize(result: &ProcessResult) -> String {
        if result.ready_observed {
            "ready".to_string()
        } else {
            format!("exit code {}", result.exit_code.unwrap_or(0))
        }
    }

    /// The single route table. Sequencing inside each arm is explicit:
    /// config documents are written before their server is started.
    pub async fn execute(&self, command: &Commands) -> Result<String, FabnetError> {
        match command {
            Commands::Ca { command } => self.run_ca(command).await,
            Commands::Orderer { command } => self.run_orderer(command).await,
            Commands::Peer { command } => self.run_peer(command).await,
            Commands::Channel { command } => self.run_channel(command).await,
            Commands::Chaincode { command } => self.run_chaincode(command).await,
        }
    }

    async fn run_ca(&self, command: &CaCommands) -> Result<String, FabnetError> {
        match command {
            CaCommands::Init {
                port,
                ca_name,
                boot,
                tls,
                csr_hosts,
                drop_profile,
            } => {
                let template = templates::ca_server()?;
                let mut server = CaServer::new(&template)
                    .init()
                    .port(*port)?
                    .ca_name(ca_name.as_deref())?
                    .boot_identity(boot.as_deref())?
                    .tls_enabled(tls.then_some(true))?
                    .csr_hosts(csr_hosts.clone())?;
                if let Some(profile) = drop_profile {
                    server = server.drop_signing_profile(profile)?;
                }
                if self.dry_run {
                    return Ok(server.build().display_line());
                }
                let written = server.save(Some(&self.config.out_dir.join("ca")))?;
                let result = server
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                info!(?written, "CA initialized");
                Ok(format!(
                    "CA initialized ({}); config: {}",
                    Self::summarize(&result),
                    written
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "not written".to_string())
                ))
            }
            CaCommands::Start {
                port,
                boot,
                home,
                debug,
            } => {
                let template = templates::ca_server()?;
                let server = CaServer::new(&template)
                    .start()
                    .port(*port)?
                    .boot_identity(boot.as_deref())?
                    .home(home.as_deref())?
                    .debug(debug.then_some(true))?;
                if self.dry_run {
                    return Ok(server.build().display_line());
                }
                let result = server
                    .execute(
                        &self.supervisor,
                        Completion::WaitForReady {
                            pattern: Self::ready(templates::CA_SERVER_READY)?,
                            cancel: self.cancel.clone(),
                        },
                    )
                    .await?;
                Ok(format!("CA server {}", Self::summarize(&result)))
            }
        }
    }

    async fn run_orderer(&self, command: &OrdererCommands) -> Result<String, FabnetError> {
        match command {
            OrdererCommands::Start {
                listen_address,
                listen_port,
                genesis_file,
                msp_id,
                msp_dir,
            } => {
                let template = templates::orderer()?;
                let orderer = Orderer::new(&template)
                    .listen_address(listen_address.as_deref())
                    .listen_port(*listen_port)
                    .genesis_file(genesis_file.as_deref())
                    .local_msp_id(msp_id.as_deref())
                    .local_msp_dir(msp_dir.as_deref());
                if self.dry_run {
                    return Ok(orderer.build().display_line());
                }
                orderer.save(Some(&self.config.out_dir.join("orderer")))?;
                let result = orderer
                    .execute(
                        &self.supervisor,
                        Completion::WaitForReady {
                            pattern: Self::ready(templates::ORDERER_READY)?,
                            cancel: self.cancel.clone(),
                        },
                    )
                    .await?;
                Ok(format!("orderer {}", Self::summarize(&result)))
            }
        }
    }

    async fn run_peer(&self, command: &PeerCommands) -> Result<String, FabnetError> {
        match command {
            PeerCommands::Start {
                peer_id,
                msp_id,
                gossip_bootstrap,
                state_db,
            } => {
                let template = templates::peer()?;
                let node = PeerNode::new(&template)
                    .peer_id(peer_id.as_deref())
                    .local_msp_id(msp_id.as_deref())
                    .gossip_bootstrap(gossip_bootstrap.clone())
                    .state_database(state_db.as_deref());
                if self.dry_run {
                    return Ok(node.build().display_line());
                }
                node.save(Some(&self.config.out_dir.join("peer")))?;
                let result = node
                    .execute(
                        &self.supervisor,
                        Completion::WaitForReady {
                            pattern: Self::ready(templates::PEER_READY)?,
                            cancel: self.cancel.clone(),
                        },
                    )
                    .await?;
                Ok(format!("peer {}", Self::summarize(&result)))
            }
            PeerCommands::FetchBlock {
                target,
                output,
                channel,
                orderer,
            } => {
                let fetch = PeerChannel::new()
                    .fetch(target, output)
                    .channel_id(channel.as_deref())?
                    .orderer(orderer.as_deref())?;
                if self.dry_run {
                    return Ok(fetch.build().display_line());
                }
                let result = fetch
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("fetched block into {} ({})", output, Self::summarize(&result)))
            }
            PeerCommands::JoinChannel { block_path } => {
                let join = PeerChannel::new().join().block_path(block_path.as_deref())?;
                if self.dry_run {
                    return Ok(join.build().display_line());
                }
                let result = join
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("joined channel ({})", Self::summarize(&result)))
            }
        }
    }

    async fn run_channel(&self, command: &ChannelCommands) -> Result<String, FabnetError> {
        match command {
            ChannelCommands::Generate {
                profile,
                channel,
                output_block,
                output_tx,
                config_path,
            } => {
                let generate = ConfigTxGen::new()
                    .profile(profile.as_deref())
                    .channel_id(channel.as_deref())
                    .output_block(output_block.as_deref())
                    .output_create_channel_tx(output_tx.as_deref())
                    .config_path(config_path.as_deref());
                if self.dry_run {
                    return Ok(generate.build().display_line());
                }
                let result = generate
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("channel artifacts generated ({})", Self::summarize(&result)))
            }
            ChannelCommands::Create {
                channel,
                file,
                orderer,
                output_block,
            } => {
                let create = PeerChannel::new()
                    .create()
                    .channel_id(channel.as_deref())?
                    .channel_tx(file.as_deref())?
                    .orderer(orderer.as_deref())?
                    .output_block(output_block.as_deref())?;
                if self.dry_run {
                    return Ok(create.build().display_line());
                }
                let result = create
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("channel created ({})", Self::summarize(&result)))
            }
        }
    }

    async fn run_chaincode(&self, command: &ChaincodeCommands) -> Result<String, FabnetError> {
        match command {
            ChaincodeCommands::Package {
                output,
                path,
                lang,
                label,
            } => {
                let package = Chaincode::new()
                    .package(output)
                    .path(path.as_deref())?
                    .lang(lang.as_deref())?
                    .label(label.as_deref())?;
                if self.dry_run {
                    return Ok(package.build().display_line());
                }
                let result = package
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("packaged into {} ({})", output, Self::summarize(&result)))
            }
            ChaincodeCommands::Install { package_file } => {
                let install = Chaincode::new().install(package_file);
                if self.dry_run {
                    return Ok(install.build().display_line());
                }
                let result = install
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("installed {} ({})", package_file, Self::summarize(&result)))
            }
            ChaincodeCommands::Approve {
                channel,
                name,
                version,
                sequence,
                package_id,
                orderer,
            } => {
                let approve = Chaincode::new()
                    .approve()
                    .channel_id(channel.as_deref())?
                    .name(name.as_deref())?
                    .version(version.as_deref())?
                    .sequence(*sequence)?
                    .package_id(package_id.as_deref())?
                    .orderer(orderer.as_deref())?;
                if self.dry_run {
                    return Ok(approve.build().display_line());
                }
                let result = approve
                    .execute(&self.supervisor, Completion::WaitForExit)
                    .await?;
                Ok(format!("approved ({})", Self::summarize(&result)))
            }
            ChaincodeCommands::Commit {
                channel,
                name,
                version,
                sequence,
                orderer,
                peer_addresses,
            } => {
                let check = Chaincode::new()
                    .check_commit_readiness()
                    .channel_id(channel.as_deref())?
                    .name(name.as_deref())?
                    .version(version.as_deref())?
                    .sequence(*sequence)?
                    .output_json(Some(true))?
                    .build();
                let commit = Chaincode::new()
                    .commit()
                    .channel_id(channel.as_deref())?
                    .name(name.as_deref())?
                    .version(version.as_deref())?
                    .sequence(*sequence)?
                    .orderer(orderer.as_deref())?
                    .peer_addresses(peer_addresses.clone())?
                    .build();
                if self.dry_run {
                    return Ok(format!(
                        "{}\n{}",
                        check.display_line(),
                        commit.display_line()
                    ));
                }
                let quorum = CommitQuorum::new(
                    Duration::from_millis(self.config.poll.interval_ms),
                    self.config.poll.max_attempts,
                );
                let result = quorum
                    .wait_and_commit(&self.supervisor, &check, &commit, &self.cancel)
                    .await?;
                Ok(format!("chaincode committed ({})", Self::summarize(&result)))
            }
        }
    }
}
