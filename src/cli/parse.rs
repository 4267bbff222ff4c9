//! CLI parse: clap types for fabnet. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fabnet - bootstrap and operate permissioned-ledger network components
#[derive(Parser)]
#[command(name = "fabnet")]
#[command(about = "Bootstrap and operate permissioned-ledger network components")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Tool configuration file path (overrides default fabnet.toml loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the managed binaries (overrides config)
    #[arg(long)]
    pub bin_dir: Option<PathBuf>,

    /// Directory for generated config documents (overrides config)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print the command line that would run, without spawning anything
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable fabnet's own logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Certificate authority lifecycle
    Ca {
        #[command(subcommand)]
        command: CaCommands,
    },
    /// Ordering node lifecycle
    Orderer {
        #[command(subcommand)]
        command: OrdererCommands,
    },
    /// Peer node lifecycle
    Peer {
        #[command(subcommand)]
        command: PeerCommands,
    },
    /// Channel artifact generation and creation
    Channel {
        #[command(subcommand)]
        command: ChannelCommands,
    },
    /// Chaincode lifecycle (package, install, approve, commit)
    Chaincode {
        #[command(subcommand)]
        command: ChaincodeCommands,
    },
}

#[derive(Subcommand)]
pub enum CaCommands {
    /// Write the CA server config and generate its home directory
    Init {
        /// Listen port
        #[arg(long)]
        port: Option<u16>,
        /// CA instance name
        #[arg(long)]
        ca_name: Option<String>,
        /// Bootstrap admin identity, user:password
        #[arg(long)]
        boot: Option<String>,
        /// Enable TLS
        #[arg(long)]
        tls: bool,
        /// Subject alternative names for the CA TLS certificate
        #[arg(long, value_delimiter = ',')]
        csr_hosts: Option<Vec<String>>,
        /// Drop a signing profile from the emitted config
        #[arg(long)]
        drop_profile: Option<String>,
    },
    /// Start the CA server and wait for readiness
    Start {
        /// Listen port
        #[arg(long)]
        port: Option<u16>,
        /// Bootstrap admin identity, user:password
        #[arg(long)]
        boot: Option<String>,
        /// CA server home directory
        #[arg(long)]
        home: Option<String>,
        /// Enable debug logging in the CA server
        #[arg(long)]
        debug: bool,
    },
}

#[derive(Subcommand)]
pub enum OrdererCommands {
    /// Write orderer.yaml and start the ordering node
    Start {
        /// Listen address
        #[arg(long)]
        listen_address: Option<String>,
        /// Listen port
        #[arg(long)]
        listen_port: Option<u16>,
        /// Genesis block file (bootstrap method: file)
        #[arg(long)]
        genesis_file: Option<String>,
        /// Local MSP identifier
        #[arg(long)]
        msp_id: Option<String>,
        /// Local MSP directory
        #[arg(long)]
        msp_dir: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PeerCommands {
    /// Write core.yaml and start the peer node
    Start {
        /// Peer identifier
        #[arg(long)]
        peer_id: Option<String>,
        /// Local MSP identifier
        #[arg(long)]
        msp_id: Option<String>,
        /// Gossip bootstrap endpoints
        #[arg(long, value_delimiter = ',')]
        gossip_bootstrap: Option<Vec<String>>,
        /// State database backend (goleveldb, CouchDB)
        #[arg(long)]
        state_db: Option<String>,
    },
    /// Fetch a channel block
    FetchBlock {
        /// Block to fetch: newest, oldest, or a number
        target: String,
        /// Output block file
        output: String,
        /// Channel identifier
        #[arg(long)]
        channel: Option<String>,
        /// Orderer endpoint
        #[arg(long)]
        orderer: Option<String>,
    },
    /// Join the peer to a channel
    JoinChannel {
        /// Genesis block file to join from
        #[arg(long)]
        block_path: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ChannelCommands {
    /// Generate channel artifacts with configtxgen
    Generate {
        /// Profile name from configtx.yaml
        #[arg(long)]
        profile: Option<String>,
        /// Channel identifier
        #[arg(long)]
        channel: Option<String>,
        /// Output genesis block path
        #[arg(long)]
        output_block: Option<String>,
        /// Output channel creation transaction path
        #[arg(long)]
        output_tx: Option<String>,
        /// Directory holding configtx.yaml
        #[arg(long)]
        config_path: Option<String>,
    },
    /// Create a channel from a creation transaction
    Create {
        /// Channel identifier
        #[arg(long)]
        channel: Option<String>,
        /// Channel creation transaction file
        #[arg(long)]
        file: Option<String>,
        /// Orderer endpoint
        #[arg(long)]
        orderer: Option<String>,
        /// Output block path
        #[arg(long)]
        output_block: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ChaincodeCommands {
    /// Package chaincode source into an installable archive
    Package {
        /// Output archive path
        output: String,
        /// Chaincode source path
        #[arg(long)]
        path: Option<String>,
        /// Chaincode language (golang, node, java)
        #[arg(long)]
        lang: Option<String>,
        /// Package label
        #[arg(long)]
        label: Option<String>,
    },
    /// Install a packaged chaincode on the peer
    Install {
        /// Package archive path
        package_file: String,
    },
    /// Approve a chaincode definition for this organization
    Approve {
        /// Channel identifier
        #[arg(long)]
        channel: Option<String>,
        /// Chaincode name
        #[arg(long)]
        name: Option<String>,
        /// Chaincode version
        #[arg(long)]
        version: Option<String>,
        /// Definition sequence number
        #[arg(long)]
        sequence: Option<u32>,
        /// Package ID from install
        #[arg(long)]
        package_id: Option<String>,
        /// Orderer endpoint
        #[arg(long)]
        orderer: Option<String>,
    },
    /// Wait for a majority of approvals, then commit the definition
    Commit {
        /// Channel identifier
        #[arg(long)]
        channel: Option<String>,
        /// Chaincode name
        #[arg(long)]
        name: Option<String>,
        /// Chaincode version
        #[arg(long)]
        version: Option<String>,
        /// Definition sequence number
        #[arg(long)]
        sequence: Option<u32>,
        /// Orderer endpoint
        #[arg(long)]
        orderer: Option<String>,
        /// Endorsing peer addresses
        #[arg(long, value_delimiter = ',')]
        peer_addresses: Option<Vec<String>>,
    },
}
