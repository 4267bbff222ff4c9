//! Embedded default config documents and readiness patterns for the
//! managed binaries.
//!
//! These are the seed templates handed to builder constructors; callers
//! may substitute their own via [`ConfigTemplate::from_path`].

use crate::config::ConfigTemplate;
use crate::error::ConfigError;

pub const CA_SERVER_FILENAME: &str = "fabric-ca-server-config.yaml";
pub const ORDERER_FILENAME: &str = "orderer.yaml";
pub const PEER_FILENAME: &str = "core.yaml";

/// Line the CA server logs once it accepts connections.
pub const CA_SERVER_READY: &str = r"Listening on";
/// Line the orderer logs once consensus is up.
pub const ORDERER_READY: &str = r"Beginning to serve requests";
/// Line the peer logs once system chaincodes are deployed.
pub const PEER_READY: &str = r"Deployed system chaincodes";

const CA_SERVER_TEMPLATE: &str = r#"
version: 1.5.7
port: 7054
debug: false
tls:
  enabled: false
  certfile:
  keyfile:
ca:
  name:
  certfile:
  keyfile:
csr:
  cn: fabric-ca-server
  hosts:
    - localhost
signing:
  default:
    usage:
      - digital signature
    expiry: 8760h
  profiles:
    ca:
      usage:
        - cert sign
        - crl sign
      expiry: 43800h
      caconstraint:
        isca: true
        maxpathlen: 0
    tls:
      usage:
        - signing
        - key encipherment
        - server auth
        - client auth
        - key agreement
      expiry: 8760h
"#;

const ORDERER_TEMPLATE: &str = r#"
General:
  ListenAddress: 127.0.0.1
  ListenPort: 7050
  TLS:
    Enabled: false
    PrivateKey:
    Certificate:
  BootstrapMethod: file
  BootstrapFile:
  LocalMSPDir: msp
  LocalMSPID:
FileLedger:
  Location: /var/ledger/orderer
Admin:
  ListenAddress: 127.0.0.1:9443
"#;

const PEER_TEMPLATE: &str = r#"
peer:
  id:
  networkId: dev
  listenAddress: 0.0.0.0:7051
  address: 0.0.0.0:7051
  localMspId:
  mspConfigPath: msp
  gossip:
    bootstrap: 127.0.0.1:7051
    useLeaderElection: true
    orgLeader: false
  tls:
    enabled: false
    cert:
      file:
    key:
      file:
vm:
  endpoint: unix:///var/run/docker.sock
ledger:
  state:
    stateDatabase: goleveldb
"#;

pub fn ca_server() -> Result<ConfigTemplate, ConfigError> {
    ConfigTemplate::from_str(CA_SERVER_TEMPLATE, CA_SERVER_FILENAME)
}

pub fn orderer() -> Result<ConfigTemplate, ConfigError> {
    ConfigTemplate::from_str(ORDERER_TEMPLATE, ORDERER_FILENAME)
}

pub fn peer() -> Result<ConfigTemplate, ConfigError> {
    ConfigTemplate::from_str(PEER_TEMPLATE, PEER_FILENAME)
}
