//! Fabnet: Permissioned-Ledger Network Bootstrapper
//!
//! Generates the configuration documents for a permissioned ledger's
//! network components (CA, orderer, peer), builds their command lines
//! from the same typed settings, and supervises the binaries through
//! startup, readiness, and the quorum-gated chaincode commit workflow.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod process;
