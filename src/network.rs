//! Per-binary builder façades for the managed network components.

pub mod ca;
pub mod channel;
pub mod chaincode;
pub mod orderer;
pub mod peer;
pub mod templates;

pub use ca::{CaClient, CaServer};
pub use chaincode::{ApprovalStatus, Chaincode, CommitQuorum};
pub use channel::ConfigTxGen;
pub use orderer::Orderer;
pub use peer::{PeerChannel, PeerNode};
