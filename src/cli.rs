//! CLI domain: parse, route, and output only.
//! No domain orchestration; single route table dispatches to the builder
//! façades and the process supervisor.

mod output;
mod parse;
mod route;

pub use output::map_error;
pub use parse::{
    CaCommands, ChaincodeCommands, ChannelCommands, Cli, Commands, OrdererCommands, PeerCommands,
};
pub use route::RunContext;
