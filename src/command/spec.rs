//! The immutable description of one external command invocation.

/// Complete, ordered description of one command line, produced by
/// [`CommandBuilder::build`](crate::command::CommandBuilder::build).
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    /// Binary name; resolved to an actual path by the supervisor.
    pub binary: String,
    /// Active command; may carry nested sub-commands as further
    /// whitespace-separated tokens (e.g. `"lifecycle chaincode package"`).
    pub command: Option<String>,
    pub subcommand: Option<String>,
    pub positional: Vec<String>,
    /// Serialized flag tokens, in setter insertion order.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Arguments handed to the spawned process (everything after the binary).
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::new();
        if let Some(command) = &self.command {
            argv.extend(command.split_whitespace().map(str::to_string));
        }
        if let Some(subcommand) = &self.subcommand {
            argv.push(subcommand.clone());
        }
        argv.extend(self.positional.iter().cloned());
        argv.extend(self.args.iter().cloned());
        argv
    }

    /// Full token list including the binary, for display and assertions.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.binary.clone()];
        tokens.extend(self.argv());
        tokens
    }

    /// Single-line rendering for logs and `--dry-run` output.
    pub fn display_line(&self) -> String {
        self.tokens().join(" ")
    }
}
