use std::collections::BTreeMap;

mod cd;
mod exit;

pub use cd::CdCommand;
pub use exit::ExitCommand;

use crate::input::ArgVector;

/// Whether the shell loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ExecutionError(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CommandError {}

pub trait Command {
    /// `args[0]` is the builtin's own name.
    fn execute(&self, args: &ArgVector) -> Result<Flow, CommandError>;
}

#[derive(Debug, Clone)]
pub enum Builtin {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Command for Builtin {
    fn execute(&self, args: &ArgVector) -> Result<Flow, CommandError> {
        match self {
            Builtin::Cd(cmd) => cmd.execute(args),
            Builtin::Exit(cmd) => cmd.execute(args),
        }
    }
}

/// Commands that run inside the shell process. Built once, never modified.
#[derive(Debug, Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, Builtin>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", Builtin::Cd(CdCommand::new()));
        commands.insert("exit", Builtin::Exit(ExitCommand::new()));
        Self { commands }
    }

    pub fn lookup(&self, name: &str) -> Option<&Builtin> {
        self.commands.get(name)
    }
}
