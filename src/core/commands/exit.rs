use super::{Command, CommandError, Flow};
use crate::input::ArgVector;

/// Ends the shell loop. Any arguments are ignored.
#[derive(Debug, Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &ArgVector) -> Result<Flow, CommandError> {
        Ok(Flow::Stop)
    }
}
