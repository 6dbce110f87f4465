use std::io::Write;

use crate::core::{Command, Flow};
use crate::error::ShellError;
use crate::input::LineSource;
use crate::process::Spawn;

pub trait CommandHandler {
    /// Runs one line. `Err` is reserved for failures the shell cannot survive.
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError>;
}

impl<I: LineSource, W: Write> CommandHandler for super::Shell<I, W> {
    fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let (args, mode) = self.tokenizer.parse(line);
        let Some(command) = args.command() else {
            return Ok(Flow::Continue);
        };

        if let Some(builtin) = self.builtins.lookup(command) {
            let result = builtin.execute(&args);
            return Ok(match result {
                Ok(flow) => flow,
                Err(e) => {
                    self.report_error(&e.to_string());
                    Flow::Continue
                }
            });
        }

        // Keep our own output ahead of the child's.
        if let Err(e) = self.out.flush() {
            tracing::warn!(error = %e, "could not flush output");
        }

        let mut child = match self.launcher.spawn(&args, mode) {
            Ok(child) => child,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                self.report_error(&format!("{}: {}", command, e));
                return Ok(Flow::Continue);
            }
        };

        let outcome = self.supervisor.supervise(&mut child, mode);
        tracing::debug!(pid = %child.pid(), status = ?child.status(), ?outcome, "command finished");
        self.report_outcome(&outcome);
        Ok(outcome.flow())
    }
}
