use std::{fmt, sync::Arc};

use nix::{
    errno::Errno,
    sys::{
        signal::Signal,
        wait::{waitpid, WaitPidFlag},
    },
};

use super::{ChildProcess, ChildStatus, JobTable, Pid, TerminationLog, EXEC_FAILURE_CODE};
use crate::{core::commands::Flow, input::JobMode};

/// How a supervised command ended, as far as the shell is concerned.
#[derive(Debug)]
pub enum Outcome {
    Success,
    /// Exit code 127, normally a command that could not be found or executed.
    ExecutionFailed,
    NonZeroExit(i32),
    Abnormal(Signal),
    WaitFailed(Errno),
    Background(Pid),
}

impl Outcome {
    pub fn from_status(status: ChildStatus) -> Option<Self> {
        match status {
            ChildStatus::Exited(0) => Some(Outcome::Success),
            ChildStatus::Exited(EXEC_FAILURE_CODE) => Some(Outcome::ExecutionFailed),
            ChildStatus::Exited(code) => Some(Outcome::NonZeroExit(code)),
            ChildStatus::Signaled(signal) => Some(Outcome::Abnormal(signal)),
            ChildStatus::Running | ChildStatus::Stopped(_) | ChildStatus::Continued => None,
        }
    }

    /// A child's fate never stops the shell.
    pub fn flow(&self) -> Flow {
        Flow::Continue
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Outcome::Success | Outcome::Background(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Program execution successful"),
            Outcome::ExecutionFailed => write!(f, "Execution failed"),
            Outcome::NonZeroExit(code) => write!(
                f,
                "Program terminated normally, but returned a non-zero status ({})",
                code
            ),
            Outcome::Abnormal(signal) => {
                write!(f, "Program didn't terminate normally (signal {})", signal.as_str())
            }
            Outcome::WaitFailed(e) => write!(f, "Failed waiting for child process: {}", e),
            Outcome::Background(pid) => write!(f, "[{}] running in background", pid),
        }
    }
}

pub struct JobSupervisor {
    jobs: Arc<JobTable>,
    log: TerminationLog,
}

impl JobSupervisor {
    pub fn new(jobs: Arc<JobTable>, log: TerminationLog) -> Self {
        Self { jobs, log }
    }

    pub fn supervise(&self, child: &mut ChildProcess, mode: JobMode) -> Outcome {
        if mode.is_background() {
            // The termination notifier owns this child from here on.
            return Outcome::Background(child.pid());
        }

        let outcome = self.wait_foreground(child);
        self.jobs.lock().clear_foreground(child.pid());
        outcome
    }

    fn wait_foreground(&self, child: &mut ChildProcess) -> Outcome {
        let pid = child.pid();
        loop {
            match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
                Ok(status) => {
                    let status = ChildStatus::from(status);
                    child.observe(status);
                    // Every observation is logged, a stop included.
                    self.record(pid);
                    if let Some(outcome) = Outcome::from_status(status) {
                        return outcome;
                    }
                    tracing::debug!(%pid, ?status, "foreground child not finished, waiting again");
                }
                Err(Errno::EINTR) => continue,
                Err(e) => {
                    tracing::warn!(%pid, error = %e, "waitpid failed");
                    return Outcome::WaitFailed(e);
                }
            }
        }
    }

    fn record(&self, pid: Pid) {
        if let Err(e) = self.log.record(pid) {
            tracing::warn!(%pid, error = %e, "could not write termination log");
        }
    }
}
