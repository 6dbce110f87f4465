use std::{fmt, io};

use nix::{
    errno::Errno,
    sys::{
        signal::Signal,
        wait::{WaitPidFlag, WaitStatus},
    },
};

pub use nix::unistd::Pid;

pub mod jobs;
pub mod launcher;
pub mod signal;
pub mod supervisor;
pub mod termlog;

pub use jobs::JobTable;
pub use launcher::{ProcessLauncher, Spawn, EXEC_FAILURE_CODE};
pub use signal::TerminationNotifier;
pub use supervisor::{JobSupervisor, Outcome};
pub use termlog::TerminationLog;

#[derive(Debug)]
pub enum ProcessError {
    SignalError(String),
    Io(io::Error),
}

impl From<io::Error> for ProcessError {
    fn from(e: io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}

#[derive(Debug)]
pub enum SpawnError {
    /// The shell could not be duplicated. There is no child to recover into.
    Fork(Errno),
    /// An argument cannot be handed to exec (it contains a NUL byte).
    InvalidArgument(String),
    EmptyCommand,
}

impl SpawnError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, SpawnError::Fork(_))
    }
}

impl fmt::Display for SpawnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnError::Fork(e) => write!(f, "fork failed: {}", e),
            SpawnError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            SpawnError::EmptyCommand => write!(f, "no command to run"),
        }
    }
}

impl std::error::Error for SpawnError {}

/// Last known state of a child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildStatus {
    Running,
    Exited(i32),
    Signaled(Signal),
    Stopped(Signal),
    Continued,
}

impl ChildStatus {
    /// Exited or killed: the child will not run again.
    pub fn is_terminal(self) -> bool {
        matches!(self, ChildStatus::Exited(_) | ChildStatus::Signaled(_))
    }
}

impl From<WaitStatus> for ChildStatus {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(_, code) => ChildStatus::Exited(code),
            WaitStatus::Signaled(_, signal, _) => ChildStatus::Signaled(signal),
            WaitStatus::Stopped(_, signal) => ChildStatus::Stopped(signal),
            WaitStatus::Continued(_) => ChildStatus::Continued,
            _ => ChildStatus::Running,
        }
    }
}

/// Handle to a spawned child. Only wait operations update its status.
#[derive(Debug)]
pub struct ChildProcess {
    pid: Pid,
    status: ChildStatus,
}

impl ChildProcess {
    pub(crate) fn new(pid: Pid) -> Self {
        Self {
            pid,
            status: ChildStatus::Running,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn status(&self) -> ChildStatus {
        self.status
    }

    pub(crate) fn observe(&mut self, status: ChildStatus) {
        self.status = status;
    }
}

/// Reports whether `pid` has exited without reaping it.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
pub(crate) fn has_exited(pid: Pid) -> nix::Result<bool> {
    use nix::sys::wait::{waitid, Id};

    let flags = WaitPidFlag::WEXITED | WaitPidFlag::WNOHANG | WaitPidFlag::WNOWAIT;
    Ok(matches!(
        waitid(Id::Pid(pid), flags)?,
        WaitStatus::Exited(..) | WaitStatus::Signaled(..)
    ))
}

/// Without `waitid` the supervisor is the only one to see a foreground exit.
#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "freebsd")))]
pub(crate) fn has_exited(_pid: Pid) -> nix::Result<bool> {
    Ok(false)
}
