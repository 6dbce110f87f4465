use std::{ffi::CString, io, os::fd::AsFd, sync::Arc};

use nix::unistd::{execvp, fork, write, ForkResult};

use super::{ChildProcess, JobTable, SpawnError};
use crate::input::{ArgVector, JobMode};

/// Exit status of a child whose program could not be executed.
pub const EXEC_FAILURE_CODE: i32 = 127;

const SHELL_NAME: &str = "mantle";

/// Starts a program as a child of the shell.
pub trait Spawn {
    fn spawn(&self, argv: &ArgVector, mode: JobMode) -> Result<ChildProcess, SpawnError>;
}

#[derive(Clone)]
pub struct ProcessLauncher {
    jobs: Arc<JobTable>,
}

impl ProcessLauncher {
    pub fn new(jobs: Arc<JobTable>) -> Self {
        Self { jobs }
    }
}

impl Spawn for ProcessLauncher {
    /// Forks and executes `argv[0]`, resolved through `PATH`.
    ///
    /// The job table stays locked across the fork, so the child is registered
    /// before the termination notifier can look for it.
    fn spawn(&self, argv: &ArgVector, mode: JobMode) -> Result<ChildProcess, SpawnError> {
        let command = argv.command().ok_or(SpawnError::EmptyCommand)?;

        // Everything the child needs is allocated before forking.
        let c_args = argv
            .iter()
            .map(|arg| CString::new(arg).map_err(|_| SpawnError::InvalidArgument(arg.to_owned())))
            .collect::<Result<Vec<_>, _>>()?;
        let failure_prefix = format!("{}: {}: ", SHELL_NAME, command);

        let mut jobs = self.jobs.lock();
        // SAFETY: the child only calls execvp, write and _exit.
        match unsafe { fork() } {
            Err(errno) => Err(SpawnError::Fork(errno)),
            Ok(ForkResult::Child) => exec_child(&c_args, failure_prefix.as_bytes()),
            Ok(ForkResult::Parent { child }) => {
                jobs.register(child, mode);
                tracing::debug!(pid = %child, command, ?mode, "child process created");
                Ok(ChildProcess::new(child))
            }
        }
    }
}

/// Runs in the forked child. Nothing here allocates or takes a lock.
fn exec_child(args: &[CString], failure_prefix: &[u8]) -> ! {
    if let Err(errno) = execvp(&args[0], args) {
        write_stderr(failure_prefix);
        write_stderr(errno.desc().as_bytes());
        write_stderr(b"\n");
    }
    // Not process::exit: the runtime's stdio cleanup may block on a lock held at fork.
    unsafe { libc::_exit(EXEC_FAILURE_CODE) }
}

fn write_stderr(mut bytes: &[u8]) {
    let stderr = io::stderr();
    while !bytes.is_empty() {
        match write(stderr.as_fd(), bytes) {
            Ok(0) | Err(_) => return,
            Ok(n) => bytes = &bytes[n..],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ChildStatus;
    use nix::sys::wait::waitpid;

    fn launcher() -> (ProcessLauncher, Arc<JobTable>) {
        let jobs = Arc::new(JobTable::new());
        (ProcessLauncher::new(jobs.clone()), jobs)
    }

    fn wait_terminal(child: &ChildProcess) -> ChildStatus {
        loop {
            let status = ChildStatus::from(waitpid(child.pid(), None).unwrap());
            if status.is_terminal() {
                return status;
            }
        }
    }

    #[test]
    fn test_spawn_registers_foreground() {
        let (launcher, jobs) = launcher();
        let argv: ArgVector = ["true"].into_iter().collect();

        let child = launcher.spawn(&argv, JobMode::Foreground).unwrap();
        assert_eq!(jobs.lock().foreground(), Some(child.pid()));
        assert_eq!(child.status(), ChildStatus::Running);
        assert_eq!(wait_terminal(&child), ChildStatus::Exited(0));
    }

    #[test]
    fn test_spawn_passes_arguments() {
        let (launcher, _) = launcher();
        let argv: ArgVector = ["sh", "-c", "exit 7"].into_iter().collect();

        let child = launcher.spawn(&argv, JobMode::Foreground).unwrap();
        assert_eq!(wait_terminal(&child), ChildStatus::Exited(7));
    }

    #[test]
    fn test_missing_program_exits_127() {
        let (launcher, _) = launcher();
        let argv: ArgVector = ["definitely_not_a_real_command"].into_iter().collect();

        let child = launcher.spawn(&argv, JobMode::Foreground).unwrap();
        assert_eq!(wait_terminal(&child), ChildStatus::Exited(EXEC_FAILURE_CODE));
    }

    #[test]
    fn test_background_registration() {
        let (launcher, jobs) = launcher();
        let argv: ArgVector = ["true"].into_iter().collect();

        let child = launcher.spawn(&argv, JobMode::Background).unwrap();
        assert_eq!(jobs.lock().foreground(), None);
        assert_eq!(jobs.lock().background().count(), 1);
        wait_terminal(&child);
    }

    #[test]
    fn test_nul_byte_is_rejected_before_fork() {
        let (launcher, jobs) = launcher();
        let argv: ArgVector = ["echo", "a\0b"].into_iter().collect();

        let err = launcher.spawn(&argv, JobMode::Foreground).unwrap_err();
        assert!(matches!(err, SpawnError::InvalidArgument(_)));
        assert!(!err.is_fatal());
        assert_eq!(jobs.lock().foreground(), None);
    }

    #[test]
    fn test_empty_command() {
        let (launcher, _) = launcher();
        let err = launcher
            .spawn(&ArgVector::default(), JobMode::Foreground)
            .unwrap_err();
        assert!(matches!(err, SpawnError::EmptyCommand));
    }
}
