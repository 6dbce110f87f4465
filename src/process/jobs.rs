use std::{
    collections::BTreeSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use nix::sys::wait::{waitpid, WaitPidFlag};

use super::{has_exited, ChildStatus, Pid};
use crate::input::JobMode;

/// Children the shell currently owns.
#[derive(Debug, Default)]
pub struct Jobs {
    foreground: Option<Pid>,
    background: BTreeSet<Pid>,
}

impl Jobs {
    pub fn register(&mut self, pid: Pid, mode: JobMode) {
        match mode {
            JobMode::Foreground => self.foreground = Some(pid),
            JobMode::Background => {
                self.background.insert(pid);
            }
        }
    }

    pub fn foreground(&self) -> Option<Pid> {
        self.foreground
    }

    pub fn background(&self) -> impl Iterator<Item = Pid> + '_ {
        self.background.iter().copied()
    }

    pub fn clear_foreground(&mut self, pid: Pid) {
        if self.foreground == Some(pid) {
            self.foreground = None;
        }
    }

    /// Reaps every background child that has terminated and returns their pids.
    pub fn reap_background(&mut self) -> Vec<Pid> {
        let mut reaped = Vec::new();
        self.background.retain(|&pid| match waitpid(pid, Some(WaitPidFlag::WNOHANG)) {
            Ok(status) if ChildStatus::from(status).is_terminal() => {
                tracing::debug!(%pid, ?status, "reaped background child");
                reaped.push(pid);
                false
            }
            Ok(_) => true,
            Err(e) => {
                // ECHILD: someone else already collected it.
                tracing::warn!(%pid, error = %e, "dropping unwaitable background child");
                false
            }
        });
        reaped
    }

    /// The foreground child, if it has exited. It is left for the supervisor to reap.
    pub fn exited_foreground(&self) -> Option<Pid> {
        let pid = self.foreground?;
        match has_exited(pid) {
            Ok(true) => Some(pid),
            Ok(false) => None,
            Err(e) => {
                tracing::debug!(%pid, error = %e, "foreground child no longer waitable");
                None
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct JobTable {
    inner: Mutex<Jobs>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, Jobs> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
