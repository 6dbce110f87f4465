use std::{sync::Arc, thread};

use signal_hook::{consts::SIGCHLD, iterator::Signals};

use super::{JobTable, Pid, ProcessError, TerminationLog};

/// Reaps and logs children whenever SIGCHLD arrives, on a dedicated thread.
///
/// Background children are reaped here. A finished foreground child is only
/// observed and logged; the supervisor still collects its status, so its
/// termination may be logged twice.
pub struct TerminationNotifier {
    handle: signal_hook::iterator::Handle,
    thread: Option<thread::JoinHandle<()>>,
}

impl TerminationNotifier {
    pub fn install(jobs: Arc<JobTable>, log: TerminationLog) -> Result<Self, ProcessError> {
        let mut signals = Signals::new([SIGCHLD])
            .map_err(|e| ProcessError::SignalError(format!("failed to register SIGCHLD: {}", e)))?;
        let handle = signals.handle();

        let thread = thread::Builder::new()
            .name("sigchld".to_string())
            .spawn(move || {
                for _ in signals.forever() {
                    notify(&jobs, &log);
                }
            })?;

        Ok(Self {
            handle,
            thread: Some(thread),
        })
    }
}

/// Handles one (possibly coalesced) SIGCHLD notification.
pub(crate) fn notify(jobs: &JobTable, log: &TerminationLog) -> Vec<Pid> {
    let finished = {
        let mut table = jobs.lock();
        let mut finished = table.reap_background();
        finished.extend(table.exited_foreground());
        finished
    };

    for &pid in &finished {
        if let Err(e) = log.record(pid) {
            tracing::warn!(%pid, error = %e, "could not write termination log");
        }
    }
    finished
}

impl Drop for TerminationNotifier {
    fn drop(&mut self) {
        self.handle.close();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
