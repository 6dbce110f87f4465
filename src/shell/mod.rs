use std::{env, io::Write, sync::Arc};

mod executor;

use crate::{
    config::Config,
    core::{BuiltinRegistry, ShellState},
    error::ShellError,
    highlight::Highlighter,
    input::{Input, LineSource, Tokenizer},
    process::{
        JobSupervisor, JobTable, Outcome, ProcessLauncher, Spawn, TerminationLog,
        TerminationNotifier,
    },
};

pub use executor::CommandHandler;

const INTERRUPT_NOTICE: &str = "Use 'exit' to exit the shell";

/// What to print when Ctrl-C reaches the shell itself.
///
/// A foreground child shares the terminal's process group and takes the
/// interrupt, so the notice is only for an idle prompt.
pub fn interrupt_notice(jobs: &JobTable) -> Option<&'static str> {
    jobs.lock().foreground().is_none().then_some(INTERRUPT_NOTICE)
}

pub struct Shell<I, W> {
    pub(crate) input: I,
    pub(crate) out: W,
    pub(crate) config: Config,
    pub(crate) tokenizer: Tokenizer,
    pub(crate) builtins: BuiltinRegistry,
    pub(crate) jobs: Arc<JobTable>,
    pub(crate) launcher: Box<dyn Spawn>,
    pub(crate) supervisor: JobSupervisor,
    pub(crate) state: ShellState,
    pub(crate) highlighter: Highlighter,
    _notifier: TerminationNotifier,
}

impl<I: LineSource, W: Write> Shell<I, W> {
    /// Opens the termination log and installs the SIGCHLD notifier before
    /// anything can be spawned.
    pub fn new(config: Config, input: I, out: W) -> Result<Self, ShellError> {
        let log = TerminationLog::open(&config.log_path)?;
        let jobs = Arc::new(JobTable::new());
        let notifier = TerminationNotifier::install(jobs.clone(), log.clone())?;
        tracing::debug!(log = %log.path().display(), "termination notifier installed");

        Ok(Shell {
            input,
            out,
            tokenizer: Tokenizer::new(config.split_mode),
            builtins: BuiltinRegistry::new(),
            launcher: Box::new(ProcessLauncher::new(jobs.clone())),
            supervisor: JobSupervisor::new(jobs.clone(), log),
            jobs,
            state: ShellState::new(),
            highlighter: Highlighter::new(),
            config,
            _notifier: notifier,
        })
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Children the shell owns, shared with the signal side.
    pub fn jobs(&self) -> Arc<JobTable> {
        self.jobs.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Reads and executes lines until `exit` or end of input.
    ///
    /// Only a failed fork ends the loop with an error.
    pub fn run(&mut self) -> Result<(), ShellError> {
        while self.state.is_running() {
            let prompt = self.prompt();
            match self.input.read_line(&prompt)? {
                Input::Line(line) => {
                    let flow = self.execute_line(&line)?;
                    self.state.apply(flow);
                }
                Input::Interrupted => continue,
                Input::Eof => self.state.stop(),
            }
        }
        tracing::debug!(
            background = self.jobs.lock().background().count(),
            "shell loop finished"
        );
        Ok(())
    }

    fn prompt(&self) -> String {
        let cwd = env::current_dir()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "?".to_string());
        format!("{} > ", cwd)
    }

    pub(crate) fn report_error(&mut self, message: &str) {
        let text = self.highlighter.error(message);
        self.emit(&text);
    }

    pub(crate) fn report_outcome(&mut self, outcome: &Outcome) {
        if self.config.quiet && !outcome.is_failure() {
            return;
        }
        let text = self.highlighter.outcome(outcome);
        self.emit(&text);
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "could not write to output");
        }
    }
}
