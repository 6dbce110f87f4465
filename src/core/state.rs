use super::commands::Flow;

/// Running flag of the shell loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellState {
    pub fn new() -> Self {
        Self { running: true }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn apply(&mut self, flow: Flow) {
        if flow == Flow::Stop {
            self.stop();
        }
    }
}
