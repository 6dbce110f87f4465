use std::path::PathBuf;

use rustyline::{error::ReadlineError, history::FileHistory, Editor};

pub mod tokenizer;

pub use tokenizer::{ArgVector, JobMode, SplitMode, Tokenizer, BACKGROUND_MARKER};

use crate::error::ShellError;

/// One read from the line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    Interrupted,
    Eof,
}

pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input, ShellError>;
}

/// Interactive line editor with optional persistent history.
pub struct ReadlineInput {
    editor: Editor<(), FileHistory>,
    history_path: Option<PathBuf>,
}

impl ReadlineInput {
    pub fn new(history_path: Option<PathBuf>) -> Result<Self, ShellError> {
        let mut editor = Editor::<(), FileHistory>::new()?;

        if let Some(path) = &history_path {
            if path.exists() {
                if let Err(e) = editor.load_history(path) {
                    tracing::warn!(path = %path.display(), error = %e, "could not load history");
                }
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl LineSource for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<Input, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        tracing::warn!(error = %e, "couldn't add to history");
                    }
                }
                Ok(Input::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for ReadlineInput {
    fn drop(&mut self) {
        if let Some(path) = &self.history_path {
            if let Err(e) = self.editor.save_history(path) {
                tracing::warn!(path = %path.display(), error = %e, "could not save history");
            }
        }
    }
}
