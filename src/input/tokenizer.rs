use std::ops::Index;

/// Trailing token that sends a command to the background.
pub const BACKGROUND_MARKER: &str = "&";

/// How runs of consecutive spaces are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitMode {
    /// Runs of whitespace separate arguments and never produce empty ones.
    #[default]
    Collapse,
    /// Every single space is a boundary, so `"a  b"` yields `["a", "", "b"]`.
    Literal,
}

/// Whether a command runs in the foreground or the background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobMode {
    Foreground,
    Background,
}

impl JobMode {
    pub fn is_background(self) -> bool {
        matches!(self, JobMode::Background)
    }
}

/// Command name followed by its arguments. Owned by one shell iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgVector {
    args: Vec<String>,
}

impl ArgVector {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn command(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str)
    }

    /// Strips a trailing `&` and reports the resulting mode.
    pub fn take_background_marker(&mut self) -> JobMode {
        if self.args.last().map(String::as_str) == Some(BACKGROUND_MARKER) {
            self.args.pop();
            JobMode::Background
        } else {
            JobMode::Foreground
        }
    }
}

impl Index<usize> for ArgVector {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.args[index]
    }
}

impl<S: Into<String>> FromIterator<S> for ArgVector {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    mode: SplitMode,
}

impl Tokenizer {
    pub fn new(mode: SplitMode) -> Self {
        Self { mode }
    }

    pub fn tokenize(&self, line: &str) -> ArgVector {
        // An all-space line is a no-op in both modes.
        if line.chars().all(|c| c == ' ') {
            return ArgVector::default();
        }

        match self.mode {
            SplitMode::Collapse => line.split_whitespace().collect(),
            SplitMode::Literal => line.split(' ').collect(),
        }
    }

    /// Tokenizes a line and separates the background marker from it.
    pub fn parse(&self, line: &str) -> (ArgVector, JobMode) {
        let mut args = self.tokenize(line);
        let mode = args.take_background_marker();
        (args, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(args: &ArgVector) -> Vec<&str> {
        args.iter().collect()
    }

    #[test]
    fn test_tokenize_simple_command() {
        let tokenizer = Tokenizer::default();
        let args = tokenizer.tokenize("ls -la /tmp");
        assert_eq!(words(&args), vec!["ls", "-la", "/tmp"]);
        assert_eq!(args.command(), Some("ls"));
        assert_eq!(&args[2], "/tmp");
    }

    #[test]
    fn test_tokenize_blank_lines() {
        for mode in [SplitMode::Collapse, SplitMode::Literal] {
            let tokenizer = Tokenizer::new(mode);
            assert!(tokenizer.tokenize("").is_empty());
            assert!(tokenizer.tokenize("   ").is_empty());
        }
    }

    #[test]
    fn test_collapse_mode_drops_empty_arguments() {
        let tokenizer = Tokenizer::new(SplitMode::Collapse);
        let args = tokenizer.tokenize("  echo   a  b ");
        assert_eq!(words(&args), vec!["echo", "a", "b"]);
    }

    #[test]
    fn test_literal_mode_keeps_empty_arguments() {
        let tokenizer = Tokenizer::new(SplitMode::Literal);
        let args = tokenizer.tokenize("echo  a");
        assert_eq!(words(&args), vec!["echo", "", "a"]);

        let args = tokenizer.tokenize("echo a ");
        assert_eq!(words(&args), vec!["echo", "a", ""]);
    }

    #[test]
    fn test_no_quoting() {
        let args = Tokenizer::default().tokenize("echo \"hello world\"");
        assert_eq!(words(&args), vec!["echo", "\"hello", "world\""]);
    }

    #[test]
    fn test_background_marker_is_stripped() {
        let (args, mode) = Tokenizer::default().parse("sleep 10 &");
        assert_eq!(mode, JobMode::Background);
        assert_eq!(words(&args), vec!["sleep", "10"]);
    }

    #[test]
    fn test_background_marker_must_be_exact_and_last() {
        let tokenizer = Tokenizer::default();

        let (args, mode) = tokenizer.parse("echo a&");
        assert_eq!(mode, JobMode::Foreground);
        assert_eq!(words(&args), vec!["echo", "a&"]);

        let (args, mode) = tokenizer.parse("echo & done");
        assert_eq!(mode, JobMode::Foreground);
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_lone_marker_leaves_nothing_to_run() {
        let (args, mode) = Tokenizer::default().parse("&");
        assert!(mode.is_background());
        assert!(args.is_empty());
    }

    #[test]
    fn test_literal_trailing_space_hides_marker() {
        let (args, mode) = Tokenizer::new(SplitMode::Literal).parse("sleep 1 & ");
        assert_eq!(mode, JobMode::Foreground);
        assert_eq!(words(&args), vec!["sleep", "1", "&", ""]);
    }
}
