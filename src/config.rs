use std::{env, fmt, path::PathBuf};

use crate::flags::Flags;
use crate::input::SplitMode;

const LOG_FILE: &str = ".mantle_jobs.log";
const HISTORY_FILE: &str = ".mantle_history";

/// Overrides the default termination log location.
pub const LOG_ENV_VAR: &str = "MANTLE_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    pub log_path: PathBuf,
    pub history_path: Option<PathBuf>,
    pub split_mode: SplitMode,
    pub quiet: bool,
    pub debug: bool,
}

impl Config {
    /// Resolves settings with precedence flag > environment > home directory default.
    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        let log_path = match flags.get_value("log") {
            Some(path) => PathBuf::from(path),
            None => match env::var_os(LOG_ENV_VAR) {
                Some(path) if !path.is_empty() => PathBuf::from(path),
                _ => home_dir()?.join(LOG_FILE),
            },
        };

        let history_path = if flags.is_set("no-history") {
            None
        } else {
            Some(home_dir()?.join(HISTORY_FILE))
        };

        let split_mode = if flags.is_set("literal-split") {
            SplitMode::Literal
        } else {
            SplitMode::Collapse
        };

        Ok(Config {
            log_path,
            history_path,
            split_mode,
            quiet: flags.is_set("quiet"),
            debug: flags.is_set("debug"),
        })
    }

    /// Settings for a shell that keeps no history and logs to `log_path`.
    #[cfg(test)]
    pub(crate) fn with_log(log_path: impl Into<PathBuf>) -> Self {
        Config {
            log_path: log_path.into(),
            history_path: None,
            split_mode: SplitMode::default(),
            quiet: false,
            debug: false,
        }
    }
}

fn home_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(args: &[&str]) -> Flags {
        let mut flags = Flags::new();
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        flags.parse(&args).unwrap();
        flags
    }

    #[test]
    fn test_log_flag_wins() {
        let config = Config::from_flags(&flags(&["--log", "/tmp/custom.log"])).unwrap();
        assert_eq!(config.log_path, PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    fn test_defaults() {
        if dirs::home_dir().is_none() {
            return;
        }
        let config = Config::from_flags(&flags(&["-l", "/tmp/x.log"])).unwrap();
        assert_eq!(config.split_mode, SplitMode::Collapse);
        assert!(!config.quiet);
        assert!(config
            .history_path
            .as_ref()
            .is_some_and(|p| p.ends_with(HISTORY_FILE)));
    }

    #[test]
    fn test_switches_map_to_settings() {
        let config =
            Config::from_flags(&flags(&["-l", "/tmp/x.log", "-L", "-n", "-q", "-d"])).unwrap();
        assert_eq!(config.split_mode, SplitMode::Literal);
        assert_eq!(config.history_path, None);
        assert!(config.quiet);
        assert!(config.debug);
    }
}
