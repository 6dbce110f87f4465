use super::{Command, CommandError, Flow};
use crate::input::ArgVector;
use std::env;

#[derive(Debug, Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &ArgVector) -> Result<Flow, CommandError> {
        let path = args.get(1).ok_or_else(|| {
            CommandError::InvalidArguments("cd: argument is expected".to_string())
        })?;

        env::set_current_dir(path)
            .map_err(|e| CommandError::ExecutionError(format!("cd: {}: {}", path, e)))?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::tests::CWD_LOCK;
    use std::env;

    fn cd(args: &[&str]) -> Result<Flow, CommandError> {
        let args: ArgVector = std::iter::once("cd").chain(args.iter().copied()).collect();
        CdCommand::new().execute(&args)
    }

    #[test]
    fn test_cd_temp() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let original = env::current_dir().unwrap();
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().canonicalize().unwrap();

        assert_eq!(cd(&[target.to_str().unwrap()]).unwrap(), Flow::Continue);
        assert_eq!(env::current_dir().unwrap(), target);

        env::set_current_dir(original).unwrap();
    }

    #[test]
    fn test_cd_without_argument() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = env::current_dir().unwrap();

        let result = cd(&[]);
        assert!(matches!(result, Err(CommandError::InvalidArguments(_))));
        assert_eq!(
            result.unwrap_err().to_string(),
            "cd: argument is expected"
        );
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_cd_invalid() {
        let _guard = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = env::current_dir().unwrap();

        let result = cd(&["/nonexistent/path"]);
        match result {
            Err(CommandError::ExecutionError(msg)) => {
                assert!(msg.starts_with("cd: /nonexistent/path: "));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
