use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use super::Pid;

/// Append-only record of child terminations, shared by the supervisor and the
/// notifier thread.
#[derive(Clone)]
pub struct TerminationLog {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl TerminationLog {
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().append(true).create(true).open(&path)?;

        Ok(Self {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry(pid: Pid) -> String {
        format!("Child process with pid: {} was terminated.\n", pid)
    }

    /// Appends one entry with a single write so entries never interleave mid-line.
    pub fn record(&self, pid: Pid) -> io::Result<()> {
        let entry = Self::entry(pid);
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        file.write_all(entry.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, thread};

    #[test]
    fn test_entry_format() {
        assert_eq!(
            TerminationLog::entry(Pid::from_raw(1234)),
            "Child process with pid: 1234 was terminated.\n"
        );
    }

    #[test]
    fn test_record_appends() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("jobs.log");
        fs::write(&path, "earlier\n")?;

        let log = TerminationLog::open(&path)?;
        log.record(Pid::from_raw(7))?;
        log.record(Pid::from_raw(8))?;

        let content = fs::read_to_string(&path)?;
        assert_eq!(
            content,
            "earlier\n\
             Child process with pid: 7 was terminated.\n\
             Child process with pid: 8 was terminated.\n"
        );
        Ok(())
    }

    #[test]
    fn test_concurrent_records_stay_whole() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let log = TerminationLog::open(dir.path().join("jobs.log"))?;

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let log = log.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        log.record(Pid::from_raw(t * 1000 + i)).unwrap();
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let content = fs::read_to_string(log.path())?;
        assert_eq!(content.lines().count(), 200);
        assert!(content
            .lines()
            .all(|l| l.starts_with("Child process with pid: ") && l.ends_with(" was terminated.")));
        Ok(())
    }
}
