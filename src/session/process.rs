//! Engine running as a child process

use super::Session;
use crate::error::SessionError;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A [`Session`] over the stdin/stdout pipes of a spawned engine
///
/// The child is killed when the session is dropped, so a fresh life only
/// needs a fresh `ProcessSession`.
pub struct ProcessSession {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ProcessSession {
    /// Start the engine binary at `path` with `args`, e.g. a game image
    pub fn spawn(path: &Path, args: &[String]) -> Result<Self, SessionError> {
        let spawn_error = |source: std::io::Error| SessionError::Spawn {
            path: path.to_path_buf(),
            source,
        };

        let mut child = Command::new(path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(spawn_error)?;

        let missing = |what: &str| {
            spawn_error(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                format!("engine {} was not captured", what),
            ))
        };
        let stdin = child.stdin.take().ok_or_else(|| missing("stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| missing("stdout"))?;

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

}

impl Session for ProcessSession {
    fn send(&mut self, command: &str) -> Result<(), SessionError> {
        self.stdin.write_all(command.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn receive_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(SessionError::Closed);
        }
        Ok(line.trim().to_string())
    }
}

impl Drop for ProcessSession {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
