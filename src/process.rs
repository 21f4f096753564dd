use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Synchronous spawn-and-wait seam used by the run loop.
///
/// An `Err` means the invocation itself failed: the interpreter could not be
/// spawned or waited on. A child that runs and exits non-zero is an `Ok`
/// carrying its exit status; what that status means is the runner's decision,
/// not this layer's.
pub trait ProcessSpawner {
    /// Run `command` to completion in `working_dir`, blocking until it exits.
    fn spawn_and_wait(&self, command: &[String], working_dir: &Path) -> io::Result<ExitStatus>;
}

/// Spawner backed by `std::process::Command`.
///
/// The child inherits the parent's stdio, so interpreter output streams
/// straight to the terminal while the run is in flight.
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    fn spawn_and_wait(&self, command: &[String], working_dir: &Path) -> io::Result<ExitStatus> {
        let Some((program, args)) = command.split_first() else {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
        };
        let mut child = Command::new(program)
            .args(args)
            .current_dir(working_dir)
            .spawn()?;
        child.wait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn runs_a_command_in_the_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        let command: Vec<String> = ["sh", "-c", "pwd > where"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let status = SystemSpawner
            .spawn_and_wait(&command, dir.path())
            .expect("sh should spawn");
        assert!(status.success());
        let recorded = std::fs::read_to_string(dir.path().join("where")).unwrap();
        assert!(recorded.trim().ends_with(
            dir.path()
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap()
        ));
    }

    #[test]
    #[cfg(unix)]
    fn nonzero_exit_is_not_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let command: Vec<String> = ["sh", "-c", "exit 7"]
            .iter()
            .map(|s| (*s).to_string())
            .collect();
        let status = SystemSpawner.spawn_and_wait(&command, dir.path()).unwrap();
        assert_eq!(status.code(), Some(7));
    }

    #[test]
    fn missing_interpreter_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let command = vec!["definitely-not-an-interpreter-3141".to_string()];
        assert!(SystemSpawner.spawn_and_wait(&command, dir.path()).is_err());
    }

    #[test]
    fn empty_command_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SystemSpawner.spawn_and_wait(&[], dir.path()).is_err());
    }
}
