use std::io;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors surfaced by discovery and the run loop.
///
/// `Invocation` and `NonZeroExit` are raised only after the failing step's
/// record has been finalized, so a report rendered afterwards reflects every
/// step up to and including the failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Two directory entries parse to the same integer prefix, so there is no
    /// single valid execution order.
    #[error("files '{first}' and '{second}' share the integer prefix {order}")]
    DuplicatePrefix {
        order: i64,
        first: String,
        second: String,
    },

    /// The directory listing itself could not be read.
    #[error("cannot list directory '{directory}'")]
    ListDir {
        directory: String,
        #[source]
        source: io::Error,
    },

    /// A step's extension has no interpreter in the merged extension map.
    #[error("no interpreter mapped for extension '{extension}' of '{file}'")]
    UnknownExtension { file: String, extension: String },

    /// Spawning or waiting on the interpreter failed, e.g. the interpreter
    /// binary does not exist. Distinct from the child merely exiting non-zero.
    #[error("failed to invoke '{command}' for '{file}'")]
    Invocation {
        file: String,
        command: String,
        #[source]
        source: io::Error,
    },

    /// The child ran to completion but exited non-zero, and the runner was
    /// configured to treat that as a failure.
    #[error("'{file}' exited with {status}")]
    NonZeroExit { file: String, status: ExitStatus },
}
