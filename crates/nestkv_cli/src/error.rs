//! Error types for the nestkv shell.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for shell operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that stop a shell session.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The script file could not be opened.
    #[error("cannot open script {path:?}: {source}")]
    OpenScript {
        /// Path given on the command line.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Statistics could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A line that does not form a valid command.
///
/// These are reported per line and never end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The line held no tokens.
    #[error("empty command")]
    Empty,

    /// The command name is not recognized.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The uppercased command token.
        name: String,
    },

    /// The command got the wrong number of arguments.
    #[error("{command} expects {expected} argument(s), got {actual}")]
    WrongArity {
        /// Command name.
        command: &'static str,
        /// Arguments the command takes.
        expected: usize,
        /// Arguments supplied.
        actual: usize,
    },
}
