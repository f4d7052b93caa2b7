use std::{io, path::PathBuf};

use thiserror::Error;

use crate::redirection::Stream;

/// Problems with the shape of a line. The line is dropped before anything runs.
#[derive(Error, Debug, PartialEq)]
pub enum SyntaxError {
    #[error("Syntax error: unterminated quote")]
    UnterminatedQuote,

    #[error("Syntax error: missing file for {0} redirection")]
    MissingFile(Stream),

    #[error("Syntax error: missing command before redirection")]
    MissingCommand,
}

#[derive(Error, Debug)]
pub enum ShellError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error("Error executing {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Redirect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The shell could not write to its own terminal streams.
    #[error("{0}")]
    Output(String),
}
