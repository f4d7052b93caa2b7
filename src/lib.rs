//! A small interactive shell.
//!
//! Each line is split into words, stripped of `>`, `1>` and `2>`
//! redirections, then handed either to one of the builtins (`exit`, `echo`,
//! `type`) or to an external program found on `PATH`.

pub mod command;
pub mod config;
pub mod error;
pub mod executable;
pub mod prompt;
pub mod redirection;
pub mod shell;
pub mod tokenizer;

pub use config::Config;
pub use error::{ShellError, SyntaxError};
pub use shell::Shell;
