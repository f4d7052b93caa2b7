use std::{
    fmt,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::error::{ShellError, SyntaxError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

const STDOUT_OVERRIDE: &[&str] = &[">", "1>"];
const STDERR_OVERRIDE: &[&str] = &["2>"];

/// Where a single command line wants its output streams to go.
#[derive(Debug, Default, PartialEq)]
pub struct Redirections {
    pub stdout: Option<PathBuf>,
    pub stderr: Option<PathBuf>,
}

impl Redirections {
    pub fn is_empty(&self) -> bool {
        return self.stdout.is_none() && self.stderr.is_none();
    }

    fn slot(&mut self, stream: Stream) -> &mut Option<PathBuf> {
        match stream {
            Stream::Stdout => &mut self.stdout,
            Stream::Stderr => &mut self.stderr,
        }
    }
}

fn redirection_stream(word: &str) -> Option<Stream> {
    match word {
        w if STDOUT_OVERRIDE.contains(&w) => Some(Stream::Stdout),
        w if STDERR_OVERRIDE.contains(&w) => Some(Stream::Stderr),
        _ => None,
    }
}

/// Pulls `>`, `1>` and `2>` operators plus their file operands out of `words`.
///
/// Returns the remaining command words and the captured targets. A repeated
/// operator for the same stream replaces the earlier target. A line that is
/// nothing but redirections reports the missing command before any dangling
/// operator.
pub fn extract(words: Vec<String>) -> Result<(Vec<String>, Redirections), SyntaxError> {
    let mut command = Vec::with_capacity(words.len());
    let mut redirections = Redirections::default();
    let mut dangling = None;

    let mut words = words.into_iter();
    while let Some(word) = words.next() {
        let Some(stream) = redirection_stream(&word) else {
            command.push(word);
            continue;
        };

        match words.next() {
            Some(target) => *redirections.slot(stream) = Some(PathBuf::from(target)),
            None => dangling = Some(stream),
        }
    }

    if command.is_empty() && (dangling.is_some() || !redirections.is_empty()) {
        return Err(SyntaxError::MissingCommand);
    }
    if let Some(stream) = dangling {
        return Err(SyntaxError::MissingFile(stream));
    }

    return Ok((command, redirections));
}

/// Opens a redirection target for writing, truncating any previous content.
/// Missing parent directories are created first.
pub fn open_target(path: &Path) -> Result<File, ShellError> {
    let to_error = |source| ShellError::Redirect {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    return File::create(path).map_err(to_error);
}

/// Writes `content` to `path`, replacing whatever was there. The handle is
/// dropped before returning, on success and on failure alike.
pub fn write_target(path: &Path, content: &[u8]) -> Result<(), ShellError> {
    let mut file = open_target(path)?;
    file.write_all(content)
        .and_then(|_| file.flush())
        .map_err(|source| ShellError::Redirect {
            path: path.to_path_buf(),
            source,
        })?;

    return Ok(());
}
