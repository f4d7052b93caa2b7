use std::{
    ffi::OsStr,
    fs::File,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
};

use crate::error::ShellError;

/// True when `name` should bypass the search path and be run as given.
pub fn has_path_separator(name: &str) -> bool {
    return name.contains('/');
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    return path
        .metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false);
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    return path.is_file();
}

pub trait ExecutablePathFinder {
    /// First regular, executable file called `name` in the `search_path`
    /// directories, in order. Empty entries are skipped so the working
    /// directory is never searched implicitly. A name containing `/` is
    /// never joined onto a directory; it is only checked as it stands.
    fn find_executable_path(&self, search_path: &OsStr, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }

        if has_path_separator(name) {
            let path = PathBuf::from(name);
            return is_executable_file(&path).then_some(path);
        }

        for dir in std::env::split_paths(search_path) {
            if dir.as_os_str().is_empty() {
                continue;
            }

            let full_path = dir.join(name);
            if is_executable_file(&full_path) {
                tracing::trace!(path = %full_path.display(), "resolved executable");
                return Some(full_path);
            }
        }

        return None;
    }
}

/// Streams handed to a child. `None` means inherit from the shell.
#[derive(Debug, Default)]
pub struct ChildStdio {
    pub stdout: Option<File>,
    pub stderr: Option<File>,
}

fn to_stdio(file: Option<File>) -> Stdio {
    match file {
        Some(file) => Stdio::from(file),
        None => Stdio::inherit(),
    }
}

pub trait ExecutableRunner {
    /// Runs `program` with `argv[0]` set to `name` and waits for it.
    fn execute(
        &self,
        program: &Path,
        name: &str,
        args: &[String],
        stdio: ChildStdio,
    ) -> Result<ExitStatus, ShellError> {
        let mut command = std::process::Command::new(program);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(name);
        }

        let status = command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(to_stdio(stdio.stdout))
            .stderr(to_stdio(stdio.stderr))
            .status()
            .map_err(|source| ShellError::Spawn {
                command: name.to_string(),
                source,
            })?;

        return Ok(status);
    }
}

pub struct PathFinder {}

impl ExecutablePathFinder for PathFinder {}

impl PathFinder {
    pub fn new() -> Self {
        return Self {};
    }
}

pub struct Runner {}

impl ExecutableRunner for Runner {}

impl Runner {
    pub fn new() -> Self {
        return Self {};
    }
}

#[cfg(all(test, unix))]
pub(crate) mod testing {
    use std::{fs, os::unix::fs::PermissionsExt, path::Path};

    /// Drops a shell script called `name` into `dir` with the given mode.
    pub fn write_script(dir: &Path, name: &str, body: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }
}
