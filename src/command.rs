use std::{fmt::Display, path::PathBuf};

use bytes::{BufMut, BytesMut};

use crate::{
    config::SearchPath,
    error::{ShellError, SyntaxError},
    executable::{has_path_separator, ChildStdio, ExecutablePathFinder, ExecutableRunner},
    prompt::Prompter,
    redirection::{self, Redirections},
    tokenizer,
};

/// Every name the shell implements itself.
pub const BUILTINS: &[&str] = &["exit", "echo", "type"];

pub fn is_builtin(name: &str) -> bool {
    return BUILTINS.contains(&name);
}

/// What the REPL should do once a command has finished.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Flow {
    Continue,
    Exit(i32),
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseExitCode {
    Ok(i32),
    Invalid,
}

/// `exit` with no operand means status 0.
pub fn parse_exit_code(arg: Option<&str>) -> ParseExitCode {
    match arg {
        None => ParseExitCode::Ok(0),
        Some(raw) => match raw.parse::<i32>() {
            Ok(code) => ParseExitCode::Ok(code),
            Err(_) => ParseExitCode::Invalid,
        },
    }
}

#[derive(Debug, PartialEq)]
pub enum TypeCommand {
    WellKnown { cmd: String },
    Unknown { cmd: String },
    MissingArgument,
}

#[derive(Debug, PartialEq)]
pub enum BuiltinCommand {
    Exit { arg: Option<String> },
    Echo { input: String },
    Type(TypeCommand),
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Builtin(BuiltinCommand),
    External { cmd: String, args: Vec<String> },
}

impl Command {
    fn from_words(cmd: String, mut args: Vec<String>) -> Self {
        match cmd.as_str() {
            "exit" => {
                let arg = (!args.is_empty()).then(|| args.swap_remove(0));
                return Command::Builtin(BuiltinCommand::Exit { arg });
            }
            "echo" => {
                let input = args.join(" ");
                return Command::Builtin(BuiltinCommand::Echo { input });
            }
            "type" => {
                let command = match args.into_iter().next() {
                    None => TypeCommand::MissingArgument,
                    Some(cmd) if is_builtin(&cmd) => TypeCommand::WellKnown { cmd },
                    Some(cmd) => TypeCommand::Unknown { cmd },
                };
                return Command::Builtin(BuiltinCommand::Type(command));
            }
            _ => return Command::External { cmd, args },
        }
    }
}

/// A fully parsed line: the command plus where its output goes.
#[derive(Debug, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub redirections: Redirections,
}

impl Invocation {
    /// Parses one input line. A blank line is `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, SyntaxError> {
        let words = tokenizer::tokenize(line)?;
        if words.is_empty() {
            return Ok(None);
        }

        let (words, redirections) = redirection::extract(words)?;
        let mut words = words.into_iter();
        let Some(cmd) = words.next() else {
            return Err(SyntaxError::MissingCommand);
        };

        let command = Command::from_words(cmd, words.collect());
        return Ok(Some(Self {
            command,
            redirections,
        }));
    }

    pub fn run(
        self,
        prompter: &mut impl Prompter,
        search_path: &SearchPath,
        finder: &impl ExecutablePathFinder,
        runner: &impl ExecutableRunner,
    ) -> Result<Flow, ShellError> {
        match self.command {
            Command::Builtin(builtin_command) => {
                return run_builtin_command(
                    builtin_command,
                    &self.redirections,
                    prompter,
                    search_path,
                    finder,
                );
            }
            Command::External { cmd, args } => {
                run_external_command(
                    &cmd,
                    &args,
                    &self.redirections,
                    prompter,
                    search_path,
                    finder,
                    runner,
                )?;
                return Ok(Flow::Continue);
            }
        }
    }
}

/// Text a builtin produced, held until it is routed to its destination.
#[derive(Debug, Default)]
pub struct CommandOutput {
    buf: BytesMut,
}

impl CommandOutput {
    pub fn line(&mut self, text: impl Display) {
        self.buf.put_slice(text.to_string().as_bytes());
        self.buf.put_u8(b'\n');
    }

    pub fn as_bytes(&self) -> &[u8] {
        return &self.buf;
    }
}

/// Builtins write through a single channel. A stderr target takes it when
/// present, then a stdout target, then the shell's own stdout. Any other
/// target named on the line is still created empty.
fn emit_builtin_output(
    output: CommandOutput,
    redirections: &Redirections,
    prompter: &mut impl Prompter,
) -> Result<(), ShellError> {
    let target = redirections.stderr.as_ref().or(redirections.stdout.as_ref());

    let Some(target) = target else {
        prompter
            .prompt(&String::from_utf8_lossy(output.as_bytes()))
            .map_err(|e| ShellError::Output(e.to_string()))?;
        return Ok(());
    };

    for other in [&redirections.stdout, &redirections.stderr]
        .into_iter()
        .flatten()
        .filter(|path| *path != target)
    {
        redirection::open_target(other)?;
    }

    return redirection::write_target(target, output.as_bytes());
}

/// Operand errors go to the stderr target when there is one, otherwise to the
/// shell's stderr. A stdout target on the same line is still created empty.
fn emit_builtin_error(
    output: CommandOutput,
    redirections: &Redirections,
    prompter: &mut impl Prompter,
) -> Result<(), ShellError> {
    if let Some(stdout) = redirections
        .stdout
        .as_ref()
        .filter(|path| redirections.stderr.as_ref() != Some(*path))
    {
        redirection::open_target(stdout)?;
    }

    match &redirections.stderr {
        Some(target) => return redirection::write_target(target, output.as_bytes()),
        None => {
            return prompter
                .report(&String::from_utf8_lossy(output.as_bytes()))
                .map_err(|e| ShellError::Output(e.to_string()));
        }
    }
}

fn run_builtin_command(
    command: BuiltinCommand,
    redirections: &Redirections,
    prompter: &mut impl Prompter,
    search_path: &SearchPath,
    finder: &impl ExecutablePathFinder,
) -> Result<Flow, ShellError> {
    let mut output = CommandOutput::default();

    match command {
        BuiltinCommand::Exit { arg } => match parse_exit_code(arg.as_deref()) {
            ParseExitCode::Ok(code) => {
                return Ok(Flow::Exit(code));
            }
            ParseExitCode::Invalid => {
                prompter
                    .report("exit: numeric argument required\n")
                    .map_err(|e| ShellError::Output(e.to_string()))?;
                return Ok(Flow::Exit(255));
            }
        },
        BuiltinCommand::Echo { input } => {
            output.line(input);
        }
        BuiltinCommand::Type(command) => match command {
            TypeCommand::WellKnown { cmd } => {
                output.line(format_args!("{} is a shell builtin", cmd));
            }
            TypeCommand::Unknown { cmd } => {
                let result = search_path
                    .resolve()
                    .and_then(|dirs| finder.find_executable_path(&dirs, &cmd));

                match result {
                    Some(full_path) => {
                        output.line(format_args!("{} is {}", cmd, full_path.display()));
                    }
                    None => {
                        output.line(format_args!("{}: not found", cmd));
                    }
                }
            }
            TypeCommand::MissingArgument => {
                output.line("type: missing argument");
                emit_builtin_error(output, redirections, prompter)?;
                return Ok(Flow::Continue);
            }
        },
    }

    emit_builtin_output(output, redirections, prompter)?;
    return Ok(Flow::Continue);
}

fn run_external_command(
    cmd: &str,
    args: &[String],
    redirections: &Redirections,
    prompter: &mut impl Prompter,
    search_path: &SearchPath,
    finder: &impl ExecutablePathFinder,
    runner: &impl ExecutableRunner,
) -> Result<(), ShellError> {
    let program = if has_path_separator(cmd) {
        Some(PathBuf::from(cmd))
    } else {
        search_path
            .resolve()
            .and_then(|dirs| finder.find_executable_path(&dirs, cmd))
    };

    let Some(program) = program else {
        tracing::debug!(cmd, "command not found");
        let message = format!("{}\n", ShellError::CommandNotFound(cmd.to_string()));
        return match &redirections.stderr {
            Some(path) => redirection::write_target(path, message.as_bytes()),
            None => prompter
                .report(&message)
                .map_err(|e| ShellError::Output(e.to_string())),
        };
    };

    let stdio = ChildStdio {
        stdout: redirections
            .stdout
            .as_deref()
            .map(redirection::open_target)
            .transpose()?,
        stderr: redirections
            .stderr
            .as_deref()
            .map(redirection::open_target)
            .transpose()?,
    };

    tracing::debug!(cmd, program = %program.display(), ?args, "spawning");
    let status = runner.execute(&program, cmd, args, stdio)?;
    tracing::debug!(cmd, %status, "child exited");

    return Ok(());
}
