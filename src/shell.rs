use crate::{
    command::{Flow, Invocation},
    config::{Config, PROMPT},
    executable::{ExecutablePathFinder, ExecutableRunner},
    prompt::{Prompter, ReadOutcome},
};

#[derive(Debug, PartialEq)]
enum State {
    Prompting,
    Reading,
    Dispatching(String),
    Done(i32),
}

/// The read-dispatch loop. Owns the terminal and the process collaborators.
pub struct Shell<P: Prompter, F: ExecutablePathFinder, R: ExecutableRunner> {
    config: Config,
    prompter: P,
    finder: F,
    runner: R,
}

impl<P: Prompter, F: ExecutablePathFinder, R: ExecutableRunner> Shell<P, F, R> {
    pub fn new(config: Config, prompter: P, finder: F, runner: R) -> Self {
        return Self {
            config,
            prompter,
            finder,
            runner,
        };
    }

    /// Runs until end of input or `exit`, returning the process status.
    pub fn run(&mut self) -> anyhow::Result<i32> {
        let mut state = State::Prompting;

        loop {
            state = match state {
                State::Prompting => {
                    self.prompter.prompt(PROMPT)?;
                    State::Reading
                }
                State::Reading => match self.prompter.read()? {
                    ReadOutcome::Line(line) => State::Dispatching(line),
                    ReadOutcome::Eof => State::Done(0),
                },
                State::Dispatching(line) => match self.dispatch(&line)? {
                    Flow::Continue => State::Prompting,
                    Flow::Exit(code) => State::Done(code),
                },
                State::Done(code) => {
                    tracing::debug!(code, "shell finished");
                    return Ok(code);
                }
            };
        }
    }

    /// Handles one line. Per-line failures are reported and never end the loop.
    pub fn dispatch(&mut self, line: &str) -> anyhow::Result<Flow> {
        let invocation = match Invocation::parse(line) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                tracing::debug!(line, error = %e, "rejected line");
                self.prompter.report(&format!("{}\n", e))?;
                return Ok(Flow::Continue);
            }
        };

        tracing::debug!(command = ?invocation.command, "dispatching");
        let result = invocation.run(
            &mut self.prompter,
            &self.config.search_path,
            &self.finder,
            &self.runner,
        );

        match result {
            Ok(flow) => return Ok(flow),
            Err(e) => {
                self.prompter.report(&format!("{}\n", e))?;
                return Ok(Flow::Continue);
            }
        }
    }
}
