use std::io;

#[derive(Debug, PartialEq)]
pub enum ReadOutcome {
    Line(String),
    Eof,
}

/// The shell's view of its terminal: one line in, text out on two streams.
pub trait Prompter {
    fn read(&mut self) -> anyhow::Result<ReadOutcome>;
    /// Writes to standard output and flushes.
    fn prompt(&mut self, prompt: &str) -> anyhow::Result<()>;
    /// Writes to standard error and flushes.
    fn report(&mut self, message: &str) -> anyhow::Result<()>;
}

pub struct ConsolePrompter<R: io::BufRead, W: io::Write, E: io::Write> {
    reader: R,
    writer: W,
    error_writer: E,
}

impl<R: io::BufRead, W: io::Write, E: io::Write> Prompter for ConsolePrompter<R, W, E> {
    fn read(&mut self) -> anyhow::Result<ReadOutcome> {
        let mut input = Vec::new();
        if self.reader.read_until(b'\n', &mut input)? == 0 {
            return Ok(ReadOutcome::Eof);
        }

        // invalid UTF-8 becomes U+FFFD
        let line = String::from_utf8_lossy(&input)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        return Ok(ReadOutcome::Line(line));
    }

    fn prompt(&mut self, prompt: &str) -> anyhow::Result<()> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        return Ok(());
    }

    fn report(&mut self, message: &str) -> anyhow::Result<()> {
        write!(self.error_writer, "{}", message)?;
        self.error_writer.flush()?;

        return Ok(());
    }
}

impl<R: io::BufRead, W: io::Write, E: io::Write> ConsolePrompter<R, W, E> {
    pub fn new(reader: R, writer: W, error_writer: E) -> Self {
        return ConsolePrompter {
            reader,
            writer,
            error_writer,
        };
    }
}
