//! Line-oriented console I/O for the menus

use std::io::{self, BufRead, ErrorKind, Write};
use std::str::FromStr;

/// Prompts on `output` and reads answers from `input`
///
/// End of input surfaces as an `UnexpectedEof` error so a menu loop can
/// unwind and let the caller close the engine.
pub struct Console<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Console<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    /// Print one line
    pub fn say(&mut self, message: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", message.as_ref())
    }

    /// Read one line, without its line ending
    pub fn prompt_line(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        let trimmed = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(trimmed);
        Ok(line)
    }

    /// Read a value, asking again until it parses
    pub fn prompt<T: FromStr>(&mut self, label: &str) -> io::Result<T> {
        loop {
            let line = self.prompt_line(label)?;
            match line.trim().parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Invalid input, try again.")?,
            }
        }
    }

    /// Like `prompt`, but an empty answer means "keep the current value"
    pub fn prompt_or_keep<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let line = self.prompt_line(label)?;
            if line.trim().is_empty() {
                return Ok(None);
            }
            match line.trim().parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Invalid input, try again.")?,
            }
        }
    }

    /// Text answer where an empty line means "keep the current value"
    pub fn prompt_text_or_keep(&mut self, label: &str) -> io::Result<Option<String>> {
        let line = self.prompt_line(label)?;
        Ok(if line.is_empty() { None } else { Some(line) })
    }

    /// Yes/no question; anything other than `y`/`yes` is a no
    pub fn confirm(&mut self, label: &str) -> io::Result<bool> {
        let line = self.prompt_line(label)?;
        Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    pub fn pause(&mut self) -> io::Result<()> {
        self.prompt_line("\nPress Enter to continue...").map(|_| ())
    }

    #[cfg(test)]
    pub fn into_output(self) -> O {
        self.output
    }
}
