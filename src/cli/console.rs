//! Prompts and messages on the terminal

use crate::core::validation::Notice;
use crate::utils::error::{BulkError, Result};
use std::io::{BufRead, Stdout, StdinLock, Write};

pub struct Console<R: BufRead, W: Write> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    pub fn notices(&mut self, notices: &[Notice]) -> Result<()> {
        for notice in notices {
            writeln!(self.output, "{}\n", notice)?;
        }
        Ok(())
    }

    /// Ask a yes/no question; anything but `y`/`yes` cancels
    pub fn confirm(&mut self, question: &str) -> Result<()> {
        if self.assume_yes {
            writeln!(self.output, "{} [y/N] y", question)?;
            return Ok(());
        }
        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => Ok(()),
            _ => Err(BulkError::cancelled("nothing was sent to Canvas")),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
