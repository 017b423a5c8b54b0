//! Line-oriented terminal
//!
//! Owns the input and output streams of one session. Every answer is one
//! line; a closed or failing stream ends the session with `Input`.

use std::io::{BufRead, Write};

use crate::error::{BankError, BankResult};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one or more lines
    pub fn say(&mut self, text: impl AsRef<str>) -> BankResult<()> {
        writeln!(self.output, "{}", text.as_ref())
            .and_then(|_| self.output.flush())
            .map_err(|e| BankError::Input(format!("cannot write to terminal: {}", e)))
    }

    /// Print a prompt and read the answer, trimmed
    pub fn ask(&mut self, prompt: &str) -> BankResult<String> {
        self.say(prompt)?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| BankError::Input(format!("cannot read from terminal: {}", e)))?;
        if read == 0 {
            return Err(BankError::Input("input closed".into()));
        }

        Ok(line.trim().to_string())
    }

    /// Ask and parse the answer; a bad answer fails the operation
    pub fn ask_parsed<T>(
        &mut self,
        prompt: &str,
        parse: impl FnOnce(&str) -> BankResult<T>,
    ) -> BankResult<T> {
        let answer = self.ask(prompt)?;
        parse(&answer)
    }

    /// Print the outcome of an operation
    ///
    /// Fatal errors are returned; anything else is logged and shown as a
    /// generic failure so the session can continue.
    pub fn report(&mut self, result: BankResult<String>) -> BankResult<()> {
        match result {
            Ok(message) => self.say(message),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::error!(error = %err, "operation failed");
                self.say("Operation failed. Check the entered data and try again.")
            }
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
