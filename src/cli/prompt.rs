//! Terminal prompting
//!
//! Wraps an input reader and an output writer so interactive flows can be
//! driven from stdin/stdout in the binary and from in-memory buffers in tests.

use std::io::{BufRead, Write};

use crate::error::{TrackerError, TrackerResult};

/// Line-oriented question/answer helper
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print a line
    pub fn say(&mut self, line: impl AsRef<str>) -> TrackerResult<()> {
        writeln!(self.output, "{}", line.as_ref()).map_err(|e| TrackerError::Io(e.to_string()))
    }

    /// Ask a question and return the trimmed answer, or `None` at end of input
    pub fn ask(&mut self, question: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", question).map_err(|e| TrackerError::Io(e.to_string()))?;
        self.output
            .flush()
            .map_err(|e| TrackerError::Io(e.to_string()))?;

        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .map_err(|e| TrackerError::Io(e.to_string()))?;

        if read == 0 {
            // Keep the transcript tidy when input runs out mid-prompt
            writeln!(self.output).map_err(|e| TrackerError::Io(e.to_string()))?;
            return Ok(None);
        }

        Ok(Some(answer.trim().to_string()))
    }

    /// Ask a question that must be answered
    pub fn ask_required(&mut self, question: &str) -> TrackerResult<String> {
        self.ask(question)?
            .ok_or_else(|| TrackerError::validation("No input received."))
    }

    /// Ask a yes/no question; only "y" or "yes" counts as yes
    pub fn confirm(&mut self, question: &str) -> TrackerResult<bool> {
        Ok(self
            .ask(question)?
            .map(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false))
    }

    /// Direct access to the output, for renderers that write themselves
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
