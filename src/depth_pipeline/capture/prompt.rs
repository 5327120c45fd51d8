use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::depth_pipeline::common::error::Result;

/// Asked between captures whether to keep going.
pub trait ContinuePrompt {
    fn ask_continue(&mut self) -> Result<bool>;
}

/// Prints `Continue? (q to quit)` and reads one line.
///
/// A line starting with `q` (after leading whitespace) or end of input ends the session.
pub struct StdinPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl StdinPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ContinuePrompt for StdinPrompt<R, W> {
    fn ask_continue(&mut self) -> Result<bool> {
        writeln!(self.output, "Continue? (q to quit)")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let quit = matches!(line.trim_start().chars().next(), Some('q' | 'Q'));
        Ok(!quit)
    }
}

/// Never stops early; used for unattended runs.
pub struct AutoContinue;

impl ContinuePrompt for AutoContinue {
    fn ask_continue(&mut self) -> Result<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answers(input: &str) -> Vec<bool> {
        let mut prompt = StdinPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        (0..input.lines().count())
            .map(|_| prompt.ask_continue().unwrap())
            .collect()
    }

    #[test]
    fn test_q_quits_anything_else_continues() {
        assert_eq!(answers("\ny\nquit\n  q\nQ\nx\n"), vec![true, true, false, false, false, true]);
    }

    #[test]
    fn test_end_of_input_quits() {
        let mut prompt = StdinPrompt::new(Cursor::new(Vec::new()), Vec::new());
        assert!(!prompt.ask_continue().unwrap());
    }

    #[test]
    fn test_prompt_text_is_printed() {
        let mut output = Vec::new();
        {
            let mut prompt = StdinPrompt::new(Cursor::new(b"\n".to_vec()), &mut output);
            prompt.ask_continue().unwrap();
        }
        assert_eq!(output, b"Continue? (q to quit)\n");
    }
}
