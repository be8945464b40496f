//! The display collaborator the game talks through.
//!
//! The core never touches stdin/stdout directly; it only shows messages and
//! asks for lines through [`Console`].

use std::collections::VecDeque;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input closed")]
    Closed,
}

pub trait Console {
    fn show(&mut self, message: &str) -> Result<(), ConsoleError>;

    /// Shows `prompt` and blocks for one line of input, without its line ending.
    fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    fn blank_line(&mut self) -> Result<(), ConsoleError> {
        self.show("")
    }
}

/// Replays canned input and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn count(&self, needle: &str) -> usize {
        self.transcript.iter().filter(|line| line.contains(needle)).count()
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, message: &str) -> Result<(), ConsoleError> {
        self.transcript.push(message.to_string());
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.transcript.push(prompt.to_string());
        self.input.pop_front().ok_or(ConsoleError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Console, ConsoleError, ScriptedConsole};

    #[test]
    fn replays_lines_then_reports_closed() {
        let mut console = ScriptedConsole::new(["h"]);
        assert_eq!(console.prompt_line("go?").unwrap(), "h");
        assert!(matches!(console.prompt_line("go?"), Err(ConsoleError::Closed)));
        assert_eq!(console.count("go?"), 2);
    }

    #[test]
    fn records_shown_messages() {
        let mut console = ScriptedConsole::default();
        console.show("hello").unwrap();
        console.blank_line().unwrap();
        assert_eq!(console.transcript(), ["hello".to_string(), String::new()]);
        assert!(console.contains("hell"));
    }
}
