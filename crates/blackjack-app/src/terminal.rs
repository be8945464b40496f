use std::io::{self, BufRead, StdinLock, Stdout, Write};

use blackjack_core::console::{Console, ConsoleError};

/// Line-based console over any reader/writer pair, stdin/stdout in practice.
pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn show(&mut self, message: &str) -> Result<(), ConsoleError> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    fn prompt_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ConsoleError::Closed);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::TerminalConsole;
    use blackjack_core::console::{Console, ConsoleError};
    use std::io::Cursor;

    #[test]
    fn strips_line_endings_only() {
        let mut console = TerminalConsole::new(Cursor::new("h\r\n s\n"), Vec::new());
        assert_eq!(console.prompt_line("go?").unwrap(), "h");
        assert_eq!(console.prompt_line("go?").unwrap(), " s");
    }

    #[test]
    fn end_of_input_is_closed() {
        let mut console = TerminalConsole::new(Cursor::new(""), Vec::new());
        assert!(matches!(console.prompt_line("go?"), Err(ConsoleError::Closed)));
    }

    #[test]
    fn writes_messages_and_prompts_as_lines() {
        let mut console = TerminalConsole::new(Cursor::new("y\n"), Vec::new());
        console.show("hello").unwrap();
        console.prompt_line("again?").unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(output, "hello\nagain?\n");
    }
}
